pub mod json_backend;

use crate::domain::expense::Expense;
use crate::errors::Result;

/// Abstraction over the durable record store the ledger mirrors into.
///
/// Identifiers are generated by the store on `create` and stay unique for the
/// lifetime of the backing document, including across deletes.
pub trait ExpenseStore: Send + Sync {
    /// Persists a new row and returns its generated identifier.
    fn create(&mut self, date: &str, category: &str, amount: f64) -> Result<u64>;

    /// Rewrites the row with `id`; errors when the identifier is absent.
    fn update(&mut self, id: u64, date: &str, category: &str, amount: f64) -> Result<()>;

    /// Removes the row with `id`; errors when the identifier is absent.
    fn delete(&mut self, id: u64) -> Result<()>;

    /// Everything currently persisted, in stored order.
    fn load_all(&self) -> Result<Vec<Expense>>;

    /// Drops every persisted row (CSV import's full-replace path).
    fn clear_all(&mut self) -> Result<()>;
}

pub use json_backend::JsonStore;
