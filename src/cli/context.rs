//! Explicit context object bundling the engine pieces the shell drives.

use crate::config::Config;
use crate::errors::Result;
use crate::ledger::{BudgetPolicy, Ledger};
use crate::storage::{ExpenseStore, JsonStore};

/// Single-instance-per-process bundle of ledger, budget policy, store, and
/// configuration, constructed at startup and passed to every operation.
pub struct ShellContext {
    pub ledger: Ledger,
    pub budget: BudgetPolicy,
    pub store: Box<dyn ExpenseStore>,
    pub config: Config,
}

impl ShellContext {
    /// Opens the durable store and loads the ledger from it.
    ///
    /// A store that cannot be opened is fatal; the caller exits with an
    /// error status.
    pub fn bootstrap(config: Config) -> Result<Self> {
        let store = JsonStore::with_retention(&config.data_file, config.backup_retention)?;
        Self::with_store(Box::new(store), config)
    }

    /// Builds a context over an already-open store (used by tests).
    pub fn with_store(store: Box<dyn ExpenseStore>, config: Config) -> Result<Self> {
        let mut context = Self {
            ledger: Ledger::new(),
            budget: BudgetPolicy::new(),
            store,
            config,
        };
        let loaded = context.ledger.load_from(context.store.as_ref())?;
        tracing::info!(loaded, "ledger loaded from store");
        Ok(context)
    }
}
