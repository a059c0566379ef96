//! In-memory expense ledger mirrored to a persistence gateway.

use crate::domain::date;
use crate::domain::expense::{Expense, MAX_CATEGORY_LEN};
use crate::errors::{LedgerError, Result};
use crate::storage::ExpenseStore;

/// Ordered collection of expense records, insertion order preserved.
///
/// Positions handed to [`Ledger::update`] and [`Ledger::remove`] are 1-based
/// indexes into the current iteration order, matching the numbered listing the
/// shell prints. A position is only valid against the immediately preceding
/// listing: any mutation renumbers the sequence.
///
/// Every mutating operation talks to the store before touching memory, so a
/// storage failure leaves the in-memory sequence exactly as it was.
#[derive(Debug, Default)]
pub struct Ledger {
    records: Vec<Expense>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Expense] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Expense> {
        self.records.iter()
    }

    /// Validates and appends a new expense.
    ///
    /// The store assigns the identifier before anything lands in memory.
    pub fn add(
        &mut self,
        store: &mut dyn ExpenseStore,
        date: &str,
        category: &str,
        amount: f64,
    ) -> Result<&Expense> {
        validate_fields(date, category, amount)?;
        let id = store.create(date, category, amount)?;
        self.records.push(Expense::with_id(id, date, category, amount));
        tracing::info!(id, amount, "expense added");
        Ok(self.records.last().expect("record just pushed"))
    }

    /// Replaces the fields of the record at `position` (1-based); the
    /// identifier is immutable.
    pub fn update(
        &mut self,
        store: &mut dyn ExpenseStore,
        position: usize,
        date: &str,
        category: &str,
        amount: f64,
    ) -> Result<()> {
        let idx = self.index_of(position)?;
        validate_fields(date, category, amount)?;
        let id = self.records[idx].id;
        store.update(id, date, category, amount)?;
        let record = &mut self.records[idx];
        record.date = date.to_string();
        record.category = category.to_string();
        record.amount = amount;
        tracing::info!(id, position, "expense updated");
        Ok(())
    }

    /// Detaches and returns the record at `position` (1-based).
    pub fn remove(&mut self, store: &mut dyn ExpenseStore, position: usize) -> Result<Expense> {
        let idx = self.index_of(position)?;
        store.delete(self.records[idx].id)?;
        let removed = self.records.remove(idx);
        tracing::info!(id = removed.id, position, "expense removed");
        Ok(removed)
    }

    /// Sum of all recorded amounts.
    pub fn total(&self) -> f64 {
        self.records.iter().map(|record| record.amount).sum()
    }

    /// Records whose category matches `name`, ignoring ASCII case, in
    /// original order. An empty result is not an error.
    pub fn filter_by_category(&self, name: &str) -> Vec<&Expense> {
        self.records
            .iter()
            .filter(|record| record.matches_category(name))
            .collect()
    }

    /// Discards the current sequence in favour of `records`.
    ///
    /// Bulk-load path used by [`Ledger::load_from`] and CSV import; the store
    /// is deliberately left alone.
    pub fn replace_all(&mut self, records: Vec<Expense>) {
        self.records = records;
    }

    /// Repopulates the ledger from everything the store holds; returns the
    /// record count.
    pub fn load_from(&mut self, store: &dyn ExpenseStore) -> Result<usize> {
        let records = store.load_all()?;
        let count = records.len();
        self.replace_all(records);
        Ok(count)
    }

    fn index_of(&self, position: usize) -> Result<usize> {
        if position == 0 || position > self.records.len() {
            return Err(LedgerError::OutOfRange {
                position,
                len: self.records.len(),
            });
        }
        Ok(position - 1)
    }
}

fn validate_fields(date: &str, category: &str, amount: f64) -> Result<()> {
    if !date::is_valid(date) {
        return Err(LedgerError::InvalidDate(date.to_string()));
    }
    if category.is_empty() {
        return Err(LedgerError::InvalidCategory("must not be empty".into()));
    }
    if category.chars().count() > MAX_CATEGORY_LEN {
        return Err(LedgerError::InvalidCategory(format!(
            "longer than {MAX_CATEGORY_LEN} characters"
        )));
    }
    if amount < 0.0 {
        return Err(LedgerError::NegativeAmount(amount));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Store double tracking calls without touching disk.
    #[derive(Default)]
    struct MemoryStore {
        next_id: u64,
        rows: Vec<Expense>,
        fail_next: bool,
    }

    impl MemoryStore {
        fn failing() -> Self {
            Self {
                fail_next: true,
                ..Self::default()
            }
        }
    }

    impl ExpenseStore for MemoryStore {
        fn create(&mut self, date: &str, category: &str, amount: f64) -> Result<u64> {
            if self.fail_next {
                return Err(LedgerError::Storage("injected create failure".into()));
            }
            self.next_id += 1;
            self.rows
                .push(Expense::with_id(self.next_id, date, category, amount));
            Ok(self.next_id)
        }

        fn update(&mut self, id: u64, date: &str, category: &str, amount: f64) -> Result<()> {
            if self.fail_next {
                return Err(LedgerError::Storage("injected update failure".into()));
            }
            let row = self
                .rows
                .iter_mut()
                .find(|row| row.id == id)
                .ok_or_else(|| LedgerError::Storage(format!("no stored expense with id {id}")))?;
            *row = Expense::with_id(id, date, category, amount);
            Ok(())
        }

        fn delete(&mut self, id: u64) -> Result<()> {
            let before = self.rows.len();
            self.rows.retain(|row| row.id != id);
            if self.rows.len() == before {
                return Err(LedgerError::Storage(format!("no stored expense with id {id}")));
            }
            Ok(())
        }

        fn load_all(&self) -> Result<Vec<Expense>> {
            Ok(self.rows.clone())
        }

        fn clear_all(&mut self) -> Result<()> {
            self.rows.clear();
            Ok(())
        }
    }

    #[test]
    fn add_assigns_store_identifier() {
        let mut ledger = Ledger::new();
        let mut store = MemoryStore::default();
        let record = ledger.add(&mut store, "15/01/2024", "Food", 12.5).unwrap();
        assert_eq!(record.id, 1);
        assert!(record.is_persisted());
        assert_eq!(store.rows.len(), 1);
    }

    #[test]
    fn add_rejects_invalid_date_without_side_effects() {
        let mut ledger = Ledger::new();
        let mut store = MemoryStore::default();
        let err = ledger
            .add(&mut store, "31/04/2020", "Food", 5.0)
            .expect_err("april has 30 days");
        assert!(matches!(err, LedgerError::InvalidDate(_)));
        assert!(ledger.is_empty());
        assert!(store.rows.is_empty());
    }

    #[test]
    fn add_rejects_negative_amount() {
        let mut ledger = Ledger::new();
        let mut store = MemoryStore::default();
        let err = ledger
            .add(&mut store, "15/01/2024", "Food", -1.0)
            .expect_err("negative amount");
        assert!(matches!(err, LedgerError::NegativeAmount(_)));
        assert_eq!(ledger.total(), 0.0);
    }

    #[test]
    fn add_rejects_empty_and_oversized_categories() {
        let mut ledger = Ledger::new();
        let mut store = MemoryStore::default();
        assert!(matches!(
            ledger.add(&mut store, "15/01/2024", "", 1.0),
            Err(LedgerError::InvalidCategory(_))
        ));
        let long = "x".repeat(MAX_CATEGORY_LEN + 1);
        assert!(matches!(
            ledger.add(&mut store, "15/01/2024", &long, 1.0),
            Err(LedgerError::InvalidCategory(_))
        ));
        assert!(ledger.is_empty());
    }

    #[test]
    fn storage_failure_leaves_memory_untouched() {
        let mut ledger = Ledger::new();
        let mut store = MemoryStore::failing();
        let err = ledger
            .add(&mut store, "15/01/2024", "Food", 5.0)
            .expect_err("store rejects the create");
        assert!(matches!(err, LedgerError::Storage(_)));
        assert!(ledger.is_empty());
        assert_eq!(ledger.total(), 0.0);
    }

    #[test]
    fn update_is_positional_and_keeps_identifier() {
        let mut ledger = Ledger::new();
        let mut store = MemoryStore::default();
        ledger.add(&mut store, "01/01/2024", "Food", 10.0).unwrap();
        ledger.add(&mut store, "02/01/2024", "Fuel", 20.0).unwrap();

        ledger
            .update(&mut store, 2, "03/01/2024", "Travel", 25.0)
            .unwrap();
        let record = &ledger.records()[1];
        assert_eq!(record.id, 2);
        assert_eq!(record.category, "Travel");
        assert_eq!(store.rows[1].category, "Travel");
    }

    #[test]
    fn update_out_of_range_changes_nothing() {
        let mut ledger = Ledger::new();
        let mut store = MemoryStore::default();
        ledger.add(&mut store, "01/01/2024", "Food", 10.0).unwrap();

        let err = ledger
            .update(&mut store, 5, "02/01/2024", "Fuel", 1.0)
            .expect_err("position beyond the listing");
        assert!(matches!(err, LedgerError::OutOfRange { position: 5, len: 1 }));
        assert_eq!(ledger.records()[0].category, "Food");
    }

    #[test]
    fn positions_are_one_based() {
        let mut ledger = Ledger::new();
        let mut store = MemoryStore::default();
        ledger.add(&mut store, "01/01/2024", "Food", 10.0).unwrap();
        assert!(matches!(
            ledger.remove(&mut store, 0),
            Err(LedgerError::OutOfRange { position: 0, .. })
        ));
    }

    #[test]
    fn remove_renumbers_and_total_reflects_it() {
        let mut ledger = Ledger::new();
        let mut store = MemoryStore::default();
        ledger.add(&mut store, "01/01/2024", "Food", 10.0).unwrap();
        ledger.add(&mut store, "02/01/2024", "Fuel", 20.0).unwrap();
        ledger.add(&mut store, "03/01/2024", "Rent", 30.0).unwrap();

        let removed = ledger.remove(&mut store, 2).unwrap();
        assert_eq!(removed.category, "Fuel");
        assert_eq!(ledger.total(), 40.0);
        // The old third record is now position 2.
        assert_eq!(ledger.records()[1].category, "Rent");
        assert_eq!(store.rows.len(), 2);
    }

    #[test]
    fn filter_by_category_ignores_case() {
        let mut ledger = Ledger::new();
        let mut store = MemoryStore::default();
        ledger.add(&mut store, "01/01/2024", "Food", 10.0).unwrap();
        ledger.add(&mut store, "02/01/2024", "Fuel", 20.0).unwrap();
        ledger.add(&mut store, "03/01/2024", "FOOD", 5.0).unwrap();

        let upper = ledger.filter_by_category("FOOD");
        let lower = ledger.filter_by_category("food");
        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 2);
        assert!(ledger.filter_by_category("rent").is_empty());
    }

    #[test]
    fn load_from_replaces_current_contents() {
        let mut ledger = Ledger::new();
        let mut store = MemoryStore::default();
        ledger.add(&mut store, "01/01/2024", "Food", 10.0).unwrap();

        let mut other = MemoryStore::default();
        other.create("05/05/2024", "Rent", 99.0).unwrap();
        let count = ledger.load_from(&other).unwrap();
        assert_eq!(count, 1);
        assert_eq!(ledger.records()[0].category, "Rent");
    }
}
