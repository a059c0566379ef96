mod common;

use common::test_dir;
use expense_core::errors::LedgerError;
use expense_core::ledger::Ledger;
use expense_core::storage::{ExpenseStore, JsonStore};

fn fresh() -> (Ledger, JsonStore) {
    let store = JsonStore::open(test_dir().join("expenses.json")).expect("open store");
    (Ledger::new(), store)
}

#[test]
fn add_persists_and_assigns_identifiers() {
    let (mut ledger, mut store) = fresh();
    let first = ledger
        .add(&mut store, "15/01/2024", "Food", 12.5)
        .unwrap()
        .id;
    let second = ledger
        .add(&mut store, "16/01/2024", "Fuel", 40.0)
        .unwrap()
        .id;
    assert_eq!((first, second), (1, 2));
    assert_eq!(ledger.total(), 52.5);

    let mut reloaded = Ledger::new();
    reloaded.load_from(&store).unwrap();
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.records()[0].category, "Food");
}

#[test]
fn invalid_date_does_not_change_ledger_or_store() {
    let (mut ledger, mut store) = fresh();
    let err = ledger
        .add(&mut store, "29/02/2023", "Food", 5.0)
        .expect_err("2023 is not a leap year");
    assert!(matches!(err, LedgerError::InvalidDate(_)));
    assert!(ledger.is_empty());
    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn negative_amount_does_not_change_ledger() {
    let (mut ledger, mut store) = fresh();
    let err = ledger
        .add(&mut store, "15/01/2024", "Food", -1.0)
        .expect_err("negative amount");
    assert!(matches!(err, LedgerError::NegativeAmount(_)));
    assert_eq!(ledger.len(), 0);
    assert_eq!(ledger.total(), 0.0);
}

#[test]
fn update_beyond_length_is_out_of_range() {
    let (mut ledger, mut store) = fresh();
    ledger.add(&mut store, "15/01/2024", "Food", 5.0).unwrap();

    let err = ledger
        .update(&mut store, 2, "16/01/2024", "Fuel", 1.0)
        .expect_err("position 2 of 1");
    assert!(matches!(err, LedgerError::OutOfRange { position: 2, len: 1 }));
    assert_eq!(ledger.records()[0].category, "Food");
    assert_eq!(store.load_all().unwrap()[0].category, "Food");
}

#[test]
fn update_mirrors_to_the_store() {
    let (mut ledger, mut store) = fresh();
    ledger.add(&mut store, "15/01/2024", "Food", 5.0).unwrap();
    ledger
        .update(&mut store, 1, "20/01/2024", "Groceries", 7.5)
        .unwrap();

    let rows = store.load_all().unwrap();
    assert_eq!(rows[0].id, 1);
    assert_eq!(rows[0].date, "20/01/2024");
    assert_eq!(rows[0].category, "Groceries");
    assert_eq!(rows[0].amount, 7.5);
}

#[test]
fn remove_updates_total_and_store() {
    let (mut ledger, mut store) = fresh();
    ledger.add(&mut store, "15/01/2024", "Food", 10.0).unwrap();
    ledger.add(&mut store, "16/01/2024", "Fuel", 20.0).unwrap();
    ledger.add(&mut store, "17/01/2024", "Rent", 30.0).unwrap();

    let removed = ledger.remove(&mut store, 2).unwrap();
    assert_eq!(removed.category, "Fuel");
    assert_eq!(ledger.total(), 40.0);
    assert_eq!(store.load_all().unwrap().len(), 2);
}

#[test]
fn filter_by_category_is_case_insensitive() {
    let (mut ledger, mut store) = fresh();
    ledger.add(&mut store, "15/01/2024", "Food", 10.0).unwrap();
    ledger.add(&mut store, "16/01/2024", "fuel", 20.0).unwrap();
    ledger.add(&mut store, "17/01/2024", "FOOD", 30.0).unwrap();

    assert_eq!(
        ledger.filter_by_category("Food"),
        ledger.filter_by_category("food")
    );
    assert_eq!(ledger.filter_by_category("food").len(), 2);
    assert!(ledger.filter_by_category("rent").is_empty());
}
