#![doc(test(attr(deny(warnings))))]

//! Expense Core keeps a dated, categorized expense ledger with an optional
//! budget ceiling, durable JSON persistence, and CSV interchange.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod interop;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Core tracing initialized.");
    });
}
