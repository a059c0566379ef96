use thiserror::Error;

/// Error type that captures ledger, budget, and storage failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid date `{0}`: expected a real calendar date as dd/mm/yyyy")]
    InvalidDate(String),
    #[error("amount {0} is negative")]
    NegativeAmount(f64),
    #[error("invalid category: {0}")]
    InvalidCategory(String),
    #[error("no expense at position {position}; the listing has {len} entries")]
    OutOfRange { position: usize, len: usize },
    #[error("spending ({total:.2}) already meets the {ceiling:.2} budget ceiling")]
    OverBudget { ceiling: f64, total: f64 },
    #[error(
        "adding {amount:.2} would push spending ({total:.2}) past the {ceiling:.2} budget ceiling"
    )]
    WouldExceedBudget { ceiling: f64, total: f64, amount: f64 },
    #[error("storage error: {0}")]
    Storage(String),
    #[error("could not access `{path}`: {source}")]
    FileAccess {
        path: String,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, LedgerError>;

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("input error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}
