//! Optional budget ceiling enforced as a hard gate in front of adds.

use crate::errors::{LedgerError, Result};

/// Process-lifetime budget ceiling; `None` means spending is unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BudgetPolicy {
    ceiling: Option<f64>,
}

impl BudgetPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ceiling(&self) -> Option<f64> {
        self.ceiling
    }

    /// Sets the ceiling. Negative values are rejected; zero clears the
    /// ceiling, preserving the historical "zero means unlimited" convention
    /// at the boundary while the stored state stays an explicit option.
    pub fn set_ceiling(&mut self, value: f64) -> Result<()> {
        if value < 0.0 {
            return Err(LedgerError::NegativeAmount(value));
        }
        self.ceiling = if value == 0.0 { None } else { Some(value) };
        Ok(())
    }

    pub fn clear_ceiling(&mut self) {
        self.ceiling = None;
    }

    /// Hard gate evaluated before an add.
    ///
    /// With a ceiling set, spending already at or past it refuses outright;
    /// otherwise an amount that would push past it refuses. Landing exactly
    /// on the ceiling is allowed.
    pub fn check_add(&self, current_total: f64, amount: f64) -> Result<()> {
        let Some(ceiling) = self.ceiling else {
            return Ok(());
        };
        if current_total >= ceiling {
            return Err(LedgerError::OverBudget {
                ceiling,
                total: current_total,
            });
        }
        if current_total + amount > ceiling {
            return Err(LedgerError::WouldExceedBudget {
                ceiling,
                total: current_total,
                amount,
            });
        }
        Ok(())
    }

    /// Budget left before the ceiling, or `None` when no ceiling is set.
    pub fn remaining(&self, current_total: f64) -> Option<f64> {
        self.ceiling.map(|ceiling| ceiling - current_total)
    }
}
