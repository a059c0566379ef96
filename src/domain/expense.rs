use serde::{Deserialize, Serialize};

/// Longest category label accepted by validation and the CSV codec.
pub const MAX_CATEGORY_LEN: usize = 29;

/// One dated, categorized expense entry.
///
/// `id` is 0 until the persistence layer assigns an identifier on first save.
/// The category serializes under the historical `type` column name so the
/// durable document and the CSV header line up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: u64,
    pub date: String,
    #[serde(rename = "type")]
    pub category: String,
    pub amount: f64,
}

impl Expense {
    /// Creates a record that has not been persisted yet.
    pub fn new(date: impl Into<String>, category: impl Into<String>, amount: f64) -> Self {
        Self::with_id(0, date, category, amount)
    }

    /// Creates a record carrying a store-assigned identifier.
    pub fn with_id(
        id: u64,
        date: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            id,
            date: date.into(),
            category: category.into(),
            amount,
        }
    }

    /// True once the persistence layer has assigned an identifier.
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    /// ASCII case-insensitive category match used by filtered views.
    pub fn matches_category(&self, name: &str) -> bool {
        self.category.eq_ignore_ascii_case(name)
    }
}
