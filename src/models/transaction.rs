//! Transaction records emitted by the extraction pipeline.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a transaction, derived from the column it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Amount came from the cash-in column.
    Income,
    /// Amount came from the cash-out column.
    Expense,
}

/// A validated transaction extracted from a statement page.
///
/// Every constructed transaction has already passed validation: a real
/// calendar date, a description of at least the configured minimum length,
/// and a positive amount within the configured ceiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction date.
    pub date: NaiveDate,

    /// Cleaned description text.
    pub description: String,

    /// Positive amount with two decimal places.
    pub amount: Decimal,

    /// Income or expense.
    pub kind: TransactionType,

    /// Best-effort category label from the keyword table.
    pub category: String,

    /// Best-effort event label from the keyword table.
    pub event: String,

    /// Extraction confidence in [0, 1]. Spatial extraction scores higher
    /// than the fallback line scan.
    pub confidence: f32,

    /// 1-based source page number.
    pub page: usize,
}

/// Number of description characters used in the dedup key.
const DEDUP_PREFIX_LEN: usize = 20;

impl Transaction {
    /// Canonical `DD/MM/YYYY` rendering of the date.
    pub fn date_display(&self) -> String {
        self.date.format("%d/%m/%Y").to_string()
    }

    /// Composite key used to collapse duplicate rows across pages.
    pub fn dedup_key(&self) -> (NaiveDate, Decimal, String) {
        let prefix: String = self
            .description
            .to_lowercase()
            .chars()
            .take(DEDUP_PREFIX_LEN)
            .collect();
        (self.date, self.amount, prefix)
    }
}

/// Result of extracting a whole document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentExtract {
    /// All transactions, deduplicated, in encounter order.
    pub transactions: Vec<Transaction>,

    /// Number of pages that were actually processed.
    pub pages_processed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample(description: &str) -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(2025, 4, 18).unwrap(),
            description: description.to_string(),
            amount: Decimal::from_str("1610.00").unwrap(),
            kind: TransactionType::Income,
            category: "Uncategorized".to_string(),
            event: "General".to_string(),
            confidence: 0.9,
            page: 1,
        }
    }

    #[test]
    fn test_date_display() {
        assert_eq!(sample("x").date_display(), "18/04/2025");
    }

    #[test]
    fn test_dedup_key_uses_description_prefix() {
        let a = sample("Welsh 3000s Registration fee (member A)");
        let b = sample("Welsh 3000s Registration fee (member B)");
        assert_eq!(a.dedup_key(), b.dedup_key());

        let c = sample("Minibus hire");
        assert_ne!(a.dedup_key(), c.dedup_key());
    }

    #[test]
    fn test_dedup_key_is_case_insensitive() {
        let a = sample("Minibus Hire");
        let b = sample("MINIBUS HIRE");
        assert_eq!(a.dedup_key(), b.dedup_key());
    }
}
