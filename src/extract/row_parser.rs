//! Converts grouped rows into transactions using the page's column layout.

use rust_decimal::Decimal;
use tracing::warn;

use super::columns::ColumnStructure;
use super::normalize::{TokenNormalizer, looks_like_currency, looks_like_date};
use crate::classify::Classifier;
use crate::models::config::ExtractConfig;
use crate::models::fragment::PositionedFragment;
use crate::models::transaction::{Transaction, TransactionType};

/// Confidence assigned to spatially extracted transactions. The fallback
/// line scan scores lower.
pub const SPATIAL_CONFIDENCE: f32 = 0.9;

/// Parses one row at a time against a detected column structure.
pub struct RowParser<'a> {
    normalizer: &'a TokenNormalizer,
    config: &'a ExtractConfig,
    classifier: &'a Classifier,
}

impl<'a> RowParser<'a> {
    pub fn new(
        normalizer: &'a TokenNormalizer,
        config: &'a ExtractConfig,
        classifier: &'a Classifier,
    ) -> Self {
        Self {
            normalizer,
            config,
            classifier,
        }
    }

    /// Parse one row into a transaction.
    ///
    /// Returns `None` for anything that is not a transaction row: headers,
    /// footers, page numbers, rows whose date or amount fails validation.
    pub fn parse_row(
        &self,
        row: &[PositionedFragment],
        structure: &ColumnStructure,
        page: usize,
    ) -> Option<Transaction> {
        let date_x = structure.date_x?;

        // A row without a date-shaped fragment is not a transaction row.
        let (date_idx, date_frag) = row
            .iter()
            .enumerate()
            .find(|(_, frag)| looks_like_date(&frag.text))?;
        let date = self.normalizer.normalize_date(&date_frag.text)?;

        let boundary = structure.nearest_amount_x()? - self.config.description_margin;
        let description = self.description_text(row, date_idx, date_x, boundary);
        if description.chars().count() < self.config.min_description_len {
            return None;
        }

        let cash_in = structure
            .cash_in_x
            .and_then(|x| self.amount_near(row, x));
        let cash_out = structure
            .cash_out_x
            .and_then(|x| self.amount_near(row, x));

        let (amount, kind) = match (cash_in, cash_out) {
            (Some(amount), Some(_)) => {
                // The column layout should make this impossible.
                warn!(
                    "page {}: amounts in both cash-in and cash-out columns; keeping cash-in",
                    page
                );
                (amount, TransactionType::Income)
            }
            (Some(amount), None) => (amount, TransactionType::Income),
            (None, Some(amount)) => (amount, TransactionType::Expense),
            (None, None) => return None,
        };

        Some(Transaction {
            date,
            category: self.classifier.category(&description),
            event: self.classifier.event(&description),
            description,
            amount,
            kind,
            confidence: SPATIAL_CONFIDENCE,
            page,
        })
    }

    /// Join the fragments between the date column and the amount region.
    fn description_text(
        &self,
        row: &[PositionedFragment],
        date_idx: usize,
        date_x: f32,
        boundary: f32,
    ) -> String {
        let joined = row
            .iter()
            .enumerate()
            .filter(|(i, frag)| *i != date_idx && frag.x > date_x && frag.x < boundary)
            .map(|(_, frag)| frag.text.trim())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        joined
            .chars()
            .take(self.config.max_description_len)
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// First currency-shaped fragment within the tolerance window of a
    /// column position, parsed and made positive.
    fn amount_near(&self, row: &[PositionedFragment], column_x: f32) -> Option<Decimal> {
        row.iter()
            .find(|frag| {
                (frag.x - column_x).abs() <= self.config.amount_tolerance
                    && looks_like_currency(&frag.text)
            })
            .and_then(|frag| self.normalizer.parse_currency_amount(&frag.text))
            .map(|amount| amount.abs())
    }
}
