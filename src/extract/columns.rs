//! Column structure inference for statement pages.
//!
//! Header keywords are the primary signal; when a page carries no cash-in
//! or cash-out header, amount columns are inferred by clustering the
//! x-positions of currency-shaped fragments.

use std::collections::BTreeMap;

use tracing::debug;

use super::normalize::looks_like_currency;
use crate::models::config::ExtractConfig;
use crate::models::fragment::PositionedFragment;

/// Role a recognized header keyword assigns to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Date,
    Description,
    CashIn,
    CashOut,
}

/// Recognized header keywords and the column role each one names.
///
/// A bare "amount" header with no in/out wording maps to the cash-out
/// role, matching the expense-heavy shape of club statements. Order
/// matters: the in/out variants must be tried before "amount".
const HEADER_KEYWORDS: &[(&str, ColumnRole)] = &[
    ("cash in", ColumnRole::CashIn),
    ("cash out", ColumnRole::CashOut),
    ("date", ColumnRole::Date),
    ("description", ColumnRole::Description),
    ("amount", ColumnRole::CashOut),
];

/// Inferred horizontal positions of the ledger columns on one page.
///
/// A structure detected on page N may be reused on page N+1; multi-page
/// statements keep a stable layout.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColumnStructure {
    /// Date column position.
    pub date_x: Option<f32>,
    /// Description column position.
    pub description_x: Option<f32>,
    /// Cash-in (income) column position.
    pub cash_in_x: Option<f32>,
    /// Cash-out (expense) column position.
    pub cash_out_x: Option<f32>,
}

impl ColumnStructure {
    /// A structure is usable when the date column and at least one amount
    /// column were located.
    pub fn is_valid(&self) -> bool {
        self.date_x.is_some() && (self.cash_in_x.is_some() || self.cash_out_x.is_some())
    }

    /// Left edge of the amount region: the nearer of the amount columns.
    pub fn nearest_amount_x(&self) -> Option<f32> {
        match (self.cash_in_x, self.cash_out_x) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    }
}

/// Locates the Date/Description/Cash-In/Cash-Out columns on a page.
pub struct ColumnDetector {
    bucket_width: f32,
}

impl ColumnDetector {
    pub fn new(config: &ExtractConfig) -> Self {
        Self {
            bucket_width: config.column_bucket_width,
        }
    }

    /// Infer column positions for one page.
    ///
    /// Never fails: the result may be invalid, and the caller decides
    /// whether to fall back to a structure carried from an earlier page.
    pub fn detect(&self, fragments: &[PositionedFragment]) -> ColumnStructure {
        let mut structure = ColumnStructure::default();

        for frag in fragments {
            let lower = frag.text.to_lowercase();
            for (keyword, role) in HEADER_KEYWORDS {
                if !lower.contains(keyword) {
                    continue;
                }
                let slot = match role {
                    ColumnRole::Date => &mut structure.date_x,
                    ColumnRole::Description => &mut structure.description_x,
                    ColumnRole::CashIn => &mut structure.cash_in_x,
                    ColumnRole::CashOut => &mut structure.cash_out_x,
                };
                if slot.is_none() {
                    *slot = Some(frag.x);
                }
                break;
            }
        }

        if structure.cash_in_x.is_none() && structure.cash_out_x.is_none() {
            self.infer_amount_columns(fragments, &mut structure);
        }

        structure
    }

    /// Cluster currency-shaped fragments by x-position to stand in for
    /// missing amount headers.
    fn infer_amount_columns(
        &self,
        fragments: &[PositionedFragment],
        structure: &mut ColumnStructure,
    ) {
        let mut buckets: BTreeMap<i64, Vec<f32>> = BTreeMap::new();
        for frag in fragments {
            if looks_like_currency(&frag.text) {
                let bucket = (frag.x / self.bucket_width).floor() as i64;
                buckets.entry(bucket).or_default().push(frag.x);
            }
        }

        let centers: Vec<f32> = buckets
            .values()
            .map(|xs| xs.iter().sum::<f32>() / xs.len() as f32)
            .collect();

        match centers.len() {
            0 => {}
            1 => {
                // Expenses are the common case for a single amount column.
                debug!(
                    "single amount cluster at x={:.1}; assuming cash-out",
                    centers[0]
                );
                structure.cash_out_x = Some(centers[0]);
            }
            n => {
                structure.cash_in_x = Some(centers[n - 2]);
                structure.cash_out_x = Some(centers[n - 1]);
                debug!(
                    "{} amount clusters; cash-in at x={:.1}, cash-out at x={:.1}",
                    n,
                    centers[n - 2],
                    centers[n - 1]
                );
            }
        }
    }
}
