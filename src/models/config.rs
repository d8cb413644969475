//! Configuration for the extraction pipeline.
//!
//! The layout thresholds and validation bounds here are heuristics tuned
//! on real club statements; they are configuration rather than constants
//! so a caller can adapt them to a different bank's layout.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Main configuration for statement extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Maximum number of pages to process per document.
    pub max_pages: usize,

    /// Vertical distance (layout units) separating two rows.
    pub row_threshold: f32,

    /// Bucket width (layout units) used to merge near-duplicate column
    /// positions when inferring amount columns without headers.
    pub column_bucket_width: f32,

    /// Horizontal window (layout units) around a column position within
    /// which a fragment is attributed to that column.
    pub amount_tolerance: f32,

    /// Gap (layout units) kept between the description region and the
    /// nearest amount column.
    pub description_margin: f32,

    /// Maximum description length, in characters.
    pub max_description_len: usize,

    /// Minimum description length for a row to count as a transaction.
    pub min_description_len: usize,

    /// Largest plausible single-transaction amount.
    pub max_amount: Decimal,

    /// How far into the future a date may lie before it is rejected.
    /// Statements are historical records.
    pub max_future_days: i64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_pages: 20,
            row_threshold: 10.0,
            column_bucket_width: 25.0,
            amount_tolerance: 50.0,
            description_margin: 10.0,
            max_description_len: 100,
            min_description_len: 3,
            max_amount: Decimal::new(50_000, 0),
            max_future_days: 730,
        }
    }
}

impl ExtractConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
