//! Spatial transaction extraction from scanned bank statements.
//!
//! This crate provides:
//! - Token normalization for noisy date and currency fragments
//! - Column structure inference (headers or currency clustering)
//! - Row grouping of positioned fragments and row-to-transaction parsing
//! - A per-document extraction session with carried column structure
//! - A plain-text regex fallback path and keyword classification

pub mod classify;
pub mod error;
pub mod extract;
pub mod models;

pub use classify::{Classifier, KeywordRule, KeywordTable};
pub use error::{ExtractError, PageReadError, Result};
pub use extract::{
    CancelFlag, ColumnDetector, ColumnStructure, FallbackParser, InMemoryDocument, PageSource,
    RowParser, StatementExtractor, TokenNormalizer, group_rows,
};
pub use models::config::ExtractConfig;
pub use models::fragment::PositionedFragment;
pub use models::transaction::{DocumentExtract, Transaction, TransactionType};
