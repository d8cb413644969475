//! Error types for the ledgerscan library.

use thiserror::Error;

/// Main error type for the ledgerscan library.
///
/// Only document-level failures surface as errors. Token-level rejection
/// is an `Option::None` and page-level structural failure degrades to an
/// empty page result.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The external page-reading step failed.
    #[error("page read error: {0}")]
    Read(#[from] PageReadError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by a [`PageSource`](crate::extract::PageSource)
/// implementation.
#[derive(Error, Debug)]
pub enum PageReadError {
    /// The document cannot be read at all.
    #[error("document is unreadable: {0}")]
    Unreadable(String),

    /// A specific page could not be produced.
    #[error("page {0} is unavailable")]
    PageUnavailable(usize),
}

/// Result type for the ledgerscan library.
pub type Result<T> = std::result::Result<T, ExtractError>;
