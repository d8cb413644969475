//! Spatial transaction extraction pipeline.

mod columns;
mod fallback;
mod normalize;
mod patterns;
mod row_parser;
mod rows;
mod session;

pub use columns::{ColumnDetector, ColumnRole, ColumnStructure};
pub use fallback::{
    DateAmountDescription, DateDescriptionAmount, FALLBACK_CONFIDENCE, FallbackParser, LineParse,
    LineStrategy,
};
pub use normalize::{TokenNormalizer, correct_digit_confusions, looks_like_currency, looks_like_date};
pub use row_parser::{RowParser, SPATIAL_CONFIDENCE};
pub use rows::group_rows;
pub use session::{CancelFlag, StatementExtractor};

use crate::error::PageReadError;
use crate::models::fragment::PositionedFragment;

/// Seam to the external page-reading layer (PDF text layer or OCR pass).
///
/// Implementations produce positioned fragments per page, in any order;
/// the pipeline sorts them. A failing read is a document-level error and
/// aborts the whole extraction.
pub trait PageSource {
    /// Total number of pages in the document.
    fn page_count(&self) -> usize;

    /// Positioned fragments for a 1-based page number.
    fn fragments(&self, page: usize) -> Result<Vec<PositionedFragment>, PageReadError>;
}

/// A document held fully in memory; the bundled [`PageSource`] used by
/// tests and host-side adapters.
pub struct InMemoryDocument {
    pages: Vec<Vec<PositionedFragment>>,
}

impl InMemoryDocument {
    pub fn new(pages: Vec<Vec<PositionedFragment>>) -> Self {
        Self { pages }
    }
}

impl PageSource for InMemoryDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn fragments(&self, page: usize) -> Result<Vec<PositionedFragment>, PageReadError> {
        let index = page
            .checked_sub(1)
            .ok_or(PageReadError::PageUnavailable(page))?;
        self.pages
            .get(index)
            .cloned()
            .ok_or(PageReadError::PageUnavailable(page))
    }
}
