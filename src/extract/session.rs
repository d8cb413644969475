//! Document-level extraction: drives per-page detection, grouping, and
//! parsing, carrying a usable column structure across pages.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use super::PageSource;
use super::columns::{ColumnDetector, ColumnStructure};
use super::normalize::TokenNormalizer;
use super::row_parser::RowParser;
use super::rows::group_rows;
use crate::classify::Classifier;
use crate::error::Result;
use crate::models::config::ExtractConfig;
use crate::models::transaction::{DocumentExtract, Transaction};

/// Cooperative cancellation flag, checked between pages.
///
/// Clone it, hand a copy to another thread, and call [`CancelFlag::cancel`]
/// to stop after the page currently being processed. Extraction returns
/// whatever was accumulated so far.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Spatial statement extractor.
///
/// Holds only immutable configuration; each [`extract`](Self::extract)
/// call runs its own session state (carried column structure and
/// accumulator), so one extractor may serve concurrent documents.
pub struct StatementExtractor {
    config: ExtractConfig,
    classifier: Classifier,
}

impl StatementExtractor {
    /// Create an extractor with default configuration and classifier.
    pub fn new() -> Self {
        Self {
            config: ExtractConfig::default(),
            classifier: Classifier::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: ExtractConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the category/event classifier.
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Extract every transaction from a document.
    pub fn extract(&self, source: &dyn PageSource) -> Result<DocumentExtract> {
        self.extract_with_cancel(source, &CancelFlag::new())
    }

    /// Extract with cooperative cancellation.
    ///
    /// Pages are processed strictly in order because the column structure
    /// detected on one page may be reused on the next. A page whose own
    /// detection fails degrades to the carried structure, or to zero
    /// transactions; only a failing read aborts the document.
    pub fn extract_with_cancel(
        &self,
        source: &dyn PageSource,
        cancel: &CancelFlag,
    ) -> Result<DocumentExtract> {
        let normalizer = TokenNormalizer::new(&self.config);
        let detector = ColumnDetector::new(&self.config);
        let parser = RowParser::new(&normalizer, &self.config, &self.classifier);

        let total_pages = source.page_count().min(self.config.max_pages);
        let mut carried: Option<ColumnStructure> = None;
        let mut transactions: Vec<Transaction> = Vec::new();
        let mut pages_processed = 0;

        for page in 1..=total_pages {
            if cancel.is_cancelled() {
                info!("extraction cancelled after {} pages", pages_processed);
                break;
            }

            let fragments = source.fragments(page)?;
            let detected = detector.detect(&fragments);

            let structure = if detected.is_valid() {
                carried = Some(detected);
                detected
            } else if let Some(previous) = carried {
                debug!("page {}: no column structure; reusing carried structure", page);
                previous
            } else {
                warn!("page {}: no column structure detected and none carried", page);
                pages_processed += 1;
                continue;
            };

            let before = transactions.len();
            for row in group_rows(fragments, self.config.row_threshold) {
                if let Some(tx) = parser.parse_row(&row, &structure, page) {
                    transactions.push(tx);
                }
            }
            debug!("page {}: {} transactions", page, transactions.len() - before);
            pages_processed += 1;
        }

        let transactions = dedup_transactions(transactions);
        info!(
            "extracted {} transactions from {} pages",
            transactions.len(),
            pages_processed
        );

        Ok(DocumentExtract {
            transactions,
            pages_processed,
        })
    }
}

impl Default for StatementExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Collapse duplicates by (date, amount, description prefix), keeping the
/// first occurrence.
fn dedup_transactions(transactions: Vec<Transaction>) -> Vec<Transaction> {
    let mut seen = HashSet::new();
    transactions
        .into_iter()
        .filter(|tx| seen.insert(tx.dedup_key()))
        .collect()
}
