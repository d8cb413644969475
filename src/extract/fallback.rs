//! Plain-text fallback parsing for pages where spatial extraction is not
//! available (no positioned fragments, or a layout the detector cannot
//! read).
//!
//! Strategies are pure line matchers tried in priority order. They feed
//! the same validation and classification pipeline as the spatial path
//! and emit transactions with a lower confidence score.

use tracing::debug;

use super::normalize::TokenNormalizer;
use super::patterns::{LINE_DATE_AMOUNT_DESC, LINE_DATE_DESC_AMOUNT};
use crate::classify::Classifier;
use crate::models::config::ExtractConfig;
use crate::models::transaction::{Transaction, TransactionType};

/// Confidence assigned to transactions recovered by line scanning.
pub const FALLBACK_CONFIDENCE: f32 = 0.6;

/// Raw pieces a strategy recovers from one line. Validation happens in
/// [`FallbackParser`].
#[derive(Debug, Clone)]
pub struct LineParse {
    pub date_raw: String,
    pub description: String,
    pub amount_raw: String,
    /// Direction when the line carries an explicit marker (CR/DR, in/out).
    pub direction: Option<TransactionType>,
}

/// A pure line-matching strategy.
pub trait LineStrategy {
    fn name(&self) -> &'static str;

    /// Attempt to split one line into transaction pieces.
    fn try_parse(&self, line: &str) -> Option<LineParse>;
}

/// `18/04/2025 Welsh 3000s Registration 1610.00 CR`
pub struct DateDescriptionAmount;

impl LineStrategy for DateDescriptionAmount {
    fn name(&self) -> &'static str {
        "date-description-amount"
    }

    fn try_parse(&self, line: &str) -> Option<LineParse> {
        let caps = LINE_DATE_DESC_AMOUNT.captures(line.trim())?;
        Some(LineParse {
            date_raw: caps[1].to_string(),
            description: caps[2].trim().to_string(),
            amount_raw: caps[3].to_string(),
            direction: caps.get(4).and_then(|m| marker_direction(m.as_str())),
        })
    }
}

/// `18/04/2025 1610.00 Welsh 3000s Registration`
pub struct DateAmountDescription;

impl LineStrategy for DateAmountDescription {
    fn name(&self) -> &'static str {
        "date-amount-description"
    }

    fn try_parse(&self, line: &str) -> Option<LineParse> {
        let caps = LINE_DATE_AMOUNT_DESC.captures(line.trim())?;
        Some(LineParse {
            date_raw: caps[1].to_string(),
            description: caps[3].trim().to_string(),
            amount_raw: caps[2].to_string(),
            direction: None,
        })
    }
}

fn marker_direction(marker: &str) -> Option<TransactionType> {
    match marker.to_lowercase().as_str() {
        "cr" | "in" => Some(TransactionType::Income),
        "dr" | "out" => Some(TransactionType::Expense),
        _ => None,
    }
}

/// Prioritized fallback parser over plain statement text.
pub struct FallbackParser {
    normalizer: TokenNormalizer,
    config: ExtractConfig,
    classifier: Classifier,
    strategies: Vec<Box<dyn LineStrategy>>,
}

impl FallbackParser {
    /// Create a parser with the default strategy order.
    pub fn new(config: ExtractConfig, classifier: Classifier) -> Self {
        Self {
            normalizer: TokenNormalizer::new(&config),
            config,
            classifier,
            strategies: vec![
                Box::new(DateDescriptionAmount),
                Box::new(DateAmountDescription),
            ],
        }
    }

    /// Override the normalizer (deterministic reference date in tests).
    pub fn with_normalizer(mut self, normalizer: TokenNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Scan a page of plain text, one transaction at most per line.
    pub fn parse_text(&self, text: &str, page: usize) -> Vec<Transaction> {
        text.lines()
            .filter_map(|line| self.parse_line(line, page))
            .collect()
    }

    /// Try each strategy in order until one yields a valid transaction.
    pub fn parse_line(&self, line: &str, page: usize) -> Option<Transaction> {
        for strategy in &self.strategies {
            let Some(parse) = strategy.try_parse(line) else {
                continue;
            };
            if let Some(tx) = self.build(parse, page) {
                debug!("fallback strategy {} matched line", strategy.name());
                return Some(tx);
            }
        }
        None
    }

    fn build(&self, parse: LineParse, page: usize) -> Option<Transaction> {
        let date = self.normalizer.normalize_date(&parse.date_raw)?;
        let amount = self.normalizer.parse_currency_amount(&parse.amount_raw)?;

        let description: String = parse
            .description
            .chars()
            .take(self.config.max_description_len)
            .collect::<String>()
            .trim()
            .to_string();
        if description.chars().count() < self.config.min_description_len {
            return None;
        }

        // Unmarked lines are treated as expenses, the common case for
        // this domain; an explicit CR/DR marker overrides.
        let kind = parse.direction.unwrap_or(TransactionType::Expense);

        Some(Transaction {
            date,
            category: self.classifier.category(&description),
            event: self.classifier.event(&description),
            description,
            amount: amount.abs(),
            kind,
            confidence: FALLBACK_CONFIDENCE,
            page,
        })
    }
}
