//! Token normalization for noisy date and currency fragments.
//!
//! Scanned statements routinely confuse look-alike glyphs (letter O for
//! digit 0, lowercase l for 1). The normalizer corrects those in digit
//! contexts, then applies strict validation so a bad token is rejected
//! rather than guessed at.

use std::str::FromStr;

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::patterns::{AMOUNT_SHAPE, CURRENCY_TOKEN, DATE_TOKEN};
use crate::models::config::ExtractConfig;

/// Replace characters commonly misread for digits, where they sit next to
/// a digit. Letters inside ordinary words are left alone.
pub fn correct_digit_confusions(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());

    for (i, &c) in chars.iter().enumerate() {
        let prev_digit = i > 0 && chars[i - 1].is_ascii_digit();
        let next_digit = chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());

        let corrected = if prev_digit || next_digit {
            match c {
                'O' | 'o' => '0',
                'I' | 'l' | '|' => '1',
                'S' | 's' => '5',
                'Z' | 'z' => '2',
                'G' => '6',
                _ => c,
            }
        } else {
            c
        };
        out.push(corrected);
    }

    out
}

/// Whether a fragment's text contains a date-shaped token, after
/// confusion correction.
pub fn looks_like_date(text: &str) -> bool {
    DATE_TOKEN.is_match(&correct_digit_confusions(text.trim()))
}

/// Whether a fragment's text is a single currency-shaped token, after
/// confusion correction.
pub fn looks_like_currency(text: &str) -> bool {
    CURRENCY_TOKEN.is_match(&correct_digit_confusions(text.trim()))
}

/// Validating normalizer for date and currency tokens.
///
/// The reference date anchors future-date rejection; it defaults to today
/// and is overridable for deterministic tests.
pub struct TokenNormalizer {
    max_amount: Decimal,
    max_future_days: i64,
    reference_date: NaiveDate,
}

impl TokenNormalizer {
    /// Create a normalizer with the given bounds, anchored at today.
    pub fn new(config: &ExtractConfig) -> Self {
        Self {
            max_amount: config.max_amount,
            max_future_days: config.max_future_days,
            reference_date: Utc::now().date_naive(),
        }
    }

    /// Override the reference date used for future-date rejection.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = date;
        self
    }

    /// Normalize a raw date token to a calendar date.
    ///
    /// Returns `None` for anything that does not round-trip to a real,
    /// plausible date — never a guessed default.
    pub fn normalize_date(&self, raw: &str) -> Option<NaiveDate> {
        let corrected: String = correct_digit_confusions(raw.trim())
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let cleaned = corrected.replace(['-', '.'], "/");

        let parts: Vec<&str> = cleaned.split('/').collect();
        if parts.len() != 3 {
            return None;
        }

        let mut day: u32 = parts[0].parse().ok()?;
        let mut month: u32 = parts[1].parse().ok()?;
        let mut year: i32 = parts[2].parse().ok()?;

        if parts[2].len() <= 2 {
            year = if year > 50 { 1900 + year } else { 2000 + year };
        }

        // Common transposition: 13/04 read as 04/13.
        if month > 12 && day <= 12 {
            std::mem::swap(&mut day, &mut month);
        }

        if !(1..=31).contains(&day) || !(1..=12).contains(&month) || !(1900..=2100).contains(&year)
        {
            return None;
        }

        let date = NaiveDate::from_ymd_opt(year, month, day)?;

        // Statements are historical records.
        if date > self.reference_date + Duration::days(self.max_future_days) {
            return None;
        }

        Some(date)
    }

    /// Parse a raw currency token to a signed decimal amount.
    ///
    /// Integers without a decimal separator are rejected so reference
    /// numbers never masquerade as amounts.
    pub fn parse_currency_amount(&self, raw: &str) -> Option<Decimal> {
        let trimmed = raw.trim();

        let lower = trimmed.to_lowercase();
        let negative = (trimmed.starts_with('(') && trimmed.ends_with(')'))
            || trimmed.starts_with('-')
            || lower.contains("out")
            || lower.contains("debit");

        let cleaned: String = correct_digit_confusions(trimmed)
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
            .collect();

        if !cleaned.chars().any(|c| c.is_ascii_digit()) {
            return None;
        }

        let normalized = resolve_separators(&cleaned)?;
        if !AMOUNT_SHAPE.is_match(&normalized) {
            return None;
        }

        let amount = Decimal::from_str(&normalized).ok()?;
        if amount <= Decimal::ZERO || amount > self.max_amount {
            return None;
        }

        Some(if negative { -amount } else { amount })
    }
}

/// Rewrite comma/dot separators into a single decimal point.
///
/// With both present, the right-most symbol is the decimal point and the
/// other is a thousands separator. A lone comma is a decimal point only
/// when exactly 2 digits follow it.
fn resolve_separators(cleaned: &str) -> Option<String> {
    match (cleaned.contains(','), cleaned.contains('.')) {
        (true, true) => {
            let last_comma = cleaned.rfind(',')?;
            let last_dot = cleaned.rfind('.')?;
            if last_comma > last_dot {
                Some(cleaned.replace('.', "").replace(',', "."))
            } else {
                Some(cleaned.replace(',', ""))
            }
        }
        (true, false) => {
            let last_comma = cleaned.rfind(',')?;
            let decimals = &cleaned[last_comma + 1..];
            if decimals.len() == 2 && decimals.chars().all(|c| c.is_ascii_digit()) {
                Some(format!(
                    "{}.{}",
                    cleaned[..last_comma].replace(',', ""),
                    decimals
                ))
            } else {
                None
            }
        }
        (false, true) => {
            let last_dot = cleaned.rfind('.')?;
            Some(format!(
                "{}.{}",
                cleaned[..last_dot].replace('.', ""),
                &cleaned[last_dot + 1..]
            ))
        }
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn normalizer() -> TokenNormalizer {
        TokenNormalizer::new(&ExtractConfig::default())
            .with_reference_date(NaiveDate::from_ymd_opt(2025, 7, 5).unwrap())
    }

    #[test]
    fn test_date_round_trip() {
        let date = normalizer().normalize_date("05/07/2025").unwrap();
        assert_eq!(date.format("%d/%m/%Y").to_string(), "05/07/2025");
    }

    #[test]
    fn test_date_confusion_correction() {
        let date = normalizer().normalize_date("O5/O7/2O25").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 7, 5).unwrap());
    }

    #[test]
    fn test_date_separator_variants() {
        let n = normalizer();
        let expected = NaiveDate::from_ymd_opt(2025, 4, 18).unwrap();
        assert_eq!(n.normalize_date("18-04-2025"), Some(expected));
        assert_eq!(n.normalize_date("18.04.2025"), Some(expected));
    }

    #[test]
    fn test_date_two_digit_year() {
        let n = normalizer();
        assert_eq!(
            n.normalize_date("18/04/25"),
            NaiveDate::from_ymd_opt(2025, 4, 18)
        );
        assert_eq!(
            n.normalize_date("18/04/98"),
            NaiveDate::from_ymd_opt(1998, 4, 18)
        );
    }

    #[test]
    fn test_date_day_month_transposition() {
        // month 13 cannot be right; day slot holds a plausible month
        assert_eq!(
            normalizer().normalize_date("04/13/2025"),
            NaiveDate::from_ymd_opt(2025, 4, 13)
        );
    }

    #[test]
    fn test_date_rejects_impossible() {
        let n = normalizer();
        assert_eq!(n.normalize_date("30/02/2025"), None);
        assert_eq!(n.normalize_date("00/04/2025"), None);
        assert_eq!(n.normalize_date("18/04"), None);
        assert_eq!(n.normalize_date("18/04/2025/1"), None);
        assert_eq!(n.normalize_date("abc"), None);
    }

    #[test]
    fn test_date_rejects_far_future() {
        let n = normalizer();
        assert_eq!(n.normalize_date("05/07/2030"), None);
        // within the 2-year horizon
        assert!(n.normalize_date("05/07/2026").is_some());
    }

    #[test]
    fn test_currency_requires_decimals() {
        let n = normalizer();
        assert_eq!(n.parse_currency_amount("123"), None);
        assert_eq!(
            n.parse_currency_amount("123.45"),
            Some(Decimal::from_str("123.45").unwrap())
        );
    }

    #[test]
    fn test_currency_parentheses_negate() {
        assert_eq!(
            normalizer().parse_currency_amount("(123.45)"),
            Some(Decimal::from_str("-123.45").unwrap())
        );
    }

    #[test]
    fn test_currency_thousands_separator() {
        assert_eq!(
            normalizer().parse_currency_amount("1,234.56"),
            Some(Decimal::from_str("1234.56").unwrap())
        );
    }

    #[test]
    fn test_currency_comma_as_decimal() {
        let n = normalizer();
        assert_eq!(
            n.parse_currency_amount("12,34"),
            Some(Decimal::from_str("12.34").unwrap())
        );
        // three digits after a lone comma is a grouping comma, not a
        // decimal point; without decimals the token is rejected
        assert_eq!(n.parse_currency_amount("12,345"), None);
    }

    #[test]
    fn test_currency_symbol_and_words() {
        let n = normalizer();
        assert_eq!(
            n.parse_currency_amount("£320.50"),
            Some(Decimal::from_str("320.50").unwrap())
        );
        assert_eq!(
            n.parse_currency_amount("320.50 out"),
            Some(Decimal::from_str("-320.50").unwrap())
        );
    }

    #[test]
    fn test_currency_bounds() {
        let n = normalizer();
        assert_eq!(n.parse_currency_amount("0.00"), None);
        assert_eq!(n.parse_currency_amount("50001.00"), None);
        assert!(n.parse_currency_amount("50000.00").is_some());
    }

    #[test]
    fn test_currency_confusion_correction() {
        assert_eq!(
            normalizer().parse_currency_amount("32O.5O"),
            Some(Decimal::from_str("320.50").unwrap())
        );
    }

    #[test]
    fn test_correct_digit_confusions_leaves_words() {
        assert_eq!(correct_digit_confusions("Minibus Hire"), "Minibus Hire");
        assert_eq!(correct_digit_confusions("1O"), "10");
        assert_eq!(correct_digit_confusions("l5"), "15");
    }
}
