//! Compiled regex patterns for token and line matching.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Loose date token: 1-2 digit day and month, 2 or 4 digit year,
    // any of the common separators.
    pub static ref DATE_TOKEN: Regex = Regex::new(
        r"\b\d{1,2}[./\-]\d{1,2}[./\-]\d{2,4}\b"
    ).unwrap();

    // A fragment that is a currency amount: optional symbol, optional
    // thousands grouping, mandatory 2-digit decimals, optional parentheses.
    pub static ref CURRENCY_TOKEN: Regex = Regex::new(
        r"^\(?-?\s*[£$€]?\s?\d{1,3}(?:[,\s]?\d{3})*[.,]\d{2}\)?$"
    ).unwrap();

    // Final shape every accepted amount must have after separator
    // resolution: 1-6 integer digits, a dot, exactly 2 decimals.
    pub static ref AMOUNT_SHAPE: Regex = Regex::new(
        r"^\d{1,6}\.\d{2}$"
    ).unwrap();

    // Fallback line shapes for plain-text scanning.
    // date, description, trailing amount, optional direction marker
    pub static ref LINE_DATE_DESC_AMOUNT: Regex = Regex::new(
        r"(?i)^(\d{1,2}[./\-]\d{1,2}[./\-]\d{2,4})\s+(.{3,}?)\s+\(?(-?[£$€]?\d{1,3}(?:[,\s]?\d{3})*[.,]\d{2})\)?\s*(CR|DR|IN|OUT)?\s*$"
    ).unwrap();

    // date, amount, trailing description
    pub static ref LINE_DATE_AMOUNT_DESC: Regex = Regex::new(
        r"(?i)^(\d{1,2}[./\-]\d{1,2}[./\-]\d{2,4})\s+\(?(-?[£$€]?\d{1,3}(?:[,\s]?\d{3})*[.,]\d{2})\)?\s+(.{3,})$"
    ).unwrap();
}
