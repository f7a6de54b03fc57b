//! Common regex patterns for receipt text extraction.
//!
//! The `regex` crate has no lookahead, so patterns that the rules apply
//! with a "not followed by another digit" condition are paired with a
//! boundary check at the call site (see `rules::amounts`).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Price patterns, tried most-specific first
    pub static ref PRICE_WITH_CENTS: Regex = Regex::new(
        r"\$(\d+\.\d{2})"
    ).unwrap();

    pub static ref BARE_WITH_CENTS: Regex = Regex::new(
        r"(\d+\.\d{2})"
    ).unwrap();

    pub static ref PRICE_WHOLE: Regex = Regex::new(
        r"\$(\d+)"
    ).unwrap();

    pub static ref BARE_EVEN_DOLLARS: Regex = Regex::new(
        r"(\d+\.00)"
    ).unwrap();

    // Any numeric token, used by the minimal-default tier
    pub static ref NUMERIC_TOKEN: Regex = Regex::new(
        r"\d+(?:\.\d+)?"
    ).unwrap();

    // Date and time markers for header/footer filtering
    pub static ref SHORT_DATE: Regex = Regex::new(
        r"\d{2}/\d{2}"
    ).unwrap();

    pub static ref LEADING_DATE: Regex = Regex::new(
        r"^\d{2}/\d{2}"
    ).unwrap();

    pub static ref LEADING_TIME: Regex = Regex::new(
        r"^\d{2}:\d{2}"
    ).unwrap();

    // Item-name cleanup
    pub static ref MONEY_TOKEN: Regex = Regex::new(
        r"\$?\d+\.\d{2}"
    ).unwrap();

    pub static ref NUMBER_TOKEN: Regex = Regex::new(
        r"\$?\d+"
    ).unwrap();

    pub static ref QUANTITY_TOKEN: Regex = Regex::new(
        r"(?i)\b(?:qty|quantity|each|ea|x\d+)\b"
    ).unwrap();

    pub static ref WHITESPACE: Regex = Regex::new(
        r"\s+"
    ).unwrap();

    // Trailing commas before a closing brace/bracket, a common defect in
    // generative completions
    pub static ref TRAILING_COMMA: Regex = Regex::new(
        r",\s*([}\]])"
    ).unwrap();

    // OCR noise: anything outside the recognizer's ASCII whitelist
    pub static ref OCR_NOISE: Regex = Regex::new(
        r"[^A-Za-z0-9_\s.,:$()/\n-]"
    ).unwrap();
}
