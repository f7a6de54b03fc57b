//! The validation/sanitization boundary.
//!
//! `Sanitizer::sanitize` coerces an arbitrary candidate payload into a
//! canonical `ExpenseDraft`. It is pure and total: invalid enums become
//! `Other`, a bad date becomes the processing date, malformed line items
//! are dropped silently. Nothing downstream ever sees an un-sanitized
//! field. This coercion is load-bearing for the no-error-ever contract;
//! do not turn it into validation errors.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::models::expense::{Category, ExpenseDraft, PaymentMethod, ReceiptItem};

/// Sanitizer with an injectable processing date, so tests stay
/// deterministic while production uses today.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    today: NaiveDate,
}

impl Sanitizer {
    pub fn new() -> Self {
        Self {
            today: Utc::now().date_naive(),
        }
    }

    /// Override the processing date used for date defaults.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// The processing date drafts are stamped with when the payload
    /// carries no parseable date.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Coerce any candidate payload into a canonical draft.
    pub fn sanitize(&self, payload: &Value, raw_text: &str) -> ExpenseDraft {
        let amount = coerce_amount(payload.get("amount"));

        ExpenseDraft {
            title: non_empty_string(payload.get("title"))
                .unwrap_or_else(|| "Processed Expense".to_string()),
            amount,
            category: payload
                .get("category")
                .and_then(Value::as_str)
                .and_then(Category::parse)
                .unwrap_or(Category::Other),
            date: payload
                .get("date")
                .and_then(Value::as_str)
                .and_then(parse_date)
                .unwrap_or(self.today),
            description: non_empty_string(payload.get("description"))
                .unwrap_or_else(|| excerpt(raw_text, 200)),
            merchant: non_empty_string(payload.get("merchant"))
                .unwrap_or_else(|| "Unknown".to_string()),
            payment_method: payload
                .get("paymentMethod")
                .and_then(Value::as_str)
                .and_then(PaymentMethod::parse)
                .unwrap_or(PaymentMethod::Other),
            summary: non_empty_string(payload.get("summary")).unwrap_or_else(|| {
                format!(
                    "Expense processed from receipt. Amount: ${}",
                    money(amount)
                )
            }),
            line_items: coerce_line_items(payload.get("lineItems")),
        }
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Coerce an amount field: non-negative numbers pass through, strings
/// are stripped to digits and dots then parsed, anything else is zero.
/// Drafts guarantee `amount >= 0`, so negatives clamp to zero.
fn coerce_amount(value: Option<&Value>) -> Decimal {
    match value {
        Some(Value::Number(n)) => n
            .to_string()
            .parse()
            .map(|d: Decimal| d.max(Decimal::ZERO))
            .unwrap_or(Decimal::ZERO),
        Some(Value::String(s)) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            cleaned.parse().unwrap_or(Decimal::ZERO)
        }
        _ => Decimal::ZERO,
    }
}

/// Keep entries that are structurally `{item: non-empty string, price:
/// non-negative number-like}`; drop the rest without erroring.
fn coerce_line_items(value: Option<&Value>) -> Vec<ReceiptItem> {
    let Some(Value::Array(entries)) = value else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let item = entry.get("item")?.as_str()?.trim();
            if item.is_empty() {
                return None;
            }
            let price: Decimal = match entry.get("price")? {
                Value::Number(n) => n.to_string().parse().ok()?,
                Value::String(s) => s.parse().ok()?,
                _ => return None,
            };
            if price < Decimal::ZERO {
                return None;
            }
            Some(ReceiptItem {
                item: item.to_string(),
                price,
            })
        })
        .collect()
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Accept ISO dates, with or without a trailing time component.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let prefix: String = s.chars().take(10).collect();
    NaiveDate::parse_from_str(&prefix, "%Y-%m-%d").ok()
}

/// Char-safe prefix of the raw text for fallback descriptions.
pub(crate) fn excerpt(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Two-decimal money rendering for summaries.
pub(crate) fn money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}
