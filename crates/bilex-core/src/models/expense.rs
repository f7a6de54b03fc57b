//! Expense draft models produced by the extraction pipeline.
//!
//! `ExpenseDraft` serializes with the wire field names the record store
//! expects (`paymentMethod`, `lineItems`), which are also the names the
//! generative backend is prompted to emit. One schema both ways.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Expense category. Closed enumeration; anything outside it is coerced
/// to `Other` at the sanitization boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transportation,
    Utilities,
    Healthcare,
    Entertainment,
    Shopping,
    Education,
    #[default]
    Other,
}

impl Category {
    /// Parse a category from its wire name. Returns `None` for anything
    /// outside the closed set.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Food" => Some(Category::Food),
            "Transportation" => Some(Category::Transportation),
            "Utilities" => Some(Category::Utilities),
            "Healthcare" => Some(Category::Healthcare),
            "Entertainment" => Some(Category::Entertainment),
            "Shopping" => Some(Category::Shopping),
            "Education" => Some(Category::Education),
            "Other" => Some(Category::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transportation => "Transportation",
            Category::Utilities => "Utilities",
            Category::Healthcare => "Healthcare",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Education => "Education",
            Category::Other => "Other",
        }
    }
}

/// Payment method. Wire names contain spaces ("Credit Card") to match
/// the record-store schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Debit Card")]
    DebitCard,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    #[default]
    Other,
}

impl PaymentMethod {
    /// Parse a payment method from its wire name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Cash" => Some(PaymentMethod::Cash),
            "Credit Card" => Some(PaymentMethod::CreditCard),
            "Debit Card" => Some(PaymentMethod::DebitCard),
            "Bank Transfer" => Some(PaymentMethod::BankTransfer),
            "Other" => Some(PaymentMethod::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Other => "Other",
        }
    }
}

/// A single purchased item detected on the receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptItem {
    /// Item name with prices and quantity tokens stripped.
    pub item: String,

    /// Item price. Always strictly below 80% of the receipt total.
    pub price: Decimal,
}

/// Deterministic, pattern-based estimate computed without any generative
/// backend. This is the anchor the AI tier is never allowed to override.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicGuess {
    /// Best-effort receipt total. Zero when no amount was found.
    pub total_amount: Decimal,

    /// Merchant name from the receipt header, or "Unknown".
    pub merchant: String,

    /// Detected line items, top-to-bottom order.
    pub line_items: Vec<ReceiptItem>,
}

impl Default for HeuristicGuess {
    fn default() -> Self {
        Self {
            total_amount: Decimal::ZERO,
            merchant: "Unknown".to_string(),
            line_items: Vec::new(),
        }
    }
}

impl HeuristicGuess {
    /// Whether a non-zero total was detected.
    pub fn has_total(&self) -> bool {
        self.total_amount > Decimal::ZERO
    }
}

/// The canonical, fully-sanitized output record of the pipeline.
///
/// Every field has passed through the sanitization boundary: enums are
/// closed, the amount is non-negative, the date is a valid calendar date,
/// and no string field is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDraft {
    pub title: String,
    pub amount: Decimal,
    pub category: Category,
    pub date: NaiveDate,
    pub description: String,
    pub merchant: String,
    pub payment_method: PaymentMethod,
    pub summary: String,
    pub line_items: Vec<ReceiptItem>,
}

/// Fallback tier that produced a draft, recorded for quality triage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Backend completion parsed and sanitized, amounts anchored.
    Ai,
    /// Built directly from the heuristic guess.
    Heuristic,
    /// Input too short to run heuristics meaningfully.
    Minimal,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Ai => "ai",
            Tier::Heuristic => "heuristic",
            Tier::Minimal => "minimal",
        }
    }
}

/// Final pipeline output: a draft plus its provenance tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction {
    pub draft: ExpenseDraft,
    pub tier: Tier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_closed_set() {
        assert_eq!(Category::parse("Food"), Some(Category::Food));
        assert_eq!(Category::parse("Education"), Some(Category::Education));
        assert_eq!(Category::parse("Cats"), None);
        assert_eq!(Category::parse("food"), None);
        assert_eq!(Category::parse(""), None);
    }

    #[test]
    fn test_payment_method_wire_names() {
        assert_eq!(
            PaymentMethod::parse("Credit Card"),
            Some(PaymentMethod::CreditCard)
        );
        assert_eq!(
            PaymentMethod::parse("Bank Transfer"),
            Some(PaymentMethod::BankTransfer)
        );
        assert_eq!(PaymentMethod::parse("CreditCard"), None);
    }

    #[test]
    fn test_draft_serializes_wire_field_names() {
        let draft = ExpenseDraft {
            title: "Groceries".to_string(),
            amount: Decimal::new(648, 2),
            category: Category::Food,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            description: "Milk $3.99".to_string(),
            merchant: "Walmart".to_string(),
            payment_method: PaymentMethod::CreditCard,
            summary: "Groceries at Walmart".to_string(),
            line_items: vec![ReceiptItem {
                item: "Milk".to_string(),
                price: Decimal::new(399, 2),
            }],
        };

        let value = serde_json::to_value(&draft).unwrap();
        assert!(value.get("paymentMethod").is_some());
        assert!(value.get("lineItems").is_some());
        assert_eq!(value["paymentMethod"], "Credit Card");
        assert_eq!(value["date"], "2024-01-15");
    }
}
