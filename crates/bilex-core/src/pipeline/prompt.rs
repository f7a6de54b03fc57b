//! Prompt construction for the generative backend.
//!
//! The prompt anchors the backend to deterministic facts: the heuristic
//! total and line items are embedded verbatim and the backend is told to
//! repeat them. Its free-form judgment is only wanted for the
//! qualitative fields (title, category, merchant framing, summary,
//! payment method).

use rust_decimal::Decimal;

use crate::models::expense::{ExpenseDraft, HeuristicGuess};

/// Build the extraction prompt. Deterministic template, no branching
/// beyond substitution.
pub fn build_prompt(raw_text: &str, guess: &HeuristicGuess) -> String {
    let items_json =
        serde_json::to_string(&guess.line_items).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"You are an assistant specialized in analyzing receipts and bills. Analyze the following receipt text and extract structured information in JSON format.

Receipt text:
"{raw_text}"

Anchored facts from deterministic preprocessing:
- Detected total amount: ${total}
- Line items found: {item_count}
- Items: {items_json}

Respond with a JSON object with exactly this structure:
{{
  "title": "Brief description of the expense",
  "amount": {total},
  "category": "Food|Transportation|Utilities|Healthcare|Entertainment|Shopping|Education|Other",
  "date": "YYYY-MM-DD (extract from receipt, use today if not found)",
  "description": "List of the main items purchased",
  "merchant": "Business name from the receipt header",
  "paymentMethod": "Cash|Credit Card|Debit Card|Bank Transfer|Other",
  "summary": "Natural language summary with merchant, total amount, and main items",
  "lineItems": {items_json}
}}

Rules:
1. You MUST use the detected total amount ({total}) as the amount field
2. Choose category from the listed values based on merchant type and items
3. Choose paymentMethod from the listed values
4. Respond ONLY with valid JSON, no additional text"#,
        raw_text = raw_text,
        total = guess.total_amount,
        item_count = guess.line_items.len(),
        items_json = items_json,
    )
}

/// Prompt asking the backend to name one category for a free-text
/// description. The reply is expected to be a bare category name.
pub fn build_category_prompt(description: &str, amount: Decimal) -> String {
    format!(
        r#"Categorize this expense into one of these categories: Food, Transportation, Utilities, Healthcare, Entertainment, Shopping, Education, Other

Description: "{description}"
Amount: {amount}

Respond with only the category name."#
    )
}

/// Prompt asking the backend for a prose spending summary over a set of
/// drafted expenses.
pub fn build_summary_prompt(expenses: &[ExpenseDraft]) -> String {
    let listing = expenses
        .iter()
        .map(|e| format!("{}: ${} - {}", e.category.as_str(), e.amount, e.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Generate a concise monthly expense summary based on these transactions:

{listing}

Provide insights about spending patterns, top categories, and suggestions for budgeting.
Keep it under 200 words."#
    )
}
