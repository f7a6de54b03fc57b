//! Parsing and repair of backend completions.
//!
//! Generative backends answer in prose around the payload more often
//! than not: markdown fences, "Here is the JSON you asked for", trailing
//! commas. This stage cuts the outermost brace region out of the
//! completion, repairs the common defects, and insists on a JSON object.

use serde_json::Value;
use tracing::debug;

use crate::error::ParseFailure;
use crate::models::expense::HeuristicGuess;
use crate::receipt::rules::patterns::TRAILING_COMMA;

/// Extract a structured payload from a free-form completion.
pub fn parse_completion(completion: &str) -> Result<Value, ParseFailure> {
    let start = completion.find('{');
    let end = completion.rfind('}');

    let (start, end) = match (start, end) {
        (Some(s), Some(e)) if s < e => (s, e),
        _ => {
            return Err(ParseFailure::NoJson {
                raw: completion.to_string(),
            });
        }
    };

    let region = &completion[start..=end];
    let repaired = TRAILING_COMMA.replace_all(region, "$1");

    debug!("Parsing {} char JSON region from completion", repaired.len());

    let value: Value =
        serde_json::from_str(&repaired).map_err(|e| ParseFailure::Malformed {
            reason: e.to_string(),
            raw: completion.to_string(),
        })?;

    if !value.is_object() {
        return Err(ParseFailure::Malformed {
            reason: "payload is not a JSON object".to_string(),
            raw: completion.to_string(),
        });
    }

    Ok(value)
}

/// Overwrite the payload's monetary fields with the heuristic guess.
///
/// The backend's amount and itemization judgment is discarded without
/// inspection; the heuristic total comes from explicit numeric patterns
/// and is the single source of truth for money.
pub fn anchor_heuristics(payload: &mut Value, guess: &HeuristicGuess) {
    if let Some(object) = payload.as_object_mut() {
        object.insert(
            "amount".to_string(),
            serde_json::to_value(guess.total_amount).unwrap_or(Value::Null),
        );
        object.insert(
            "lineItems".to_string(),
            serde_json::to_value(&guess.line_items).unwrap_or(Value::Array(Vec::new())),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::expense::ReceiptItem;
    use rust_decimal::Decimal;

    #[test]
    fn test_plain_json_object() {
        let value = parse_completion(r#"{"title": "Lunch", "amount": 12.5}"#).unwrap();
        assert_eq!(value["title"], "Lunch");
    }

    #[test]
    fn test_json_inside_markdown_fence() {
        let completion = "Here is the result:\n```json\n{\"title\": \"Lunch\"}\n```\nDone.";
        let value = parse_completion(completion).unwrap();
        assert_eq!(value["title"], "Lunch");
    }

    #[test]
    fn test_trailing_commas_repaired() {
        let completion = r#"{"title": "Lunch", "lineItems": [{"item": "Soup", "price": 4.5},],}"#;
        let value = parse_completion(completion).unwrap();
        assert_eq!(value["lineItems"][0]["item"], "Soup");
    }

    #[test]
    fn test_prose_without_braces_fails() {
        let err = parse_completion("I could not find any receipt data.").unwrap_err();
        assert!(matches!(err, ParseFailure::NoJson { .. }));
    }

    #[test]
    fn test_garbage_braces_fail() {
        let err = parse_completion("{this is not json}").unwrap_err();
        assert!(matches!(err, ParseFailure::Malformed { .. }));
        assert_eq!(err.raw(), "{this is not json}");
    }

    #[test]
    fn test_anchor_overwrites_amount_and_items() {
        let mut payload =
            parse_completion(r#"{"amount": 999, "lineItems": [{"item": "Lie", "price": 999}]}"#)
                .unwrap();
        let guess = HeuristicGuess {
            total_amount: Decimal::new(1250, 2),
            merchant: "Cafe".to_string(),
            line_items: vec![ReceiptItem {
                item: "Soup".to_string(),
                price: Decimal::new(450, 2),
            }],
        };

        anchor_heuristics(&mut payload, &guess);

        assert_eq!(payload["amount"], serde_json::json!("12.50"));
        assert_eq!(payload["lineItems"][0]["item"], "Soup");
        assert_eq!(payload["lineItems"].as_array().unwrap().len(), 1);
    }
}
