//! Keyword-based category inference for the heuristic tier.
//!
//! The AI tier never goes through here; its category comes from the
//! backend and is only coerced at the sanitization boundary.

use crate::models::config::CategoryRule;
use crate::models::expense::Category;

/// Infer a category by matching rule keywords against the merchant name
/// first, then the full receipt text. First matching rule wins; no match
/// means `Other`.
pub fn infer_category(merchant: &str, raw_text: &str, rules: &[CategoryRule]) -> Category {
    let merchant = merchant.to_lowercase();
    let text = raw_text.to_lowercase();

    for rule in rules {
        if rule.keywords.iter().any(|k| merchant.contains(k.as_str())) {
            return rule.category;
        }
    }
    for rule in rules {
        if rule.keywords.iter().any(|k| text.contains(k.as_str())) {
            return rule.category;
        }
    }

    Category::Other
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::ExtractionConfig;

    #[test]
    fn test_merchant_keyword_match() {
        let rules = ExtractionConfig::default().category_rules;
        assert_eq!(
            infer_category("Corner Cafe", "", &rules),
            Category::Food
        );
        assert_eq!(
            infer_category("Shell Station", "", &rules),
            Category::Transportation
        );
    }

    #[test]
    fn test_merchant_beats_body_text() {
        let rules = ExtractionConfig::default().category_rules;
        // Merchant says pharmacy even though the body mentions coffee
        assert_eq!(
            infer_category("City Pharmacy", "coffee mug 4.99", &rules),
            Category::Healthcare
        );
    }

    #[test]
    fn test_body_text_fallback() {
        let rules = ExtractionConfig::default().category_rules;
        assert_eq!(
            infer_category("Unknown", "movie ticket 12.00", &rules),
            Category::Entertainment
        );
    }

    #[test]
    fn test_no_match_is_other() {
        let rules = ExtractionConfig::default().category_rules;
        assert_eq!(infer_category("Unknown", "misc 1.00", &rules), Category::Other);
    }
}
