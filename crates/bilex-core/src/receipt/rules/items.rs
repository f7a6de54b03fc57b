//! Line-item detection: priced purchase lines between the receipt header
//! and the totals block.

use rust_decimal::Decimal;

use crate::models::config::ExtractionConfig;
use crate::models::expense::ReceiptItem;

use super::amounts::amount_from_line;
use super::patterns::{LEADING_DATE, LEADING_TIME, MONEY_TOKEN, NUMBER_TOKEN, QUANTITY_TOKEN, WHITESPACE};

/// Receipt boilerplate vocabulary. A line containing any of these is
/// header or footer, never a purchased item.
const BOILERPLATE_KEYWORDS: &[&str] = &[
    "receipt",
    "invoice",
    "total",
    "subtotal",
    "tax",
    "discount",
    "payment",
    "cash",
    "credit",
    "debit",
    "change",
    "thank you",
    "date",
    "time",
    "cashier",
    "register",
    "transaction",
    "address",
    "phone",
    "visit",
    "welcome",
];

/// Whether a line is receipt boilerplate rather than a candidate item.
pub fn is_boilerplate(line: &str) -> bool {
    if line.chars().count() < 3 {
        return true;
    }
    if LEADING_DATE.is_match(line) || LEADING_TIME.is_match(line) {
        return true;
    }
    let lower = line.to_lowercase();
    BOILERPLATE_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Derive an item name from a line by stripping prices, stray numbers,
/// and quantity tokens. Returns `None` when fewer than two characters
/// survive the cleanup.
pub fn item_name_from_line(line: &str, config: &ExtractionConfig) -> Option<String> {
    let without_prices = MONEY_TOKEN.replace_all(line, "");
    let without_numbers = NUMBER_TOKEN.replace_all(&without_prices, "");
    let without_qty = QUANTITY_TOKEN.replace_all(&without_numbers, "");

    let name = WHITESPACE
        .replace_all(without_qty.trim(), " ")
        .trim_matches(|c| c == '-' || c == ' ')
        .to_string();

    (name.chars().count() >= config.min_item_name_length).then_some(name)
}

/// Detect purchased items: non-boilerplate lines whose amount is
/// meaningfully smaller than the receipt total.
///
/// When a priced line yields no usable name (common on receipts that put
/// the description above the price), the previous line is consulted
/// instead, but only if that line carries no amount of its own; two
/// priced lines are two items, not a name/price pair.
pub fn detect_items(
    lines: &[String],
    total_amount: Decimal,
    config: &ExtractionConfig,
) -> Vec<ReceiptItem> {
    let item_ceiling = total_amount * config.item_total_ratio;
    let mut items = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if is_boilerplate(line) {
            continue;
        }

        let Some(price) = amount_from_line(line, config.max_amount) else {
            continue;
        };
        if price >= item_ceiling {
            continue;
        }

        let mut name = item_name_from_line(line, config);

        let too_short = name
            .as_deref()
            .is_none_or(|n| n.chars().count() < 3);
        if too_short && i > 0 {
            let prev = &lines[i - 1];
            if amount_from_line(prev, config.max_amount).is_none() {
                if let Some(prev_name) = item_name_from_line(prev, config) {
                    name = Some(prev_name);
                }
            }
        }

        if let Some(name) = name {
            items.push(ReceiptItem { item: name, price });
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_boilerplate_filtering() {
        assert!(is_boilerplate("Subtotal 5.99"));
        assert!(is_boilerplate("THANK YOU FOR SHOPPING"));
        assert!(is_boilerplate("01/15/24 10:31"));
        assert!(is_boilerplate("10:31:05"));
        assert!(is_boilerplate("--"));
        assert!(!is_boilerplate("Milk 3.99"));
    }

    #[test]
    fn test_item_name_cleanup() {
        let config = ExtractionConfig::default();
        assert_eq!(
            item_name_from_line("Milk 3.99", &config),
            Some("Milk".to_string())
        );
        assert_eq!(
            item_name_from_line("2 x Soda $1.50 ea", &config),
            Some("x Soda".to_string())
        );
        assert_eq!(item_name_from_line("- 3.99 -", &config), None);
    }

    #[test]
    fn test_items_below_total_ratio() {
        let config = ExtractionConfig::default();
        let items = detect_items(
            &lines(&["Milk 3.99", "Bread 2.49", "Total $6.48"]),
            Decimal::new(648, 2),
            &config,
        );
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].item, "Milk");
        assert_eq!(items[0].price, Decimal::new(399, 2));
        assert_eq!(items[1].item, "Bread");
    }

    #[test]
    fn test_price_near_total_rejected() {
        let config = ExtractionConfig::default();
        // 6.00 is above 80% of 6.48, likely a re-printed total
        let items = detect_items(&lines(&["Combo 6.00"]), Decimal::new(648, 2), &config);
        assert!(items.is_empty());
    }

    #[test]
    fn test_name_rescued_from_previous_line() {
        let config = ExtractionConfig::default();
        let items = detect_items(
            &lines(&["Organic Apples", "4.25"]),
            Decimal::new(1000, 2),
            &config,
        );
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item, "Organic Apples");
    }

    #[test]
    fn test_no_rescue_from_priced_previous_line() {
        let config = ExtractionConfig::default();
        // Previous line has its own price, so it cannot name this one
        let items = detect_items(
            &lines(&["Milk 3.99", "2.49"]),
            Decimal::new(1000, 2),
            &config,
        );
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item, "Milk");
    }

    #[test]
    fn test_zero_total_yields_no_items() {
        let config = ExtractionConfig::default();
        let items = detect_items(&lines(&["Milk 3.99"]), Decimal::ZERO, &config);
        assert!(items.is_empty());
    }
}
