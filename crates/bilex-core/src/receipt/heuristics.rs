//! Heuristic extraction: a best-effort structured guess derived from
//! pattern rules alone, independent of any generative backend.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::expense::HeuristicGuess;

use super::rules::{amount_from_line, detect_items, detect_merchant, max_amount_in_lines};

/// Keywords that anchor the receipt total.
const TOTAL_KEYWORDS: &[&str] = &["total", "amount due", "balance", "grand total"];

/// Compute a heuristic guess from normalized lines.
///
/// This function never fails; the worst case is a zero total, "Unknown"
/// merchant, and no items.
pub fn extract_guess(lines: &[String], config: &ExtractionConfig) -> HeuristicGuess {
    let merchant = detect_merchant(lines, config);
    let total_amount = detect_total(lines, config);
    let line_items = detect_items(lines, total_amount, config);

    debug!(
        "Heuristic guess: merchant={:?} total={} items={}",
        merchant,
        total_amount,
        line_items.len()
    );

    HeuristicGuess {
        total_amount,
        merchant,
        line_items,
    }
}

/// Find the receipt total.
///
/// Scans for a total keyword and tries to pull an amount from the same
/// line, then the next, then the previous; receipts commonly put the
/// figure on an adjacent line. The first keyword line that yields an
/// amount wins. Without any keyword hit, the largest amount on the
/// receipt stands in for the total.
fn detect_total(lines: &[String], config: &ExtractionConfig) -> Decimal {
    for (i, line) in lines.iter().enumerate() {
        let lower = line.to_lowercase();
        if !TOTAL_KEYWORDS.iter().any(|k| lower.contains(k)) {
            continue;
        }
        debug!("Found total keyword line: {:?}", line);

        if let Some(amount) = amount_from_line(line, config.max_amount) {
            return amount;
        }
        if let Some(next) = lines.get(i + 1) {
            if let Some(amount) = amount_from_line(next, config.max_amount) {
                return amount;
            }
        }
        if i > 0 {
            if let Some(amount) = amount_from_line(&lines[i - 1], config.max_amount) {
                return amount;
            }
        }
    }

    max_amount_in_lines(lines, config.max_amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_walmart_receipt() {
        let config = ExtractionConfig::default();
        let guess = extract_guess(
            &lines(&["Walmart", "Milk 3.99", "Bread 2.49", "Total $6.48"]),
            &config,
        );

        assert_eq!(guess.total_amount, Decimal::new(648, 2));
        assert_eq!(guess.merchant, "Walmart");
        assert_eq!(guess.line_items.len(), 2);
        assert_eq!(guess.line_items[0].item, "Milk");
        assert_eq!(guess.line_items[0].price, Decimal::new(399, 2));
        assert_eq!(guess.line_items[1].item, "Bread");
        assert_eq!(guess.line_items[1].price, Decimal::new(249, 2));
    }

    #[test]
    fn test_total_on_next_line() {
        let config = ExtractionConfig::default();
        let guess = extract_guess(&lines(&["Corner Cafe", "Amount Due", "$12.50"]), &config);
        assert_eq!(guess.total_amount, Decimal::new(1250, 2));
    }

    #[test]
    fn test_total_on_previous_line() {
        let config = ExtractionConfig::default();
        let guess = extract_guess(&lines(&["Corner Cafe", "$12.50", "Grand Total"]), &config);
        assert_eq!(guess.total_amount, Decimal::new(1250, 2));
    }

    #[test]
    fn test_largest_amount_fallback() {
        let config = ExtractionConfig::default();
        // No total keyword anywhere; the largest figure stands in
        let guess = extract_guess(&lines(&["Corner Cafe", "Milk 3.99", "9.48"]), &config);
        assert_eq!(guess.total_amount, Decimal::new(948, 2));
    }

    #[test]
    fn test_text_without_digits() {
        let config = ExtractionConfig::default();
        let guess = extract_guess(&lines(&["random", "unrelated", "text"]), &config);
        assert_eq!(guess.total_amount, Decimal::ZERO);
        assert_eq!(guess.merchant, "random");
        assert!(guess.line_items.is_empty());
    }

    #[test]
    fn test_never_fails_on_empty() {
        let config = ExtractionConfig::default();
        let guess = extract_guess(&[], &config);
        assert_eq!(guess, HeuristicGuess::default());
    }
}
