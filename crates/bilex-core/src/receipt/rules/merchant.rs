//! Merchant name detection from the receipt header.

use crate::models::config::ExtractionConfig;

use super::patterns::SHORT_DATE;

/// Scan the first few lines for a plausible business name.
///
/// A candidate line must be of moderate length, not start with a digit,
/// carry no currency symbol, and not look like a date. The first line
/// that qualifies wins; receipts put the business name at the top.
pub fn detect_merchant(lines: &[String], config: &ExtractionConfig) -> String {
    for line in lines.iter().take(config.merchant_scan_lines) {
        let len = line.chars().count();
        if len < config.merchant_min_length || len > config.merchant_max_length {
            continue;
        }
        if line.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            continue;
        }
        if line.contains('$') || SHORT_DATE.is_match(line) {
            continue;
        }
        return line.clone();
    }

    "Unknown".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_header_line_wins() {
        let config = ExtractionConfig::default();
        assert_eq!(
            detect_merchant(&lines(&["Walmart", "123 Main St", "01/15/24"]), &config),
            "Walmart"
        );
    }

    #[test]
    fn test_skips_dates_digits_and_prices() {
        let config = ExtractionConfig::default();
        assert_eq!(
            detect_merchant(
                &lines(&["01/15/24 10:31", "$12.50", "Corner Cafe"]),
                &config
            ),
            "Corner Cafe"
        );
    }

    #[test]
    fn test_only_header_lines_scanned() {
        let config = ExtractionConfig::default();
        // Qualifying line sits below the scan window
        assert_eq!(
            detect_merchant(&lines(&["##", "##", "##", "Corner Cafe"]), &config),
            "Unknown"
        );
    }

    #[test]
    fn test_empty_input() {
        let config = ExtractionConfig::default();
        assert_eq!(detect_merchant(&[], &config), "Unknown");
    }
}
