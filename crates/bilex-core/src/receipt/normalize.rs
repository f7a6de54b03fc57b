//! OCR text normalization.

use super::rules::patterns::{OCR_NOISE, WHITESPACE};

/// Turn raw OCR output into a canonical line sequence: split on line
/// breaks, trim, drop empty lines, collapse internal whitespace. Order
/// is preserved; receipts read top to bottom. Pure and total.
pub fn normalize_lines(raw_text: &str) -> Vec<String> {
    raw_text
        .lines()
        .map(|line| WHITESPACE.replace_all(line.trim(), " ").into_owned())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Scrub OCR artifacts from extracted text before it enters the
/// pipeline: collapse runs of spaces, keep single newlines, and drop
/// characters outside the recognizer's whitelist. Exposed for the upload
/// collaborator; the pipeline itself only requires `normalize_lines`.
pub fn clean_ocr_text(text: &str) -> String {
    let stripped = OCR_NOISE.replace_all(text, "");
    stripped
        .lines()
        .map(|line| WHITESPACE.replace_all(line.trim(), " ").into_owned())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_drops_empty_and_collapses() {
        let lines = normalize_lines("  Walmart  \n\n  Milk   3.99\n\t\n");
        assert_eq!(lines, vec!["Walmart", "Milk 3.99"]);
    }

    #[test]
    fn test_normalize_empty_input() {
        assert!(normalize_lines("").is_empty());
        assert!(normalize_lines("   \n \n").is_empty());
    }

    #[test]
    fn test_clean_strips_ocr_noise() {
        assert_eq!(
            clean_ocr_text("Caf\u{00e9}* Total:  $6.48\n\n\u{2605} bye"),
            "Caf Total: $6.48\nbye"
        );
    }
}
