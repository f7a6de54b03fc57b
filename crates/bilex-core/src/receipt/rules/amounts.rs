//! Monetary amount extraction from receipt lines.

use rust_decimal::Decimal;

use super::patterns::{
    BARE_EVEN_DOLLARS, BARE_WITH_CENTS, NUMERIC_TOKEN, PRICE_WHOLE, PRICE_WITH_CENTS,
};

/// Extract a monetary amount from a single line.
///
/// Patterns are tried in order: `$D.DD`, bare `D.DD`, `$D`, `D.00`.
/// Currency-tagged forms go first so bare quantities ("2 x 3.99") do not
/// shadow an explicit price. The `$D.DD` form takes its first two cents
/// digits even when more digits follow; the other forms require a digit
/// boundary. A match only counts when the value falls in
/// `(0, max_amount)`.
pub fn amount_from_line(line: &str, max_amount: Decimal) -> Option<Decimal> {
    let candidates = [
        first_capture(&PRICE_WITH_CENTS, line, false),
        first_capture(&BARE_WITH_CENTS, line, true),
        first_capture(&PRICE_WHOLE, line, true),
        first_capture(&BARE_EVEN_DOLLARS, line, true),
    ];

    for candidate in candidates.into_iter().flatten() {
        if let Ok(amount) = candidate.parse::<Decimal>() {
            if amount > Decimal::ZERO && amount < max_amount {
                return Some(amount);
            }
        }
    }

    None
}

/// First capture of `re` in `line`. With `digit_boundary` set, a match
/// immediately followed by another digit is skipped, emulating the
/// `(?!\d)` lookahead the regex crate lacks.
fn first_capture<'a>(re: &regex::Regex, line: &'a str, digit_boundary: bool) -> Option<&'a str> {
    for caps in re.captures_iter(line) {
        let full = caps.get(0)?;
        if digit_boundary {
            let next = line[full.end()..].chars().next();
            if next.is_some_and(|c| c.is_ascii_digit()) {
                continue;
            }
        }
        return caps.get(1).map(|m| m.as_str());
    }
    None
}

/// Largest extractable amount across all lines, or zero. Used when no
/// total keyword yields an amount: the total is typically the largest
/// figure on a receipt.
pub fn max_amount_in_lines(lines: &[String], max_amount: Decimal) -> Decimal {
    lines
        .iter()
        .filter_map(|line| amount_from_line(line, max_amount))
        .max()
        .unwrap_or(Decimal::ZERO)
}

/// Largest bare numeric token anywhere in the text, or zero. This is the
/// minimal-default tier's last resort and deliberately skips the price
/// pattern ladder and range check.
pub fn largest_numeric_token(text: &str) -> Decimal {
    NUMERIC_TOKEN
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<Decimal>().ok())
        .max()
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ceiling() -> Decimal {
        Decimal::new(10_000, 0)
    }

    #[test]
    fn test_dollar_price_with_cents() {
        assert_eq!(
            amount_from_line("Total $6.48", ceiling()),
            Some(Decimal::new(648, 2))
        );
    }

    #[test]
    fn test_bare_price_with_cents() {
        assert_eq!(
            amount_from_line("Milk 3.99", ceiling()),
            Some(Decimal::new(399, 2))
        );
    }

    #[test]
    fn test_whole_dollar_price() {
        assert_eq!(
            amount_from_line("Cover charge $15", ceiling()),
            Some(Decimal::new(15, 0))
        );
    }

    #[test]
    fn test_tagged_price_beats_bare_number() {
        // The quantity 2 must not shadow the explicit price
        assert_eq!(
            amount_from_line("2 x Soda $1.50", ceiling()),
            Some(Decimal::new(150, 2))
        );
    }

    #[test]
    fn test_dollar_cents_keeps_first_two_cent_digits() {
        // OCR-garbled trailing digit after a $-tagged price must not
        // demote the match to the whole-dollar pattern
        assert_eq!(
            amount_from_line("Total $6.489", ceiling()),
            Some(Decimal::new(648, 2))
        );
    }

    #[test]
    fn test_digit_boundary_rejected() {
        // 3.995 is not a D.DD price; no other pattern applies either
        // since $-prefixed and .00 forms are absent
        assert_eq!(amount_from_line("SKU 3.995", ceiling()), None);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(amount_from_line("Serial 99999.00", ceiling()), None);
        assert_eq!(amount_from_line("nothing here", ceiling()), None);
    }

    #[test]
    fn test_max_amount_in_lines() {
        let lines: Vec<String> = ["Milk 3.99", "Bread 2.49", "6.48"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(max_amount_in_lines(&lines, ceiling()), Decimal::new(648, 2));
    }

    #[test]
    fn test_largest_numeric_token() {
        assert_eq!(
            largest_numeric_token("ref 42 total 128.5 thanks"),
            Decimal::new(1285, 1)
        );
        assert_eq!(largest_numeric_token("no digits"), Decimal::ZERO);
    }
}
