//! Display-price parsing.
//!
//! Retailers format prices with currency symbols, thousands separators in
//! either western (`1,299,999`) or Indian (`12,99,999`) grouping, and the
//! occasional trailing text. Parsing uses manual character scanning rather
//! than `regex`.

/// Extracts the numeric value from a display price such as `"₹1,29,999"`.
///
/// Rules:
/// - Leading text up to the first digit is skipped.
/// - Commas and whitespace between digits are treated as grouping.
/// - A single `.` followed by digits starts the fractional part.
/// - Scanning stops at the first other character.
///
/// Returns `None` for empty input, `"N/A"`, or text without digits.
#[must_use]
pub fn parse_price(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n/a") {
        return None;
    }

    let start = trimmed.find(|c: char| c.is_ascii_digit())?;
    let mut digits = String::new();
    let mut seen_point = false;
    let mut chars = trimmed[start..].chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '0'..='9' => digits.push(c),
            ',' | ' ' | '\u{a0}' if !seen_point => {
                // Grouping only counts when more digits follow.
                if !chars.peek().is_some_and(char::is_ascii_digit) {
                    break;
                }
            }
            '.' if !seen_point && chars.peek().is_some_and(char::is_ascii_digit) => {
                seen_point = true;
                digits.push('.');
            }
            _ => break,
        }
    }

    digits.parse::<f64>().ok().filter(|n| n.is_finite())
}
