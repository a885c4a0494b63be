use rust_decimal::Decimal;
use std::str::FromStr;

const CURRENCY_GLYPHS: &[char] = &['₪', '$', '€', '£'];

/// Parse a monetary string from a statement into a signed Decimal.
///
/// Handles formats like:
/// - "1,234.56" -> 1234.56
/// - "(1,234.56)" -> -1234.56
/// - "-1,234.56" -> -1234.56
/// - "1,234.56-" -> -1234.56 (trailing minus)
/// - "+500" -> 500
/// - "₪ 1,234.56" -> 1234.56
///
/// Returns None for empty input or text that is not a number even after
/// stripping stray characters.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let s = s.trim().replace(CURRENCY_GLYPHS, "");
    let s = s.trim();

    let (negative, body) = if let Some(inner) = s.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        (true, inner)
    } else if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_suffix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    };

    let body = body.replace(',', "");
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let value = match Decimal::from_str(body) {
        Ok(v) => v,
        Err(_) => {
            let cleaned: String = body
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            if cleaned.is_empty() {
                return None;
            }
            Decimal::from_str(&cleaned).ok()?
        }
    };

    Some(if negative { -value } else { value })
}

/// Parse a debit or credit table cell. Empty cells mean zero.
pub fn parse_cell_amount(s: &str) -> Option<Decimal> {
    if s.trim().is_empty() {
        return Some(Decimal::ZERO);
    }
    parse_amount(s)
}
