//! Quoting helpers
//!
//! Every user-supplied value passes through one of these before it is
//! embedded into a predicate.

use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Escape a value for use inside a single-quoted SQL literal.
///
/// Only `'` is doubled; backslashes are literal in standard-conforming
/// strings. The surrounding quotes are not added.
pub fn quote_string(value: &str) -> String {
    value.replace('\'', "''")
}

/// Parenthesized, quoted list for IN clauses: `('a', 'b')`.
///
/// Returns an empty string for an empty list.
pub fn collection(values: &[&str]) -> String {
    if values.is_empty() {
        return String::new();
    }

    let items = values
        .iter()
        .map(|value| format!("'{}'", quote_string(value)))
        .collect::<Vec<_>>()
        .join(", ");

    format!("({})", items)
}

/// Date in database format
pub fn quoted_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Timestamp in database format, to the microsecond
pub fn quoted_datetime(datetime: NaiveDateTime) -> String {
    datetime.format(DATETIME_FORMAT).to_string()
}

/// Strip currency formatting from a user-entered amount.
///
/// Currency symbols, whitespace and thousands separators are dropped. When both
/// `,` and `.` appear, the last one is the decimal separator; a lone `,` followed
/// by one or two digits is treated as a decimal comma. Returns `None` when what
/// remains is not a plain decimal number, so the result is always safe to embed
/// unquoted.
pub fn clean_currency(value: &str) -> Option<String> {
    let kept: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();

    let normalized = match (kept.rfind(','), kept.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => kept.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => kept.replace(',', ""),
        (Some(comma), None) => {
            let decimals = kept.len() - comma - 1;
            if kept.matches(',').count() == 1 && (1..=2).contains(&decimals) {
                kept.replace(',', ".")
            } else {
                kept.replace(',', "")
            }
        }
        (None, _) => kept,
    };

    if is_plain_decimal(&normalized) {
        Some(normalized)
    } else {
        None
    }
}

fn is_plain_decimal(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    let mut parts = digits.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let fraction = parts.next();

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());

    match fraction {
        Some(fraction) => {
            !(whole.is_empty() && fraction.is_empty()) && all_digits(whole) && all_digits(fraction)
        }
        None => !whole.is_empty() && all_digits(whole),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_string_doubles_quotes_only() {
        assert_eq!(quote_string("plain"), "plain");
        assert_eq!(quote_string("O'Brien"), "O''Brien");
        assert_eq!(quote_string("C:\\tmp"), "C:\\tmp");
        assert_eq!(quote_string("it\\'s"), "it\\''s");
        assert_eq!(quote_string("'; DROP TABLE users; --"), "''; DROP TABLE users; --");
    }

    #[test]
    fn test_collection() {
        assert_eq!(collection(&[]), "");
        assert_eq!(collection(&["1"]), "('1')");
        assert_eq!(collection(&["1", "it's"]), "('1', 'it''s')");
    }

    #[test]
    fn test_quoted_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(quoted_date(date), "2024-03-09");

        let datetime = date.and_hms_opt(23, 59, 59).unwrap();
        assert_eq!(quoted_datetime(datetime), "2024-03-09 23:59:59.000000");

        let datetime = date.and_hms_micro_opt(23, 59, 59, 999_999).unwrap();
        assert_eq!(quoted_datetime(datetime), "2024-03-09 23:59:59.999999");
    }

    #[test]
    fn test_clean_currency() {
        assert_eq!(clean_currency("42").as_deref(), Some("42"));
        assert_eq!(clean_currency("€ 1,234.50").as_deref(), Some("1234.50"));
        assert_eq!(clean_currency("1.234,50 EUR").as_deref(), Some("1234.50"));
        assert_eq!(clean_currency("$1,234,567").as_deref(), Some("1234567"));
        assert_eq!(clean_currency("12,5").as_deref(), Some("12.5"));
        assert_eq!(clean_currency("-3.75").as_deref(), Some("-3.75"));
    }

    #[test]
    fn test_clean_currency_rejects_non_numbers() {
        assert_eq!(clean_currency(""), None);
        assert_eq!(clean_currency("abc"), None);
        assert_eq!(clean_currency("1-2"), None);
        assert_eq!(clean_currency("1.2.3"), None);
        assert_eq!(clean_currency("0; DROP TABLE users"), Some("0".to_string()));
    }
}
