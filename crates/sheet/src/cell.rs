//! Typed accessors over raw cell strings.
//!
//! Cells are stored exactly as they were decoded. Anything that needs a number
//! or a date goes through these helpers so range filters, statistics, sorting
//! and aggregation all agree on what "numeric" means.

use chrono::{DateTime, NaiveDate};

/// Date layouts accepted by [`try_parse_date`], tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Check whether a cell counts as empty (absent cells are stored as `""`).
#[must_use]
pub fn is_empty_cell(value: &str) -> bool {
    value.is_empty()
}

/// Parse a cell as a finite floating-point number.
///
/// Reads the longest number at the start of the trimmed cell and ignores the
/// rest, so `"10%"` is 10 and `"100px"` is 100. A cell with no leading number
/// is not numeric. `inf` and `NaN` spellings, and values that overflow, are
/// rejected.
#[must_use]
pub fn try_parse_number(value: &str) -> Option<f64> {
    let prefix = number_prefix(value.trim());
    if prefix.is_empty() {
        return None;
    }
    prefix.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// The leading `[+-]digits[.digits][e[+-]digits]` run of `text`, or `""`.
fn number_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        let mut end = start;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        end
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        digits += frac_end - (end + 1);
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return "";
    }

    // an exponent only counts when it has digits: "1e" is 1
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    &text[..end]
}

/// Parse a cell as a calendar date.
///
/// Accepts ISO dates, ISO date-times (the time part is dropped), RFC 3339
/// timestamps and a few common day/month layouts.
#[must_use]
pub fn try_parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ts.date_naive());
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    // "2024-03-01T10:00:00" / "2024-03-01 10:00"
    let (head, rest) = trimmed.split_at_checked(10)?;
    if rest.starts_with(['T', ' ']) {
        return NaiveDate::parse_from_str(head, "%Y-%m-%d").ok();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(try_parse_number("42"), Some(42.0));
        assert_eq!(try_parse_number(" -2.5 "), Some(-2.5));
        assert_eq!(try_parse_number("1e3"), Some(1000.0));
        assert_eq!(try_parse_number(""), None);
        assert_eq!(try_parse_number("   "), None);
        assert_eq!(try_parse_number("inf"), None);
        assert_eq!(try_parse_number("NaN"), None);
        assert_eq!(try_parse_number("1e400"), None);
    }

    #[test]
    fn test_parse_number_reads_leading_number() {
        assert_eq!(try_parse_number("12abc"), Some(12.0));
        assert_eq!(try_parse_number("10%"), Some(10.0));
        assert_eq!(try_parse_number(" 100px"), Some(100.0));
        assert_eq!(try_parse_number("1,000"), Some(1.0));
        assert_eq!(try_parse_number("2024-03-01"), Some(2024.0));
        assert_eq!(try_parse_number(".5kg"), Some(0.5));
        assert_eq!(try_parse_number("-3."), Some(-3.0));
        assert_eq!(try_parse_number("+7x"), Some(7.0));
        assert_eq!(try_parse_number("2e3m"), Some(2000.0));
        assert_eq!(try_parse_number("4e"), Some(4.0));
        assert_eq!(try_parse_number("5e-x"), Some(5.0));
    }

    #[test]
    fn test_parse_number_needs_leading_digits() {
        assert_eq!(try_parse_number("abc12"), None);
        assert_eq!(try_parse_number("$5"), None);
        assert_eq!(try_parse_number("."), None);
        assert_eq!(try_parse_number("-"), None);
        assert_eq!(try_parse_number("-.e5"), None);
        assert_eq!(try_parse_number("n/a"), None);
    }

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1);
        assert_eq!(try_parse_date("2024-03-01"), expected);
        assert_eq!(try_parse_date("2024/03/01"), expected);
        assert_eq!(try_parse_date("03/01/2024"), expected);
        assert_eq!(try_parse_date("01.03.2024"), expected);
        assert_eq!(try_parse_date("2024-03-01T23:15:00"), expected);
        assert_eq!(try_parse_date("2024-03-01 08:00"), expected);
        assert_eq!(try_parse_date("2024-03-01T10:00:00+02:00"), expected);
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(try_parse_date(""), None);
        assert_eq!(try_parse_date("yesterday"), None);
        assert_eq!(try_parse_date("2024-13-01"), None);
        assert_eq!(try_parse_date("é"), None);
    }

    #[test]
    fn test_empty_cell() {
        assert!(is_empty_cell(""));
        assert!(!is_empty_cell(" "));
        assert!(!is_empty_cell("0"));
    }
}
