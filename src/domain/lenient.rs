//! Lenient value parsing for form and document input.
//!
//! Form data arrives as loosely typed JSON values. These helpers degrade
//! unparseable input to a caller-supplied default instead of rejecting it.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::config::{FALSY_TEXT, NULL_LIKE_TEXT, TRUTHY_TEXT};

/// True for null, blank strings and null-like text such as `"None"`.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => is_blank(s),
        _ => false,
    }
}

fn is_blank(s: &str) -> bool {
    let s = s.trim();
    s.is_empty() || NULL_LIKE_TEXT.iter().any(|n| n.eq_ignore_ascii_case(s))
}

/// Trimmed text, or `None` for empty and null-like input.
pub fn clean_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !is_blank(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse an integer, falling back to `default`.
///
/// Whole JSON numbers are accepted, fractional ones are truncated. Strings
/// must hold an integer literal.
pub fn parse_int_or(value: &Value, default: Option<i32>) -> Option<i32> {
    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .and_then(|i| i32::try_from(i).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        Value::Bool(b) => Some(i32::from(*b)),
        _ => None,
    };
    parsed.or(default)
}

/// Parse a float, falling back to `default`.
pub fn parse_float_or(value: &Value, default: Option<f64>) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite()).or(default)
}

/// Parse a yes/no style value, falling back to `default`.
pub fn parse_bool_or(value: &Value, default: Option<bool>) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => default,
        },
        Value::String(s) => bool_from_text(s).or(default),
        _ => default,
    }
}

/// Map free text onto a boolean (`si`, `yes`, `1`, `no`, `0`, ...).
pub fn bool_from_text(text: &str) -> Option<bool> {
    let s = text.trim().to_lowercase();
    if TRUTHY_TEXT.contains(&s.as_str()) {
        Some(true)
    } else if FALSY_TEXT.contains(&s.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Loose truthiness for flags that are never null.
///
/// Known yes/no words are honoured; any other non-blank value counts as set.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => bool_from_text(s).unwrap_or(!s.trim().is_empty()),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Parse a calendar date from `YYYY-MM-DD` or the date part of an RFC 3339
/// timestamp.
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    let s = value.as_str()?.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Parse a stored timestamp: RFC 3339, or a naive `YYYY-MM-DD HH:MM:SS`
/// read as UTC.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let s = value.as_str()?.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}
