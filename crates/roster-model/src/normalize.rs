//! Normalization of list-valued cells delivered as raw text.
//!
//! Sheets carry list columns (`Skills`, `AvailableSlots`, ...) as text such as
//! `"a, b"`, `"[1,2,3]"` or `"2-4"`. Malformed numeric tokens are dropped
//! here without complaint; field validation reports what remains.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::schema::DataType;

/// Widest inclusive phase range accepted from `<start>-<end>` notation.
pub const MAX_PHASE_RANGE: i64 = 1_000;

static RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)\s*-\s*(\d+)\s*$").expect("valid range pattern")
});

fn bracket_inner(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
}

fn unquote(item: &str) -> &str {
    let item = item.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = item
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner.trim();
        }
    }
    item
}

fn split_items(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(unquote).filter(|item| !item.is_empty())
}

/// Parse a string list cell.
///
/// `[a,b]` and `["a","b"]` are explicit lists; anything else is split on `,`.
pub fn parse_string_list(raw: &str) -> Vec<String> {
    if bracket_inner(raw).is_some() {
        if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw.trim()) {
            return items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(text.trim().to_string()),
                    Value::Null => None,
                    other => Some(other.to_string()),
                })
                .filter(|item| !item.is_empty())
                .collect();
        }
    }
    let body = bracket_inner(raw).unwrap_or(raw);
    split_items(body).map(str::to_string).collect()
}

fn parse_int_token(token: &str) -> Option<i64> {
    let token = token.trim();
    if let Ok(value) = token.parse::<i64>() {
        return Some(value);
    }
    // "3.0" from spreadsheet exports is still phase 3
    token
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && value.fract() == 0.0)
        .map(|value| value as i64)
}

/// Parse a phase list cell: explicit list, inclusive range, or comma list.
pub fn parse_phase_list(raw: &str) -> Vec<i64> {
    if let Some(inner) = bracket_inner(raw) {
        return split_items(inner).filter_map(parse_int_token).collect();
    }
    if let Some(captures) = RANGE_PATTERN.captures(raw) {
        let start = captures[1].parse::<i64>().ok();
        let end = captures[2].parse::<i64>().ok();
        return match (start, end) {
            (Some(start), Some(end)) if end >= start && end - start < MAX_PHASE_RANGE => {
                (start..=end).collect()
            }
            _ => Vec::new(),
        };
    }
    split_items(raw).filter_map(parse_int_token).collect()
}

/// Normalize a list-typed cell: text is parsed, arrays pass through.
///
/// Non-list types and non-string values are returned unchanged.
pub fn normalize_list_value(value: &Value, data_type: DataType) -> Value {
    let Value::String(raw) = value else {
        return value.clone();
    };
    match data_type {
        DataType::StringList => Value::Array(
            parse_string_list(raw)
                .into_iter()
                .map(Value::String)
                .collect(),
        ),
        DataType::NumberList => {
            Value::Array(parse_phase_list(raw).into_iter().map(Value::from).collect())
        }
        _ => value.clone(),
    }
}

/// JS-style numeric coercion of a cell: numbers and numeric text.
///
/// Returns `None` for anything that would coerce to `NaN`.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok().filter(|parsed| !parsed.is_nan())
            }
        }
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// True when a cell counts as "not provided": null, empty text, `false`, or 0.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.trim().is_empty(),
        Some(Value::Bool(flag)) => !flag,
        Some(Value::Number(number)) => number.as_f64() == Some(0.0),
        Some(Value::Array(_) | Value::Object(_)) => false,
    }
}

/// Display form of a scalar cell (IDs, tags).
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Format a number without a trailing `.0` for integral values.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
