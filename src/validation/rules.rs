//! Pure field rules. Parsers return the typed value or a message; checks
//! return `Some(message)` on violation.

use std::ops::RangeInclusive;

use serde_json::Value;

pub const BLANK: &str = "can't be blank";

/// Render a request value the way it appears in messages: strings raw,
/// anything else as JSON.
fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Parse an integer from a JSON number or a numeric string.
///
/// # Errors
///
/// Returns a message naming the offending value.
pub fn integer(value: Option<&Value>) -> Result<i32, String> {
    let Some(value) = value.filter(|_| !is_blank(value)) else {
        return Err(BLANK.to_string());
    };

    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    let n = parsed.ok_or_else(|| format!("'{}' is not a number", display(value)))?;
    i32::try_from(n).map_err(|_| format!("'{n}' is out of range"))
}

/// Parse a required, non-blank string.
///
/// # Errors
///
/// Returns [`BLANK`] for missing or blank values and a type message for
/// non-string values.
pub fn string(value: Option<&Value>) -> Result<String, String> {
    match value {
        _ if is_blank(value) => Err(BLANK.to_string()),
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(format!("'{}' is not a string", display(other))),
        None => Err(BLANK.to_string()),
    }
}

/// Parse a boolean. Form-style `"true"`/`"false"` strings are accepted; null
/// and anything else are rejected.
///
/// # Errors
///
/// Returns `"must be true or false"`.
pub fn boolean(value: Option<&Value>) -> Result<bool, String> {
    match value {
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::String(s)) if s == "true" => Ok(true),
        Some(Value::String(s)) if s == "false" => Ok(false),
        _ => Err("must be true or false".to_string()),
    }
}

/// Parse a list of strings, e.g. move names. Blank entries are dropped.
///
/// # Errors
///
/// Returns [`BLANK`] when nothing usable remains.
pub fn string_list(value: Option<&Value>) -> Result<Vec<String>, String> {
    let names: Vec<String> = match value {
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(|v| string(Some(v)).ok())
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    };

    if names.is_empty() {
        Err(BLANK.to_string())
    } else {
        Ok(names)
    }
}

pub fn greater_than(n: i32, bound: i32) -> Option<String> {
    (n <= bound).then(|| format!("'{n}' must be greater than {bound}"))
}

pub fn greater_than_or_equal_to(n: i32, bound: i32) -> Option<String> {
    (n < bound).then(|| format!("'{n}' must be greater than or equal to {bound}"))
}

pub fn within(n: i32, range: RangeInclusive<i32>) -> Option<String> {
    (!range.contains(&n)).then(|| format!("'{n}' must be in {}..{}", range.start(), range.end()))
}

/// Character-length bounds, both inclusive.
pub fn length(s: &str, min: usize, max: usize) -> Option<String> {
    let len = s.chars().count();
    if len < min {
        Some(format!("is too short (minimum is {min} characters)"))
    } else if len > max {
        Some(format!("is too long (maximum is {max} characters)"))
    } else {
        None
    }
}

pub fn inclusion(s: &str, allowed: &[&str], describe: &str) -> Option<String> {
    (!allowed.contains(&s)).then(|| format!("'{s}' is not a valid {describe}"))
}

pub fn already_in_use(value: impl std::fmt::Display) -> String {
    format!("'{value}' is already in use")
}
