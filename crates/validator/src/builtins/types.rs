//! Type checks over any subject.
//!
//! Numeric checks accept JSON numbers and numeric text alike, since rule
//! subjects often come from form or query input.

use serde_json::Value;

use super::{BuiltinError, within_bounds};
use crate::value::is_zero_value;

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Integer, optionally within `[min]` or `[min, max]`.
pub(super) fn is_int(value: Value, bounds: Vec<i64>) -> Result<bool, BuiltinError> {
    match as_integer(&value) {
        Some(n) => within_bounds(n, &bounds),
        None if bounds.len() > 2 => within_bounds(0, &bounds),
        None => Ok(false),
    }
}

pub(super) fn is_uint(value: Value) -> bool {
    match &value {
        Value::Number(n) => n.as_u64().is_some(),
        Value::String(s) => s.parse::<u64>().is_ok(),
        _ => false,
    }
}

pub(super) fn is_bool(value: Value) -> bool {
    match &value {
        Value::Bool(_) => true,
        Value::String(s) => matches!(
            s.to_lowercase().as_str(),
            "true" | "false" | "1" | "0" | "on" | "off" | "yes" | "no"
        ),
        _ => false,
    }
}

pub(super) fn is_float(value: Value) -> bool {
    match &value {
        Value::Number(_) => true,
        Value::String(s) => s.parse::<f64>().is_ok_and(f64::is_finite),
        _ => false,
    }
}

pub(super) fn is_map(value: Value) -> bool {
    value.is_object()
}

pub(super) fn is_array(value: Value) -> bool {
    value.is_array()
}

pub(super) fn is_ints(value: Value) -> bool {
    value
        .as_array()
        .is_some_and(|items| items.iter().all(|item| item.as_i64().is_some()))
}

/// String, optionally with a char count within `[min]` or `[min, max]`.
pub(super) fn is_string(value: Value, bounds: Vec<i64>) -> Result<bool, BuiltinError> {
    match value.as_str() {
        Some(s) => within_bounds(i64::try_from(s.chars().count()).unwrap_or(i64::MAX), &bounds),
        None if bounds.len() > 2 => within_bounds(0, &bounds),
        None => Ok(false),
    }
}

pub(super) fn is_strings(value: Value) -> bool {
    value
        .as_array()
        .is_some_and(|items| items.iter().all(Value::is_string))
}

pub(super) fn is_empty(value: Value) -> bool {
    is_zero_value(&value)
}
