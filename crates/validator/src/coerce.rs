//! Conversion of raw rule arguments into their declared kinds.
//!
//! Raw arguments usually arrive as text tokens (`"between:1,10"` yields
//! `"1"` and `"10"`), but JSON scalars are accepted where they carry the same
//! information. Conversion is strict: the first argument that does not fit
//! aborts the call.

use serde_json::Value;

use crate::signature::{Arg, ParamKind};
use crate::value::{describe, scalar_text, value_type_name};

/// Why one raw argument did not convert. `actual` describes the offending
/// value for the error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Mismatch {
    pub(crate) actual: String,
}

impl Mismatch {
    fn of(value: &Value) -> Self {
        Self {
            actual: describe(value),
        }
    }
}

/// Converts `raw` to `kind`.
pub(crate) fn coerce(raw: &Value, kind: ParamKind) -> Result<Arg, Mismatch> {
    let arg = match kind {
        ParamKind::StringSet => return to_string_set(raw).map(Arg::StringSet),
        ParamKind::Integer => to_integer(raw).map(Arg::Integer),
        ParamKind::Float => to_float(raw).map(Arg::Float),
        ParamKind::Boolean => to_boolean(raw).map(Arg::Boolean),
        ParamKind::String => scalar_text(raw).map(Arg::String),
    };
    arg.ok_or_else(|| Mismatch::of(raw))
}

fn to_integer(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn to_float(raw: &Value) -> Option<f64> {
    let value = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    }?;
    value.is_finite().then_some(value)
}

fn to_boolean(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s == "true" => Some(true),
        Value::String(s) if s == "false" => Some(false),
        _ => None,
    }
}

fn to_string_set(raw: &Value) -> Result<Vec<String>, Mismatch> {
    match raw {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(position, item)| {
                scalar_text(item).ok_or_else(|| Mismatch {
                    actual: format!("element {position}: {}", value_type_name(item)),
                })
            })
            .collect(),
        Value::String(s) if s.is_empty() => Ok(Vec::new()),
        Value::String(s) => Ok(s.split(',').map(|part| part.trim().to_owned()).collect()),
        _ => Err(Mismatch::of(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn integers_from_text_and_json() {
        assert_eq!(coerce(&json!("42"), ParamKind::Integer), Ok(Arg::Integer(42)));
        assert_eq!(coerce(&json!("-7"), ParamKind::Integer), Ok(Arg::Integer(-7)));
        assert_eq!(coerce(&json!(3), ParamKind::Integer), Ok(Arg::Integer(3)));
        assert!(coerce(&json!("4.5"), ParamKind::Integer).is_err());
        assert!(coerce(&json!(true), ParamKind::Integer).is_err());
        assert!(coerce(&json!(" 1"), ParamKind::Integer).is_err());
    }

    #[test]
    fn floats_reject_non_finite() {
        assert_eq!(coerce(&json!("2.5"), ParamKind::Float), Ok(Arg::Float(2.5)));
        assert_eq!(coerce(&json!(1), ParamKind::Float), Ok(Arg::Float(1.0)));
        assert!(coerce(&json!("inf"), ParamKind::Float).is_err());
        assert!(coerce(&json!("NaN"), ParamKind::Float).is_err());
    }

    #[test]
    fn booleans_are_exact() {
        assert_eq!(coerce(&json!("true"), ParamKind::Boolean), Ok(Arg::Boolean(true)));
        assert_eq!(coerce(&json!(false), ParamKind::Boolean), Ok(Arg::Boolean(false)));
        assert!(coerce(&json!("True"), ParamKind::Boolean).is_err());
        assert!(coerce(&json!("1"), ParamKind::Boolean).is_err());
    }

    #[test]
    fn strings_take_scalar_text() {
        assert_eq!(
            coerce(&json!("abc"), ParamKind::String),
            Ok(Arg::String("abc".into()))
        );
        assert_eq!(coerce(&json!(10), ParamKind::String), Ok(Arg::String("10".into())));
        let err = coerce(&json!(null), ParamKind::String).unwrap_err();
        assert_eq!(err.actual, "null");
    }

    #[test]
    fn string_sets_from_array_or_text() {
        assert_eq!(
            coerce(&json!(["a", 1, true]), ParamKind::StringSet),
            Ok(Arg::StringSet(vec!["a".into(), "1".into(), "true".into()]))
        );
        assert_eq!(
            coerce(&json!("a, b,c"), ParamKind::StringSet),
            Ok(Arg::StringSet(vec!["a".into(), "b".into(), "c".into()]))
        );
        assert_eq!(coerce(&json!(""), ParamKind::StringSet), Ok(Arg::StringSet(vec![])));
    }

    #[test]
    fn string_set_element_error_names_position() {
        let err = coerce(&json!(["a", "b", {}]), ParamKind::StringSet).unwrap_err();
        assert_eq!(err.actual, "element 2: object");
    }

    #[test]
    fn mismatch_describes_value() {
        let err = coerce(&json!("abc"), ParamKind::Integer).unwrap_err();
        assert_eq!(err.actual, "string \"abc\"");
    }
}
