//! Date parsing and comparison.
//!
//! Accepted layouts: RFC 3339, `YYYY-MM-DD[ HH:MM:SS]`, `YYYY-MM-DDTHH:MM:SS`,
//! `YYYY/MM/DD[ HH:MM:SS]` and `YYYYMMDD`. Date-only values compare as
//! midnight. An unparseable subject is not a date (`false`); an unparseable
//! bound is an error in the rule itself.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::BuiltinError;

const DATETIME_LAYOUTS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"];
const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    DATETIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(s, layout).ok())
        .or_else(|| {
            DATE_LAYOUTS
                .iter()
                .find_map(|layout| NaiveDate::parse_from_str(s, layout).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn compare(
    value: &str,
    bound: &str,
    accept: impl FnOnce(NaiveDateTime, NaiveDateTime) -> bool,
) -> Result<bool, BuiltinError> {
    let bound = parse_date(bound).ok_or_else(|| BuiltinError::InvalidDate(bound.to_owned()))?;
    Ok(parse_date(value).is_some_and(|value| accept(value, bound)))
}

pub(super) fn is_date(s: String) -> bool {
    parse_date(&s).is_some()
}

pub(super) fn after_date(value: String, bound: String) -> Result<bool, BuiltinError> {
    compare(&value, &bound, |v, b| v > b)
}

pub(super) fn before_date(value: String, bound: String) -> Result<bool, BuiltinError> {
    compare(&value, &bound, |v, b| v < b)
}

pub(super) fn after_or_equal_date(value: String, bound: String) -> Result<bool, BuiltinError> {
    compare(&value, &bound, |v, b| v >= b)
}

pub(super) fn before_or_equal_date(value: String, bound: String) -> Result<bool, BuiltinError> {
    compare(&value, &bound, |v, b| v <= b)
}
