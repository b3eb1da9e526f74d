//! Value comparisons, membership, patterns and lengths.

use std::collections::HashMap;
use std::sync::LazyLock;

use parking_lot::Mutex;
use regex::Regex;
use super::{BuiltinError, within_bounds};
use crate::predicate::{Container, Scalar};

/// Maximum accepted length of a user pattern.
const MAX_PATTERN_LEN: usize = 1000;

/// Maximum number of cached patterns (simple eviction)
const MAX_REGEX_CACHE_SIZE: usize = 100;

static REGEX_CACHE: LazyLock<Mutex<HashMap<String, Regex>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

// ============================================================================
// EQUALITY AND MEMBERSHIP
// ============================================================================

pub(super) fn one_of(value: Scalar, allowed: Vec<String>) -> bool {
    allowed.iter().any(|item| item == value.as_str())
}

pub(super) fn not_in(value: Scalar, denied: Vec<String>) -> bool {
    !one_of(value, denied)
}

pub(super) fn is_equal(value: Scalar, expected: String) -> bool {
    value.as_str() == expected
}

pub(super) fn not_equal(value: Scalar, other: String) -> bool {
    value.as_str() != other
}

// ============================================================================
// PATTERN
// ============================================================================

pub(super) fn regexp(value: Scalar, pattern: String) -> Result<bool, BuiltinError> {
    if pattern.len() > MAX_PATTERN_LEN {
        return Err(BuiltinError::PatternTooLong {
            len: pattern.len(),
            max: MAX_PATTERN_LEN,
        });
    }

    let cached = REGEX_CACHE.lock().get(&pattern).cloned();
    let regex = match cached {
        Some(regex) => regex,
        None => {
            // compile outside the lock; a racing caller may insert the same pattern
            let compiled = Regex::new(&pattern)?;
            let mut cache = REGEX_CACHE.lock();
            if cache.len() >= MAX_REGEX_CACHE_SIZE && !cache.contains_key(&pattern) {
                if let Some(key) = cache.keys().next().cloned() {
                    cache.remove(&key);
                }
            }
            cache.insert(pattern, compiled.clone());
            compiled
        }
    };

    Ok(regex.is_match(value.as_str()))
}

// ============================================================================
// CONTAINS
// ============================================================================

pub(super) fn contains(value: Container, needle: String) -> bool {
    value.has(&needle)
}

pub(super) fn not_contains(value: Container, needle: String) -> bool {
    !value.has(&needle)
}

pub(super) fn string_contains(value: String, needle: String) -> bool {
    value.contains(&needle)
}

pub(super) fn starts_with(value: String, prefix: String) -> bool {
    value.starts_with(&prefix)
}

pub(super) fn ends_with(value: String, suffix: String) -> bool {
    value.ends_with(&suffix)
}

// ============================================================================
// LENGTH
// ============================================================================

fn len_of(value: &Container) -> i64 {
    i64::try_from(value.len()).unwrap_or(i64::MAX)
}

pub(super) fn length(value: Container, expected: i64) -> bool {
    len_of(&value) == expected
}

pub(super) fn min_length(value: Container, min: i64) -> bool {
    len_of(&value) >= min
}

pub(super) fn max_length(value: Container, max: i64) -> bool {
    len_of(&value) <= max
}

/// Character count with a required minimum and an optional maximum.
pub(super) fn string_length(value: String, min: i64, max: Vec<i64>) -> Result<bool, BuiltinError> {
    let chars = i64::try_from(value.chars().count()).unwrap_or(i64::MAX);
    let mut bounds = Vec::with_capacity(1 + max.len());
    bounds.push(min);
    bounds.extend(max);
    within_bounds(chars, &bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::FromSubject;
    use serde_json::json;

    fn scalar(s: &str) -> Scalar {
        Scalar(s.to_owned())
    }

    #[test]
    fn membership() {
        let colors = vec!["red".to_owned(), "green".to_owned()];
        assert!(one_of(scalar("red"), colors.clone()));
        assert!(!one_of(scalar("purple"), colors.clone()));
        assert!(not_in(scalar("purple"), colors));
        assert!(!one_of(scalar("red"), vec![]));
    }

    #[test]
    fn regexp_caches_and_reports_bad_patterns() {
        assert!(regexp(scalar("abc123"), r"^[a-z]+\d+$".into()).unwrap());
        assert!(!regexp(scalar("123abc"), r"^[a-z]+\d+$".into()).unwrap());
        assert!(matches!(
            regexp(scalar("x"), "(unclosed".into()),
            Err(BuiltinError::Regex(_))
        ));
        assert!(matches!(
            regexp(scalar("x"), "a".repeat(MAX_PATTERN_LEN + 1)),
            Err(BuiltinError::PatternTooLong { .. })
        ));
    }

    fn container(value: serde_json::Value) -> Container {
        Container::from_subject(&value).unwrap()
    }

    #[test]
    fn regexp_from_many_threads() {
        let pattern = r"^[a-z]{2,4}$";
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    assert!(regexp(scalar("abc"), pattern.into()).unwrap());
                    assert!(!regexp(scalar("a"), pattern.into()).unwrap());
                });
            }
        });
    }

    #[test]
    fn cache_stays_bounded() {
        for i in 0..MAX_REGEX_CACHE_SIZE + 10 {
            assert!(regexp(scalar("x"), format!("^x|bounded{i}$")).unwrap());
        }
        assert!(REGEX_CACHE.lock().len() <= MAX_REGEX_CACHE_SIZE);
    }

    #[test]
    fn contains_by_container_shape() {
        assert!(contains(container(json!("hello world")), "lo w".into()));
        assert!(contains(container(json!(["a", 1])), "1".into()));
        assert!(contains(container(json!({"key": null})), "key".into()));
        assert!(not_contains(container(json!(["a"])), "b".into()));
        assert!(!not_contains(container(json!("abc")), "b".into()));
    }

    #[test]
    fn lengths_count_chars_and_elements() {
        assert!(length(container(json!("héllo")), 5));
        assert!(length(container(json!([1, 2, 3])), 3));
        assert!(min_length(container(json!("ab")), 2));
        assert!(!max_length(container(json!({"a": 1, "b": 2})), 1));
    }

    #[test]
    fn numbers_are_not_containers() {
        assert!(Container::from_subject(&json!(123)).is_none());
        assert!(Container::from_subject(&json!(true)).is_none());
    }

    #[test]
    fn string_length_bounds() {
        assert!(string_length("日本語".into(), 3, vec![]).unwrap());
        assert!(string_length("abc".into(), 1, vec![3]).unwrap());
        assert!(!string_length("abcd".into(), 1, vec![3]).unwrap());
        assert!(string_length("abc".into(), 1, vec![2, 3]).is_err());
    }
}
