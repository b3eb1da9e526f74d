//! Integer comparisons. Subjects must be JSON integers.

pub(super) fn lt(value: i64, max: i64) -> bool {
    value < max
}

pub(super) fn gt(value: i64, min: i64) -> bool {
    value > min
}

pub(super) fn min(value: i64, min: i64) -> bool {
    value >= min
}

pub(super) fn max(value: i64, max: i64) -> bool {
    value <= max
}

pub(super) fn between(value: i64, min: i64, max: i64) -> bool {
    (min..=max).contains(&value)
}

pub(super) fn int_equal(value: i64, expected: i64) -> bool {
    value == expected
}
