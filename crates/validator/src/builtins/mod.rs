//! Built-in predicates, organized by category.
//!
//! Every built-in goes through the public [`Predicate`] constructors, so the
//! set doubles as a test of the calling convention. [`all`] returns them in
//! registration order; the registry installs them in one batch.

mod date;
mod network;
mod numeric;
mod path;
mod string;
mod types;
mod value;

use crate::predicate::Predicate;

type Rules = Vec<(&'static str, Predicate)>;

/// Errors built-in predicates report instead of a verdict.
#[derive(Debug, thiserror::Error)]
pub(crate) enum BuiltinError {
    /// More optional bounds than the rule accepts.
    #[error("expected at most {max} bound(s), got {got}")]
    TooManyBounds { max: usize, got: usize },

    /// A date argument in none of the accepted layouts.
    #[error("invalid date bound {0:?}")]
    InvalidDate(String),

    /// A user pattern above the length limit.
    #[error("pattern too long: {len} chars (max {max})")]
    PatternTooLong { len: usize, max: usize },

    /// A user pattern that does not compile.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

/// All built-in rules.
pub(crate) fn all() -> Rules {
    let mut rules = Rules::with_capacity(96);
    register_numeric(&mut rules);
    register_value(&mut rules);
    register_type_checks(&mut rules);
    register_length(&mut rules);
    register_string_formats(&mut rules);
    register_network(&mut rules);
    register_paths(&mut rules);
    register_dates(&mut rules);
    rules
}

// Registration methods for each category

fn register_numeric(rules: &mut Rules) {
    rules.push(("lt", Predicate::unary(numeric::lt)));
    rules.push(("gt", Predicate::unary(numeric::gt)));
    rules.push(("min", Predicate::unary(numeric::min)));
    rules.push(("max", Predicate::unary(numeric::max)));
    rules.push(("between", Predicate::binary(numeric::between)));
    rules.push(("intEqual", Predicate::unary(numeric::int_equal)));
}

fn register_value(rules: &mut Rules) {
    rules.push(("enum", Predicate::variadic(value::one_of)));
    rules.push(("notIn", Predicate::variadic(value::not_in)));
    rules.push(("isEqual", Predicate::unary(value::is_equal)));
    rules.push(("notEqual", Predicate::unary(value::not_equal)));
    rules.push(("regexp", Predicate::unary(value::regexp)));
    rules.push(("contains", Predicate::unary(value::contains)));
    rules.push(("notContains", Predicate::unary(value::not_contains)));
    rules.push(("stringContains", Predicate::unary(value::string_contains)));
    rules.push(("startsWith", Predicate::unary(value::starts_with)));
    rules.push(("endsWith", Predicate::unary(value::ends_with)));
}

fn register_type_checks(rules: &mut Rules) {
    rules.push(("isInt", Predicate::variadic(types::is_int)));
    rules.push(("isUint", Predicate::nullary(types::is_uint)));
    rules.push(("isBool", Predicate::nullary(types::is_bool)));
    rules.push(("isFloat", Predicate::nullary(types::is_float)));
    rules.push(("isMap", Predicate::nullary(types::is_map)));
    rules.push(("isArray", Predicate::nullary(types::is_array)));
    rules.push(("isSlice", Predicate::nullary(types::is_array)));
    rules.push(("isInts", Predicate::nullary(types::is_ints)));
    rules.push(("isString", Predicate::variadic(types::is_string)));
    rules.push(("isStrings", Predicate::nullary(types::is_strings)));
    rules.push(("isEmpty", Predicate::nullary(types::is_empty)));
}

fn register_length(rules: &mut Rules) {
    rules.push(("length", Predicate::unary(value::length)));
    rules.push(("minLength", Predicate::unary(value::min_length)));
    rules.push(("maxLength", Predicate::unary(value::max_length)));
    rules.push(("stringLength", Predicate::variadic_unary(value::string_length)));
}

fn register_string_formats(rules: &mut Rules) {
    rules.push(("isIntString", Predicate::nullary(string::is_int_string)));
    rules.push(("isStringNumber", Predicate::nullary(string::is_string_number)));
    rules.push(("isNumber", Predicate::nullary(string::is_number)));
    rules.push(("isNumeric", Predicate::nullary(string::is_numeric)));
    rules.push(("isHexadecimal", Predicate::nullary(string::is_hexadecimal)));
    rules.push(("hasWhitespace", Predicate::nullary(string::has_whitespace)));
    rules.push(("isASCII", Predicate::nullary(string::is_ascii)));
    rules.push(("isPrintableASCII", Predicate::nullary(string::is_printable_ascii)));
    rules.push(("isAlpha", Predicate::nullary(string::is_alpha)));
    rules.push(("isAlphaNum", Predicate::nullary(string::is_alpha_num)));
    rules.push(("isAlphaDash", Predicate::nullary(string::is_alpha_dash)));
    rules.push(("isBase64", Predicate::nullary(string::is_base64)));
    rules.push(("isDNSName", Predicate::nullary(string::is_dns_name)));
    rules.push(("isDataURI", Predicate::nullary(string::is_data_uri)));
    rules.push(("isHexColor", Predicate::nullary(string::is_hex_color)));
    rules.push(("isRGBColor", Predicate::nullary(string::is_rgb_color)));
    rules.push(("isISBN10", Predicate::nullary(string::is_isbn10)));
    rules.push(("isISBN13", Predicate::nullary(string::is_isbn13)));
    rules.push(("isJSON", Predicate::nullary(string::is_json)));
    rules.push(("isLatitude", Predicate::nullary(string::is_latitude)));
    rules.push(("isLongitude", Predicate::nullary(string::is_longitude)));
    rules.push(("isMAC", Predicate::nullary(string::is_mac)));
    rules.push(("isMultiByte", Predicate::nullary(string::is_multi_byte)));
    rules.push(("isCnMobile", Predicate::nullary(string::is_cn_mobile)));
    rules.push(("isEmail", Predicate::nullary(string::is_email)));
    rules.push(("isURL", Predicate::nullary(string::is_url)));
    rules.push(("isFullURL", Predicate::nullary(string::is_full_url)));
    rules.push(("isUUID", Predicate::nullary(string::is_uuid)));
    rules.push(("isUUID3", Predicate::nullary(string::is_uuid3)));
    rules.push(("isUUID4", Predicate::nullary(string::is_uuid4)));
    rules.push(("isUUID5", Predicate::nullary(string::is_uuid5)));
}

fn register_network(rules: &mut Rules) {
    rules.push(("isIP", Predicate::nullary(network::is_ip)));
    rules.push(("isIPv4", Predicate::nullary(network::is_ipv4)));
    rules.push(("isIPv6", Predicate::nullary(network::is_ipv6)));
    rules.push(("isCIDR", Predicate::nullary(network::is_cidr)));
    rules.push(("isCIDRv4", Predicate::nullary(network::is_cidr_v4)));
    rules.push(("isCIDRv6", Predicate::nullary(network::is_cidr_v6)));
}

fn register_paths(rules: &mut Rules) {
    rules.push(("isPath", Predicate::nullary(path::is_path)));
    rules.push(("isDirPath", Predicate::nullary(path::is_dir_path)));
    rules.push(("isFilePath", Predicate::nullary(path::is_file_path)));
    rules.push(("isUnixPath", Predicate::nullary(path::is_unix_path)));
    rules.push(("isWinPath", Predicate::nullary(path::is_win_path)));
}

fn register_dates(rules: &mut Rules) {
    rules.push(("isDate", Predicate::nullary(date::is_date)));
    rules.push(("afterDate", Predicate::unary(date::after_date)));
    rules.push(("beforeDate", Predicate::unary(date::before_date)));
    rules.push(("afterOrEqualDate", Predicate::unary(date::after_or_equal_date)));
    rules.push(("beforeOrEqualDate", Predicate::unary(date::before_or_equal_date)));
}

/// Checks `n` against up to two optional bounds: `[]` accepts anything,
/// `[min]` is a lower bound and `[min, max]` an inclusive range.
fn within_bounds(n: i64, bounds: &[i64]) -> Result<bool, BuiltinError> {
    match *bounds {
        [] => Ok(true),
        [min] => Ok(n >= min),
        [min, max] => Ok(n >= min && n <= max),
        _ => Err(BuiltinError::TooManyBounds {
            max: 2,
            got: bounds.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let rules = all();
        let names: HashSet<&str> = rules.iter().map(|(name, _)| *name).collect();
        assert_eq!(names.len(), rules.len());
    }

    #[test]
    fn every_signature_is_supported() {
        for (name, predicate) in all() {
            assert!(predicate.signature().check().is_ok(), "{name}");
        }
    }

    #[test]
    fn bounds() {
        assert!(within_bounds(5, &[]).unwrap());
        assert!(within_bounds(5, &[5]).unwrap());
        assert!(!within_bounds(4, &[5]).unwrap());
        assert!(within_bounds(5, &[1, 5]).unwrap());
        assert!(!within_bounds(6, &[1, 5]).unwrap());
        assert!(within_bounds(1, &[1, 2, 3]).is_err());
    }
}
