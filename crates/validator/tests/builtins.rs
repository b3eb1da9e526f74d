//! Built-in rules invoked through aliases, as a rule string would reach them.

#![cfg(feature = "builtins")]

use rulebook_validator::prelude::*;
use serde_json::{Value, json};

fn check(rule: &str, subject: Value, args: &[&str]) -> bool {
    global()
        .invoke_text(rule, &subject, args)
        .unwrap_or_else(|err| panic!("{rule}: {err}"))
}

#[test]
fn comparisons() {
    assert!(check("lt", json!(1), &["2"]));
    assert!(check("lessThan", json!(1), &["2"]));
    assert!(check("gt", json!(3), &["2"]));
    assert!(check("lte", json!(2), &["2"]));
    assert!(check("intEq", json!(7), &["7"]));
    assert!(check("eq", json!("a"), &["a"]));
    assert!(check("ne", json!(1), &["2"]));
}

#[test]
fn type_checks() {
    assert!(check("int", json!("12"), &[]));
    assert!(check("int", json!(12), &["10", "20"]));
    assert!(!check("int", json!(12), &["13"]));
    assert!(check("uint", json!(3), &[]));
    assert!(check("bool", json!("on"), &[]));
    assert!(check("float", json!(1.5), &[]));
    assert!(check("map", json!({"a": 1}), &[]));
    assert!(check("array", json!([]), &[]));
    assert!(check("slice", json!([1]), &[]));
    assert!(check("ints", json!([1, 2]), &[]));
    assert!(check("string", json!("abc"), &["1", "3"]));
    assert!(check("strings", json!(["a", "b"]), &[]));
    assert!(check("empty", json!({}), &[]));
}

#[test]
fn lengths() {
    assert!(check("len", json!([1, 2]), &["2"]));
    assert!(check("minSize", json!("abc"), &["2"]));
    assert!(check("maxLen", json!("abc"), &["3"]));
    assert!(check("strlen", json!("日本"), &["2"]));
    assert!(check("runeLen", json!("日本"), &["1", "2"]));
}

#[test]
fn contains_family() {
    assert!(check("contains", json!(["x", "y"]), &["y"]));
    assert!(check("notContains", json!("hello"), &["z"]));
    assert!(check("str_contains", json!("hello"), &["ell"]));
    assert!(check("startWith", json!("hello"), &["he"]));
    assert!(check("ends_with", json!("hello"), &["lo"]));
    assert!(check("regex", json!(123), &[r"^\d+$"]));
}

#[test]
fn string_formats() {
    assert!(check("email", json!("a@b.io"), &[]));
    assert!(check("intStr", json!("42"), &[]));
    assert!(check("strNum", json!("4.2"), &[]));
    assert!(check("alpha_num", json!("a1"), &[]));
    assert!(check("base64", json!("aGk="), &[]));
    assert!(check("json", json!("[1]"), &[]));
    assert!(check("lat", json!("45.0"), &[]));
    assert!(check("uuid4", json!("6ba7b810-9dad-41d1-80b4-00c04fd430c8"), &[]));
    assert!(check("url", json!("example.com"), &[]));
    assert!(!check("fullURL", json!("example.com"), &[]));
    assert!(check("cnMobile", json!("13800138000"), &[]));
}

#[test]
fn network_and_paths() {
    assert!(check("ip", json!("::1"), &[]));
    assert!(check("ipv4", json!("1.2.3.4"), &[]));
    assert!(check("CIDRv6", json!("::/0"), &[]));
    assert!(check("unixPath", json!("/etc/hosts"), &[]));
    assert!(check("winPath", json!(r"C:\temp"), &[]));
}

#[test]
fn dates() {
    assert!(check("date", json!("2024-05-01"), &[]));
    assert!(check("gtDate", json!("2024-05-02"), &["2024-05-01"]));
    assert!(check("lteDate", json!("2024-05-01"), &["2024-05-01"]));

    let err = global()
        .invoke_text("afterDate", &json!("2024-05-01"), &["whenever"])
        .unwrap_err();
    assert_eq!(err.code(), "predicate_error");
}

#[test]
fn string_format_rules_need_string_subjects() {
    let err = global().invoke("isEmail", &json!(42), &[]).unwrap_err();
    assert!(matches!(err, RuleError::SubjectTypeMismatch { expected: "string", .. }));
}
