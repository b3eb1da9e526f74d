//! Dynamic invocation of registered rules.
//!
//! [`Registry::invoke`] is the single entry point: it resolves the alias,
//! fetches the descriptor, checks arity, coerces the arguments, checks the
//! subject shape and calls the predicate. Any step that fails returns an
//! error; none of them degrade into a `false` verdict.

use serde_json::Value;

use crate::coerce::coerce;
use crate::descriptor::RuleDescriptor;
use crate::error::{RuleError, RuleResult};
use crate::predicate::CallError;
use crate::registry::Registry;
use crate::signature::{Arg, ParamKind};
use crate::value::{describe, value_type_name};

impl Registry {
    /// Applies the rule `rule_name` (canonical or alias) to `subject`.
    ///
    /// ```
    /// use rulebook_validator::Registry;
    /// use serde_json::json;
    ///
    /// let registry = Registry::with_builtins();
    /// assert!(registry.invoke("between", &json!(5), &[json!("1"), json!("10")]).unwrap());
    /// assert!(!registry.invoke("range", &json!(15), &[json!("1"), json!("10")]).unwrap());
    /// ```
    pub fn invoke(&self, rule_name: &str, subject: &Value, raw_args: &[Value]) -> RuleResult<bool> {
        let descriptor = self
            .lookup(self.resolve(rule_name))
            .ok_or_else(|| RuleError::UnknownRule(rule_name.to_owned()))?;
        apply(&descriptor, subject, raw_args)
    }

    /// [`invoke`](Registry::invoke) with text arguments.
    pub fn invoke_text(&self, rule_name: &str, subject: &Value, args: &[&str]) -> RuleResult<bool> {
        let raw_args: Vec<Value> = args.iter().map(|arg| Value::from(*arg)).collect();
        self.invoke(rule_name, subject, &raw_args)
    }

    /// Parses a `name:arg,arg` rule token and applies it to `subject`.
    ///
    /// The name ends at the first `:`; the rest is split on `,` with each
    /// argument trimmed. A token without `:` takes no arguments. When the rule
    /// takes exactly one text argument the rest is passed whole, so a pattern
    /// such as `regexp:^\d{1,3}$` keeps its commas.
    ///
    /// ```
    /// use rulebook_validator::Registry;
    /// use serde_json::json;
    ///
    /// let registry = Registry::with_builtins();
    /// assert!(registry.invoke_token(&json!("red"), "in:red,green,blue").unwrap());
    /// assert!(registry.invoke_token(&json!(7), "min:3").unwrap());
    /// assert!(registry.invoke_token(&json!("42"), r"regexp:^\d{1,3}$").unwrap());
    /// ```
    pub fn invoke_token(&self, subject: &Value, token: &str) -> RuleResult<bool> {
        let (name, args) = match token.split_once(':') {
            Some((name, args)) => (name.trim(), args.trim()),
            None => (token.trim(), ""),
        };
        if name.is_empty() {
            return Err(RuleError::UnknownRule(String::new()));
        }
        let args: Vec<&str> = if args.is_empty() {
            Vec::new()
        } else if self.takes_single_text(name) {
            vec![args]
        } else {
            args.split(',').map(str::trim).collect()
        };
        self.invoke_text(name, subject, &args)
    }

    fn takes_single_text(&self, name: &str) -> bool {
        self.lookup(self.resolve(name)).is_some_and(|descriptor| {
            !descriptor.is_variadic() && descriptor.param_kinds() == [ParamKind::String]
        })
    }
}

fn apply(descriptor: &RuleDescriptor, subject: &Value, raw_args: &[Value]) -> RuleResult<bool> {
    let rule = descriptor.name();
    let signature = descriptor.signature();

    if !signature.accepts_arity(raw_args.len()) {
        return Err(RuleError::ArityMismatch {
            rule: rule.to_owned(),
            expected: signature.min_args(),
            got: raw_args.len(),
            variadic: signature.is_variadic(),
        });
    }

    let mut args: Vec<Arg> = Vec::with_capacity(raw_args.len());
    for (index, raw) in raw_args.iter().enumerate() {
        // arity was checked, so every index has a kind
        let Some(kind) = signature.kind_at(index) else {
            break;
        };
        let arg = coerce(raw, kind).map_err(|mismatch| RuleError::TypeCoercion {
            rule: rule.to_owned(),
            index,
            expected: kind.name(),
            actual: mismatch.actual,
        })?;
        args.push(arg);
    }

    let expected = signature.subject();
    if !expected.accepts(subject) {
        return Err(subject_mismatch(descriptor, subject));
    }

    descriptor.call(subject, args).map_err(|err| match err {
        CallError::Subject => subject_mismatch(descriptor, subject),
        CallError::Argument(index) => RuleError::TypeCoercion {
            rule: rule.to_owned(),
            index,
            expected: signature.kind_at(index).map_or("argument", |kind| kind.name()),
            actual: raw_args.get(index).map_or_else(|| "nothing".to_owned(), describe),
        },
        CallError::Predicate(cause) => RuleError::PredicateError {
            rule: rule.to_owned(),
            cause,
        },
    })
}

fn subject_mismatch(descriptor: &RuleDescriptor, subject: &Value) -> RuleError {
    RuleError::SubjectTypeMismatch {
        rule: descriptor.name().to_owned(),
        expected: descriptor.subject_kind().name(),
        actual: value_type_name(subject),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::Predicate;
    use crate::signature::{Signature, SubjectKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn registry() -> Registry {
        let registry = Registry::new();
        registry
            .register_custom(
                "between",
                Predicate::binary(|v: i64, lo: i64, hi: i64| (lo..=hi).contains(&v)),
            )
            .unwrap();
        registry
            .register_custom(
                "oneOf",
                Predicate::variadic(|v: crate::Scalar, set: Vec<String>| {
                    set.iter().any(|s| s == v.as_str())
                }),
            )
            .unwrap();
        registry
            .register_custom(
                "exactly",
                Predicate::unary(|v: String, expected: String| v == expected),
            )
            .unwrap();
        registry
    }

    #[test]
    fn arity_is_checked_before_coercion() {
        let err = registry()
            .invoke("between", &json!(5), &[json!("x")])
            .unwrap_err();
        assert!(matches!(
            err,
            RuleError::ArityMismatch { expected: 2, got: 1, variadic: false, .. }
        ));
    }

    #[test]
    fn coercion_failure_reports_index() {
        let err = registry()
            .invoke("between", &json!(5), &[json!("1"), json!("ten")])
            .unwrap_err();
        match err {
            RuleError::TypeCoercion {
                rule,
                index,
                expected,
                actual,
            } => {
                assert_eq!(rule, "between");
                assert_eq!(index, 1);
                assert_eq!(expected, "integer");
                assert_eq!(actual, "string \"ten\"");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn subject_is_not_converted() {
        let err = registry()
            .invoke("between", &json!("5"), &[json!("1"), json!("10")])
            .unwrap_err();
        assert!(matches!(
            err,
            RuleError::SubjectTypeMismatch { expected: "integer", actual: "string", .. }
        ));
    }

    #[test]
    fn unknown_rule_keeps_callers_name() {
        let err = registry().invoke("nope", &json!(1), &[]).unwrap_err();
        assert!(matches!(err, RuleError::UnknownRule(ref name) if name == "nope"));
    }

    #[test]
    fn variadic_accepts_empty_tail() {
        let registry = registry();
        assert!(!registry.invoke("oneOf", &json!("a"), &[]).unwrap());
        assert!(registry.invoke_text("oneOf", &json!(2), &["1", "2"]).unwrap());
    }

    #[test]
    fn predicate_errors_are_wrapped() {
        let registry = Registry::new();
        let sig = Signature::new(SubjectKind::Any).param(ParamKind::String);
        registry
            .register_custom(
                "fails",
                Predicate::dynamic(sig, |_, _| Err("boom".into())),
            )
            .unwrap();
        let err = registry.invoke("fails", &json!(1), &[json!("x")]).unwrap_err();
        assert_eq!(err.to_string(), "rule 'fails' failed: boom");
    }

    #[test]
    fn rule_tokens_are_split() {
        let registry = registry();
        assert!(registry.invoke_token(&json!(5), "between:1,10").unwrap());
        assert!(registry.invoke_token(&json!(5), " between : 1 , 10 ").unwrap());
        assert!(registry.invoke_token(&json!("b"), "oneOf:a,b").unwrap());
        assert!(!registry.invoke_token(&json!("b"), "oneOf").unwrap());
        assert!(registry.invoke_token(&json!("a,b"), "exactly:a,b").unwrap());
        assert!(matches!(
            registry.invoke_token(&json!(1), ""),
            Err(RuleError::UnknownRule(ref name)) if name.is_empty()
        ));
    }

    fn typed_registry() -> Registry {
        let registry = Registry::new();
        registry
            .register_custom(
                "closeTo",
                Predicate::binary(|v: f64, target: f64, eps: f64| (v - target).abs() <= eps),
            )
            .unwrap();
        registry
            .register_custom(
                "flagIs",
                Predicate::unary(|v: bool, expected: bool| v == expected),
            )
            .unwrap();
        registry
            .register_custom(
                "tagsInclude",
                Predicate::binary(|v: crate::Scalar, required: String, tags: Vec<String>| {
                    tags.contains(&required) && tags.iter().any(|tag| tag == v.as_str())
                }),
            )
            .unwrap();
        registry
    }

    #[test]
    fn float_boolean_and_string_set_arguments() {
        let registry = typed_registry();
        assert!(registry.invoke("closeTo", &json!(1.05), &[json!("1.0"), json!(0.1)]).unwrap());
        assert!(!registry.invoke("closeTo", &json!(2), &[json!(1), json!("0.5")]).unwrap());
        assert!(registry.invoke("flagIs", &json!(true), &[json!("true")]).unwrap());
        assert!(!registry.invoke("flagIs", &json!(false), &[json!(true)]).unwrap());
        assert!(
            registry
                .invoke("tagsInclude", &json!("b"), &[json!("a"), json!(["a", "b"])])
                .unwrap()
        );
        assert!(
            registry
                .invoke_text("tagsInclude", &json!("c"), &["a", "a,b"])
                .is_ok_and(|verdict| !verdict)
        );
    }

    #[test]
    fn float_boolean_and_string_set_coercion_failures() {
        let registry = typed_registry();

        let err = registry
            .invoke("closeTo", &json!(1.0), &[json!("1.0"), json!("x")])
            .unwrap_err();
        assert!(matches!(
            err,
            RuleError::TypeCoercion { index: 1, expected: "float", .. }
        ));

        let err = registry.invoke("flagIs", &json!(true), &[json!("1")]).unwrap_err();
        match err {
            RuleError::TypeCoercion {
                index,
                expected,
                actual,
                ..
            } => {
                assert_eq!(index, 0);
                assert_eq!(expected, "boolean");
                assert_eq!(actual, "string \"1\"");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = registry
            .invoke("tagsInclude", &json!("a"), &[json!("a"), json!(["a", {}])])
            .unwrap_err();
        match err {
            RuleError::TypeCoercion {
                index,
                expected,
                actual,
                ..
            } => {
                assert_eq!(index, 1);
                assert_eq!(expected, "string-set");
                assert_eq!(actual, "element 1: object");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn subject_mismatch_message_names_the_kind() {
        let err = registry()
            .invoke("between", &json!(u64::MAX), &[json!("1"), json!("10")])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "rule 'between' expects subject of kind integer, got unsigned integer"
        );
    }
}
