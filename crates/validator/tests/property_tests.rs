//! Property-based tests for rulebook-validator.

#![cfg(feature = "builtins")]

use proptest::prelude::*;
use rulebook_validator::prelude::*;
use serde_json::json;

// ============================================================================
// ALIAS RESOLUTION
// ============================================================================

proptest! {
    #[test]
    fn resolve_is_identity_for_non_aliases(name in "[a-zA-Z_]{1,24}") {
        let registry = global();
        prop_assume!(!registry.aliases().contains(&name));
        prop_assert_eq!(registry.resolve(&name), name.as_str());
    }

    #[test]
    fn resolve_is_idempotent(name in "[a-zA-Z_]{1,24}") {
        let registry = global();
        let once = registry.resolve(&name);
        prop_assert_eq!(registry.resolve(once), once);
    }
}

// ============================================================================
// DISPATCH TOTALITY: never panics, errors are typed
// ============================================================================

proptest! {
    #[test]
    fn integer_arguments_coerce_or_fail_typed(arg in ".{0,12}") {
        let result = global().invoke_text("min", &json!(0), &[arg.as_str()]);
        match result {
            Ok(verdict) => {
                let bound: i64 = arg.parse().unwrap();
                prop_assert_eq!(verdict, 0 >= bound);
            }
            Err(err) => {
                let is_coercion = matches!(err, RuleError::TypeCoercion { index: 0, .. });
                prop_assert!(is_coercion);
            }
        }
    }

    #[test]
    fn between_matches_range(n in any::<i64>(), lo in -1000_i64..1000, hi in -1000_i64..1000) {
        let (lo_s, hi_s) = (lo.to_string(), hi.to_string());
        let verdict = global()
            .invoke_text("between", &json!(n), &[lo_s.as_str(), hi_s.as_str()])
            .unwrap();
        prop_assert_eq!(verdict, lo <= n && n <= hi);
    }

    #[test]
    fn enum_and_not_in_are_complementary(value in "[a-z]{1,4}", set in prop::collection::vec("[a-z]{1,4}", 0..6)) {
        let args: Vec<&str> = set.iter().map(String::as_str).collect();
        let subject = json!(value);
        let inside = global().invoke_text("enum", &subject, &args).unwrap();
        let outside = global().invoke_text("notIn", &subject, &args).unwrap();
        prop_assert_ne!(inside, outside);
        prop_assert_eq!(inside, set.contains(&value));
    }

    #[test]
    fn arity_is_exact_for_fixed_rules(extra in 0_usize..5) {
        let args: Vec<&str> = vec!["1"; extra];
        let result = global().invoke_text("between", &json!(1), &args);
        if extra == 2 {
            prop_assert!(result.is_ok());
        } else {
            let is_arity = matches!(result, Err(RuleError::ArityMismatch { expected: 2, .. }));
            prop_assert!(is_arity);
        }
    }
}
