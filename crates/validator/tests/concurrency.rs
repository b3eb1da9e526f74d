//! Readers racing a writer never see a torn descriptor.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use rulebook_validator::prelude::*;
use serde_json::json;

const READERS: usize = 8;
const WRITES: usize = 200;

/// Every replacement is equivalent, so readers must always see `Ok(true)`.
#[test]
fn invoke_during_replacement() {
    let registry = Registry::new();
    registry
        .register_custom("gen", Predicate::unary(|n: i64, g: i64| n == g))
        .unwrap();
    let done = AtomicBool::new(false);

    thread::scope(|scope| {
        for _ in 0..READERS {
            scope.spawn(|| {
                let mut calls = 0_u64;
                while !done.load(Ordering::Relaxed) || calls == 0 {
                    let result = registry.invoke_text("gen", &json!(1), &["1"]);
                    assert!(matches!(result, Ok(true)), "{result:?}");
                    calls += 1;
                }
            });
        }

        scope.spawn(|| {
            for i in 0..WRITES {
                let predicate = if i % 2 == 0 {
                    Predicate::unary(|n: i64, g: i64| n == g)
                } else {
                    Predicate::unary(|n: i64, g: i64| g == n)
                };
                registry.register_custom("gen", predicate).unwrap();
            }
            done.store(true, Ordering::Relaxed);
        });
    });

    assert_eq!(registry.len(), 1);
}

#[test]
fn signature_and_callable_swap_together() {
    let registry = Registry::new();
    registry
        .register_custom("shape", Predicate::nullary(|n: i64| n >= 0))
        .unwrap();
    let done = AtomicBool::new(false);

    thread::scope(|scope| {
        for _ in 0..READERS {
            scope.spawn(|| {
                while !done.load(Ordering::Relaxed) {
                    let descriptor = registry.lookup("shape").unwrap();
                    let arity = descriptor.param_kinds().len();
                    let args: Vec<&str> = (0..arity).map(|_| "0").collect();
                    // lookup and invoke load separate snapshots, so an arity
                    // mismatch is a legal outcome; a coercion error is not
                    match registry.invoke_text("shape", &json!(5), &args) {
                        Ok(_) | Err(RuleError::ArityMismatch { .. }) => {}
                        Err(other) => panic!("torn read: {other}"),
                    }
                }
            });
        }

        scope.spawn(|| {
            for i in 0..WRITES {
                let predicate = if i % 2 == 0 {
                    Predicate::unary(|n: i64, min: i64| n >= min)
                } else {
                    Predicate::nullary(|n: i64| n >= 0)
                };
                registry.register_custom("shape", predicate).unwrap();
            }
            done.store(true, Ordering::Relaxed);
        });
    });
}

#[cfg(feature = "builtins")]
#[test]
fn global_registry_is_shared_across_threads() {
    thread::scope(|scope| {
        for i in 0..READERS {
            scope.spawn(move || {
                let value = json!(i);
                assert!(rulebook_validator::invoke("min", &value, &[json!("0")]).unwrap());
            });
        }
    });
}
