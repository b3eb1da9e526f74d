//! # rulebook-validator
//!
//! A rule-dispatch engine for data validation: a registry that maps rule
//! names (and their aliases) to typed predicates, and a dispatcher that
//! applies a rule to a subject value with loosely-typed arguments.
//!
//! ## Quick Start
//!
//! ```rust
//! use rulebook_validator::prelude::*;
//! use serde_json::json;
//!
//! let registry = Registry::with_builtins();
//!
//! assert!(registry.invoke("between", &json!(5), &[json!("1"), json!("10")])?);
//! assert!(registry.invoke_text("in", &json!("red"), &["red", "green"])?);
//! assert!(registry.invoke_token(&json!("user@example.com"), "email")?);
//!
//! // Errors are a separate channel from a `false` verdict.
//! let err = registry.invoke("min", &json!("not-a-number"), &[json!("3")]).unwrap_err();
//! assert_eq!(err.code(), "subject_type_mismatch");
//! # Ok::<(), RuleError>(())
//! ```
//!
//! ## Custom Rules
//!
//! Predicates are plain Rust functions or closures. Their parameter schema is
//! derived from the function type, once, by the [`Predicate`] constructors:
//!
//! ```rust
//! use rulebook_validator::prelude::*;
//! use serde_json::json;
//!
//! let registry = Registry::builder()
//!     .rule("divisibleBy", Predicate::unary(|n: i64, d: i64| d != 0 && n % d == 0))
//!     .alias("multipleOf", "divisibleBy")
//!     .build()?;
//!
//! assert!(registry.invoke_text("multipleOf", &json!(12), &["4"])?);
//! # Ok::<(), RuleError>(())
//! ```
//!
//! ## Registries
//!
//! - [`Registry`] holds canonical names; reads are lock-free, writes are
//!   serialized and published atomically.
//! - [`AliasTable`] maps alternate names onto canonical ones and is fixed when
//!   the registry is built.
//! - [`global()`] is a process-wide registry with the built-ins installed; the
//!   free functions [`register_builtin`], [`register_custom`], [`invoke`] and
//!   [`is_registered`] operate on it.

mod alias;
#[cfg(feature = "builtins")]
mod builtins;
mod coerce;
mod config;
mod descriptor;
mod dispatch;
mod error;
mod predicate;
pub mod prelude;
mod registry;
mod signature;
mod value;

pub use alias::AliasTable;
pub use config::{RegistryConfig, ShadowPolicy};
pub use descriptor::RuleDescriptor;
pub use error::{BoxError, RuleError, RuleResult};
pub use predicate::{Container, FromArg, FromSubject, Predicate, PredicateOutput, Scalar};
pub use registry::{Registry, RegistryBuilder, global};
pub use signature::{Arg, MAX_PARAMS, ParamKind, Signature, SubjectKind};
pub use value::{is_zero_value, scalar_text, value_type_name};

use serde_json::Value;

/// Registers a built-in rule in the [`global()`] registry.
pub fn register_builtin(name: impl Into<String>, predicate: Predicate) -> RuleResult<()> {
    global().register_builtin(name, predicate)
}

/// Registers a user rule in the [`global()`] registry.
pub fn register_custom(name: impl Into<String>, predicate: Predicate) -> RuleResult<()> {
    global().register_custom(name, predicate)
}

/// Applies a rule from the [`global()`] registry.
pub fn invoke(rule_name: &str, subject: &Value, raw_args: &[Value]) -> RuleResult<bool> {
    global().invoke(rule_name, subject, raw_args)
}

/// Whether the [`global()`] registry knows `name` (canonical or alias).
pub fn is_registered(name: &str) -> bool {
    global().is_registered(name)
}
