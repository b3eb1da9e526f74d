//! Prelude module for convenient imports.
//!
//! ```rust
//! use rulebook_validator::prelude::*;
//!
//! let registry = Registry::new();
//! registry.register_custom("isTrue", Predicate::nullary(|b: bool| b))?;
//! # Ok::<(), RuleError>(())
//! ```

// ============================================================================
// REGISTRY
// ============================================================================

pub use crate::{
    AliasTable, Registry, RegistryBuilder, RegistryConfig, RuleDescriptor, ShadowPolicy, global,
};

// ============================================================================
// PREDICATES
// ============================================================================

pub use crate::{
    Arg, Container, FromArg, FromSubject, ParamKind, Predicate, PredicateOutput, Scalar, Signature,
    SubjectKind,
};

// ============================================================================
// ERRORS
// ============================================================================

pub use crate::{BoxError, RuleError, RuleResult};
