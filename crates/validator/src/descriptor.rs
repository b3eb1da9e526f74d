//! Registry record for one rule.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{RuleError, RuleResult};
use crate::predicate::{CallError, Callable, Predicate};
use crate::signature::{Arg, ParamKind, Signature, SubjectKind};

/// A registered rule: canonical name, origin and frozen signature.
///
/// Descriptors are immutable and shared as `Arc<RuleDescriptor>`; replacing a
/// rule publishes a new descriptor rather than mutating the old one.
pub struct RuleDescriptor {
    name: String,
    is_builtin: bool,
    signature: Signature,
    callable: Arc<Callable>,
}

impl RuleDescriptor {
    /// Freezes a predicate under `name`, rejecting unsupported signatures.
    pub(crate) fn new(name: String, predicate: Predicate, is_builtin: bool) -> RuleResult<Self> {
        let (signature, callable) = predicate.into_parts();
        if name.is_empty() {
            return Err(RuleError::invalid_signature(name, "rule name must not be empty"));
        }
        if let Err(reason) = signature.check() {
            return Err(RuleError::invalid_signature(name, reason));
        }
        Ok(Self {
            name,
            is_builtin,
            signature,
            callable,
        })
    }

    /// Canonical rule name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this rule ships with the library.
    pub fn is_builtin(&self) -> bool {
        self.is_builtin
    }

    /// Full parameter schema.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Kinds of the arguments after the subject.
    pub fn param_kinds(&self) -> &[ParamKind] {
        self.signature.params()
    }

    /// Whether the last parameter is variadic.
    pub fn is_variadic(&self) -> bool {
        self.signature.is_variadic()
    }

    /// Subject shape the rule accepts.
    pub fn subject_kind(&self) -> SubjectKind {
        self.signature.subject()
    }

    pub(crate) fn call(&self, subject: &Value, args: Vec<Arg>) -> Result<bool, CallError> {
        (self.callable)(subject, args)
    }
}

impl fmt::Debug for RuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDescriptor")
            .field("name", &self.name)
            .field("is_builtin", &self.is_builtin)
            .field("signature", &self.signature.to_string())
            .finish_non_exhaustive()
    }
}
