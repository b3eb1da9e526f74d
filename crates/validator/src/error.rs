//! Error types for rule registration and dispatch.
//!
//! Registration-time errors ([`Conflict`](RuleError::Conflict),
//! [`InvalidSignature`](RuleError::InvalidSignature),
//! [`InvalidAlias`](RuleError::InvalidAlias)) leave the registry untouched.
//! Invocation-time errors are a separate channel from a `false` verdict: a
//! rule that could not be applied never reports as "did not pass".

/// Boxed error a fallible predicate may return alongside its verdict.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout the crate.
pub type RuleResult<T> = Result<T, RuleError>;

/// Errors produced by the registry and the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// No descriptor is registered under the name (after alias resolution).
    #[error("unknown rule '{0}'")]
    UnknownRule(String),

    /// A registration would override an entry the registry protects.
    #[error("cannot register rule '{name}': {reason}")]
    Conflict {
        /// The rule name being registered.
        name: String,
        /// Why the registration was refused.
        reason: String,
    },

    /// The predicate's shape is outside the supported calling convention.
    #[error("invalid signature for rule '{name}': {reason}")]
    InvalidSignature {
        /// The rule name being registered.
        name: String,
        /// Which part of the signature is unsupported.
        reason: String,
    },

    /// An alias points at a missing rule or at another alias.
    #[error("invalid alias '{alias}' -> '{target}': {reason}")]
    InvalidAlias {
        /// The alias key.
        alias: String,
        /// The canonical name it maps to.
        target: String,
        /// What is wrong with the mapping.
        reason: &'static str,
    },

    /// Wrong number of raw arguments for the resolved rule.
    #[error(
        "rule '{rule}' expects {}{expected} argument(s), got {got}",
        at_least(.variadic)
    )]
    ArityMismatch {
        /// Canonical rule name.
        rule: String,
        /// Required argument count (the minimum when `variadic`).
        expected: usize,
        /// Number of raw arguments supplied.
        got: usize,
        /// Whether the rule accepts extra trailing arguments.
        variadic: bool,
    },

    /// A raw argument could not be converted to its declared kind.
    #[error("rule '{rule}' argument {index}: expected {expected}, got {actual}")]
    TypeCoercion {
        /// Canonical rule name.
        rule: String,
        /// Zero-based position of the offending argument.
        index: usize,
        /// Name of the declared parameter kind.
        expected: &'static str,
        /// Description of the value that was supplied.
        actual: String,
    },

    /// The subject value has a shape the rule does not accept.
    #[error("rule '{rule}' expects subject of kind {expected}, got {actual}")]
    SubjectTypeMismatch {
        /// Canonical rule name.
        rule: String,
        /// Name of the subject kind the predicate accepts.
        expected: &'static str,
        /// JSON type name of the supplied subject.
        actual: &'static str,
    },

    /// The predicate itself reported an error instead of a verdict.
    #[error("rule '{rule}' failed: {cause}")]
    PredicateError {
        /// Canonical rule name.
        rule: String,
        /// The error returned by the predicate.
        #[source]
        cause: BoxError,
    },
}

fn at_least(variadic: &bool) -> &'static str {
    if *variadic { "at least " } else { "" }
}

impl RuleError {
    /// Stable machine-readable code, suitable for message catalogs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownRule(_) => "unknown_rule",
            Self::Conflict { .. } => "conflict",
            Self::InvalidSignature { .. } => "invalid_signature",
            Self::InvalidAlias { .. } => "invalid_alias",
            Self::ArityMismatch { .. } => "arity_mismatch",
            Self::TypeCoercion { .. } => "type_coercion",
            Self::SubjectTypeMismatch { .. } => "subject_type_mismatch",
            Self::PredicateError { .. } => "predicate_error",
        }
    }

    /// Returns `true` for errors raised while applying a resolved rule.
    ///
    /// These are the errors an orchestration layer may choose to report as a
    /// failed field; everything else points at a misconfigured rule set.
    pub fn is_invocation_error(&self) -> bool {
        matches!(
            self,
            Self::ArityMismatch { .. }
                | Self::TypeCoercion { .. }
                | Self::SubjectTypeMismatch { .. }
                | Self::PredicateError { .. }
        )
    }

    pub(crate) fn conflict(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Conflict {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_signature(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSignature {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
