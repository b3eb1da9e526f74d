//! Parameter schema of a rule: subject kind, argument kinds, arity.
//!
//! A [`Signature`] is computed once, when a [`Predicate`](crate::Predicate)
//! is built, and checked when it is registered. Dispatch only ever reads it.

use std::fmt;

use serde_json::Value;

/// Maximum number of declared parameters after the subject.
pub const MAX_PARAMS: usize = 8;

// ============================================================================
// PARAMETER KIND
// ============================================================================

/// Declared type of a rule argument after coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Signed 64-bit integer.
    Integer,
    /// 64-bit float.
    Float,
    /// `true` / `false`.
    Boolean,
    /// Text, passed through unchanged.
    String,
    /// A set of strings (JSON array or comma-separated text).
    StringSet,
}

impl ParamKind {
    /// Name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::StringSet => "string-set",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// SUBJECT KIND
// ============================================================================

/// Shape of subject value a predicate accepts as its first parameter.
///
/// Subjects are never converted between shapes: the text `"5"` is not an
/// [`Integer`](SubjectKind::Integer) subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubjectKind {
    /// Any JSON value; the predicate inspects it itself.
    Any,
    /// A JSON integer representable as `i64`.
    Integer,
    /// Any JSON number.
    Float,
    /// A JSON boolean.
    Boolean,
    /// A JSON string.
    String,
    /// A string, number or boolean, seen through its canonical text.
    Scalar,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
    /// A string, array or object: something with a length and members.
    Container,
}

impl SubjectKind {
    /// Name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Scalar => "scalar",
            Self::Array => "array",
            Self::Object => "object",
            Self::Container => "container",
        }
    }

    /// Whether `value` has a shape this kind accepts.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::Integer => value.as_i64().is_some(),
            Self::Float => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::String => value.is_string(),
            Self::Scalar => value.is_string() || value.is_number() || value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
            Self::Container => value.is_string() || value.is_array() || value.is_object(),
        }
    }
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// COERCED ARGUMENT
// ============================================================================

/// A raw argument after coercion to its declared [`ParamKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Coerced integer.
    Integer(i64),
    /// Coerced float.
    Float(f64),
    /// Coerced boolean.
    Boolean(bool),
    /// Text argument.
    String(String),
    /// Set of text values.
    StringSet(Vec<String>),
}

impl Arg {
    /// The kind this argument was coerced to.
    pub fn kind(&self) -> ParamKind {
        match self {
            Self::Integer(_) => ParamKind::Integer,
            Self::Float(_) => ParamKind::Float,
            Self::Boolean(_) => ParamKind::Boolean,
            Self::String(_) => ParamKind::String,
            Self::StringSet(_) => ParamKind::StringSet,
        }
    }

    /// Integer payload, if this is an integer argument.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Float payload, if this is a float argument.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Text payload, if this is a string argument.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

// ============================================================================
// SIGNATURE
// ============================================================================

/// The parameter schema of a rule.
///
/// Built with [`Signature::new`] followed by [`param`](Signature::param)
/// calls and at most one trailing [`variadic`](Signature::variadic) call.
///
/// ```
/// use rulebook_validator::{ParamKind, Signature, SubjectKind};
///
/// let sig = Signature::new(SubjectKind::Integer)
///     .param(ParamKind::Integer)
///     .param(ParamKind::Integer);
/// assert_eq!(sig.min_args(), 2);
/// assert!(sig.accepts_arity(2));
/// assert!(!sig.accepts_arity(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    subject: SubjectKind,
    params: Vec<ParamKind>,
    variadic: bool,
    fallible: bool,
    misordered: bool,
}

impl Signature {
    /// Starts a signature with the given subject kind and no parameters.
    pub fn new(subject: SubjectKind) -> Self {
        Self {
            subject,
            params: Vec::new(),
            variadic: false,
            fallible: false,
            misordered: false,
        }
    }

    /// Appends a fixed parameter.
    pub fn param(mut self, kind: ParamKind) -> Self {
        if self.variadic {
            self.misordered = true;
        }
        self.params.push(kind);
        self
    }

    /// Appends the trailing variadic parameter.
    pub fn variadic(mut self, kind: ParamKind) -> Self {
        if self.variadic {
            self.misordered = true;
        }
        self.params.push(kind);
        self.variadic = true;
        self
    }

    /// Marks the predicate as returning `Result<bool, E>`.
    pub fn fallible(mut self) -> Self {
        self.fallible = true;
        self
    }

    /// Subject kind.
    pub fn subject(&self) -> SubjectKind {
        self.subject
    }

    /// Parameter kinds after the subject; the last one repeats when variadic.
    pub fn params(&self) -> &[ParamKind] {
        &self.params
    }

    /// Whether the last parameter accepts zero or more values.
    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    /// Whether the predicate can report an error instead of a verdict.
    pub fn is_fallible(&self) -> bool {
        self.fallible
    }

    /// Smallest accepted number of raw arguments.
    pub fn min_args(&self) -> usize {
        if self.variadic {
            self.params.len() - 1
        } else {
            self.params.len()
        }
    }

    /// Whether `count` raw arguments satisfy this signature.
    pub fn accepts_arity(&self, count: usize) -> bool {
        if self.variadic {
            count >= self.min_args()
        } else {
            count == self.params.len()
        }
    }

    /// Declared kind of the argument at `index` (the variadic kind repeats).
    pub fn kind_at(&self, index: usize) -> Option<ParamKind> {
        match self.params.get(index) {
            Some(kind) => Some(*kind),
            None if self.variadic => self.params.last().copied(),
            None => None,
        }
    }

    /// Rejects shapes outside the supported calling convention.
    pub(crate) fn check(&self) -> Result<(), &'static str> {
        if self.misordered {
            return Err("only the last parameter may be variadic");
        }
        if self.params.len() > MAX_PARAMS {
            return Err("too many parameters");
        }
        if self.variadic && self.params.last() == Some(&ParamKind::StringSet) {
            return Err("a variadic parameter cannot be a string-set");
        }
        Ok(())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.subject)?;
        let last = self.params.len().saturating_sub(1);
        for (i, kind) in self.params.iter().enumerate() {
            if self.variadic && i == last {
                write!(f, ", ...{kind}")?;
            } else {
                write!(f, ", {kind}")?;
            }
        }
        if self.fallible {
            f.write_str(") -> (bool, error)")
        } else {
            f.write_str(") -> bool")
        }
    }
}
