//! Type-erased predicates with a declared parameter schema.
//!
//! A [`Predicate`] pairs a callable with the [`Signature`] derived from its
//! Rust type. Supported shapes form a closed set:
//!
//! | constructor | callable |
//! |---|---|
//! | [`Predicate::nullary`] | `Fn(S) -> O` |
//! | [`Predicate::unary`] | `Fn(S, A) -> O` |
//! | [`Predicate::binary`] | `Fn(S, A, B) -> O` |
//! | [`Predicate::ternary`] | `Fn(S, A, B, C) -> O` |
//! | [`Predicate::variadic`] | `Fn(S, Vec<T>) -> O` |
//! | [`Predicate::variadic_unary`] | `Fn(S, A, Vec<T>) -> O` |
//! | [`Predicate::dynamic`] | `Fn(&Value, &[Arg]) -> Result<bool, BoxError>` |
//!
//! where `S: FromSubject`, `A, B, C, T: FromArg` and `O: PredicateOutput`
//! (`bool` or `Result<bool, E>`).
//!
//! ```
//! use rulebook_validator::Predicate;
//!
//! let between = Predicate::binary(|value: i64, min: i64, max: i64| (min..=max).contains(&value));
//! assert_eq!(between.signature().to_string(), "(integer, integer, integer) -> bool");
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::BoxError;
use crate::signature::{Arg, ParamKind, Signature, SubjectKind};
use crate::value::scalar_text;

// ============================================================================
// CONVERSION TRAITS
// ============================================================================

/// Types a predicate can take as its subject parameter.
pub trait FromSubject: Sized {
    /// Subject shape this type accepts.
    const KIND: SubjectKind;

    /// Converts a subject whose shape `KIND` accepts.
    fn from_subject(value: &Value) -> Option<Self>;
}

/// Types a predicate can take as an argument after the subject.
pub trait FromArg: Sized {
    /// Parameter kind raw arguments are coerced to.
    const KIND: ParamKind;

    /// Extracts the value from a coerced argument of kind `KIND`.
    fn from_arg(arg: Arg) -> Option<Self>;
}

/// Return types a predicate may have.
pub trait PredicateOutput {
    /// Whether this output can carry an error besides the verdict.
    const FALLIBLE: bool;

    /// Normalizes into a verdict or the predicate's own error.
    fn into_verdict(self) -> Result<bool, BoxError>;
}

/// A string, number or boolean subject, seen through its canonical text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scalar(pub String);

impl Scalar {
    /// The canonical text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for Scalar {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

/// A string, array or object subject.
#[derive(Debug, Clone, PartialEq)]
pub enum Container {
    /// A JSON string.
    Text(String),
    /// A JSON array.
    List(Vec<Value>),
    /// A JSON object.
    Map(Map<String, Value>),
}

impl Container {
    /// Chars for text, elements for lists, entries for maps.
    pub fn len(&self) -> usize {
        match self {
            Self::Text(s) => s.chars().count(),
            Self::List(items) => items.len(),
            Self::Map(map) => map.len(),
        }
    }

    /// Whether the container has no chars, elements or entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Substring for text, element (by canonical text) for lists, key for maps.
    pub fn has(&self, needle: &str) -> bool {
        match self {
            Self::Text(s) => s.contains(needle),
            Self::List(items) => items
                .iter()
                .any(|item| scalar_text(item).is_some_and(|text| text == needle)),
            Self::Map(map) => map.contains_key(needle),
        }
    }
}

impl FromSubject for Value {
    const KIND: SubjectKind = SubjectKind::Any;

    fn from_subject(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromSubject for i64 {
    const KIND: SubjectKind = SubjectKind::Integer;

    fn from_subject(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl FromSubject for f64 {
    const KIND: SubjectKind = SubjectKind::Float;

    fn from_subject(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromSubject for bool {
    const KIND: SubjectKind = SubjectKind::Boolean;

    fn from_subject(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromSubject for String {
    const KIND: SubjectKind = SubjectKind::String;

    fn from_subject(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FromSubject for Scalar {
    const KIND: SubjectKind = SubjectKind::Scalar;

    fn from_subject(value: &Value) -> Option<Self> {
        scalar_text(value).map(Scalar)
    }
}

impl FromSubject for Vec<Value> {
    const KIND: SubjectKind = SubjectKind::Array;

    fn from_subject(value: &Value) -> Option<Self> {
        value.as_array().cloned()
    }
}

impl FromSubject for Map<String, Value> {
    const KIND: SubjectKind = SubjectKind::Object;

    fn from_subject(value: &Value) -> Option<Self> {
        value.as_object().cloned()
    }
}

impl FromSubject for Container {
    const KIND: SubjectKind = SubjectKind::Container;

    fn from_subject(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(items) => Some(Self::List(items.clone())),
            Value::Object(map) => Some(Self::Map(map.clone())),
            _ => None,
        }
    }
}

impl FromArg for i64 {
    const KIND: ParamKind = ParamKind::Integer;

    fn from_arg(arg: Arg) -> Option<Self> {
        arg.as_i64()
    }
}

impl FromArg for f64 {
    const KIND: ParamKind = ParamKind::Float;

    fn from_arg(arg: Arg) -> Option<Self> {
        arg.as_f64()
    }
}

impl FromArg for bool {
    const KIND: ParamKind = ParamKind::Boolean;

    fn from_arg(arg: Arg) -> Option<Self> {
        match arg {
            Arg::Boolean(b) => Some(b),
            _ => None,
        }
    }
}

impl FromArg for String {
    const KIND: ParamKind = ParamKind::String;

    fn from_arg(arg: Arg) -> Option<Self> {
        match arg {
            Arg::String(s) => Some(s),
            _ => None,
        }
    }
}

impl FromArg for Vec<String> {
    const KIND: ParamKind = ParamKind::StringSet;

    fn from_arg(arg: Arg) -> Option<Self> {
        match arg {
            Arg::StringSet(items) => Some(items),
            _ => None,
        }
    }
}

impl PredicateOutput for bool {
    const FALLIBLE: bool = false;

    fn into_verdict(self) -> Result<bool, BoxError> {
        Ok(self)
    }
}

impl<E> PredicateOutput for Result<bool, E>
where
    E: Into<BoxError>,
{
    const FALLIBLE: bool = true;

    fn into_verdict(self) -> Result<bool, BoxError> {
        self.map_err(Into::into)
    }
}

// ============================================================================
// CALLABLE
// ============================================================================

/// Why a type-erased call did not produce a verdict.
#[derive(Debug)]
pub(crate) enum CallError {
    /// The subject did not convert to the predicate's subject type.
    Subject,
    /// The coerced argument at this position did not match its parameter.
    Argument(usize),
    /// The predicate returned an error.
    Predicate(BoxError),
}

pub(crate) type Callable = dyn Fn(&Value, Vec<Arg>) -> Result<bool, CallError> + Send + Sync;

/// Walks coerced arguments in declaration order.
struct ArgCursor {
    args: std::vec::IntoIter<Arg>,
    index: usize,
}

impl ArgCursor {
    fn new(args: Vec<Arg>) -> Self {
        Self {
            args: args.into_iter(),
            index: 0,
        }
    }

    fn next<T: FromArg>(&mut self) -> Result<T, CallError> {
        let index = self.index;
        self.index += 1;
        self.args
            .next()
            .and_then(T::from_arg)
            .ok_or(CallError::Argument(index))
    }

    fn rest<T: FromArg>(self) -> Result<Vec<T>, CallError> {
        let start = self.index;
        self.args
            .enumerate()
            .map(|(offset, arg)| T::from_arg(arg).ok_or(CallError::Argument(start + offset)))
            .collect()
    }
}

fn subject<S: FromSubject>(value: &Value) -> Result<S, CallError> {
    S::from_subject(value).ok_or(CallError::Subject)
}

fn verdict<O: PredicateOutput>(output: O) -> Result<bool, CallError> {
    output.into_verdict().map_err(CallError::Predicate)
}

fn output_signature<O: PredicateOutput>(signature: Signature) -> Signature {
    if O::FALLIBLE {
        signature.fallible()
    } else {
        signature
    }
}

// ============================================================================
// PREDICATE
// ============================================================================

/// A validator callable together with its derived [`Signature`].
#[derive(Clone)]
pub struct Predicate {
    signature: Signature,
    callable: Arc<Callable>,
}

macro_rules! fixed_arity {
    ($(#[$meta:meta])* $name:ident($($arg:ident: $ty:ident),*)) => {
        $(#[$meta])*
        pub fn $name<F, S, $($ty,)* O>(f: F) -> Self
        where
            F: Fn(S $(, $ty)*) -> O + Send + Sync + 'static,
            S: FromSubject + 'static,
            $($ty: FromArg + 'static,)*
            O: PredicateOutput + 'static,
        {
            let signature = Signature::new(S::KIND)$(.param(<$ty as FromArg>::KIND))*;
            let callable = move |value: &Value, args: Vec<Arg>| -> Result<bool, CallError> {
                #[allow(unused_mut, unused_variables)]
                let mut cursor = ArgCursor::new(args);
                $(let $arg = cursor.next::<$ty>()?;)*
                verdict(f(subject::<S>(value)? $(, $arg)*))
            };
            Self {
                signature: output_signature::<O>(signature),
                callable: Arc::new(callable),
            }
        }
    };
}

impl Predicate {
    fixed_arity! {
        /// A predicate over the subject alone.
        nullary()
    }

    fixed_arity! {
        /// A predicate with one argument after the subject.
        unary(a: A)
    }

    fixed_arity! {
        /// A predicate with two arguments after the subject.
        binary(a: A, b: B)
    }

    fixed_arity! {
        /// A predicate with three arguments after the subject.
        ternary(a: A, b: B, c: C)
    }

    /// A predicate taking zero or more arguments of one kind.
    pub fn variadic<F, S, T, O>(f: F) -> Self
    where
        F: Fn(S, Vec<T>) -> O + Send + Sync + 'static,
        S: FromSubject + 'static,
        T: FromArg + 'static,
        O: PredicateOutput + 'static,
    {
        let signature = Signature::new(S::KIND).variadic(T::KIND);
        let callable = move |value: &Value, args: Vec<Arg>| -> Result<bool, CallError> {
            let rest = ArgCursor::new(args).rest::<T>()?;
            verdict(f(subject::<S>(value)?, rest))
        };
        Self {
            signature: output_signature::<O>(signature),
            callable: Arc::new(callable),
        }
    }

    /// A predicate with one fixed argument followed by a variadic tail.
    pub fn variadic_unary<F, S, A, T, O>(f: F) -> Self
    where
        F: Fn(S, A, Vec<T>) -> O + Send + Sync + 'static,
        S: FromSubject + 'static,
        A: FromArg + 'static,
        T: FromArg + 'static,
        O: PredicateOutput + 'static,
    {
        let signature = Signature::new(S::KIND).param(A::KIND).variadic(T::KIND);
        let callable = move |value: &Value, args: Vec<Arg>| -> Result<bool, CallError> {
            let mut cursor = ArgCursor::new(args);
            let first = cursor.next::<A>()?;
            let rest = cursor.rest::<T>()?;
            verdict(f(subject::<S>(value)?, first, rest))
        };
        Self {
            signature: output_signature::<O>(signature),
            callable: Arc::new(callable),
        }
    }

    /// A predicate whose shape is declared at runtime.
    ///
    /// The callable receives the raw subject and the coerced arguments. The
    /// declared signature is checked when the predicate is registered; its
    /// subject kind is enforced before every call. Dynamic predicates are
    /// always fallible.
    pub fn dynamic<F>(signature: Signature, f: F) -> Self
    where
        F: Fn(&Value, &[Arg]) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        let callable = move |value: &Value, args: Vec<Arg>| -> Result<bool, CallError> {
            f(value, &args).map_err(CallError::Predicate)
        };
        Self {
            signature: signature.fallible(),
            callable: Arc::new(callable),
        }
    }

    /// The derived parameter schema.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub(crate) fn into_parts(self) -> (Signature, Arc<Callable>) {
        (self.signature, self.callable)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}
