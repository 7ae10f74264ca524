use core::fmt;
use std::sync::Arc;

use super::{Arity, Callable, Object};
use crate::evaluator::EvalErrorKind;
use crate::guard;

/// A runtime value.
///
/// All variants are cheap to clone: strings, arrays, objects and callables
/// are reference counted and never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    String(Arc<str>),
    Boolean(bool),
    Array(Arc<[Value]>),
    Object(Object),
    Callable(Callable),
}

static_assertions::assert_impl_all!(Value: Send, Sync);

impl Value {
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::String(s.into())
    }

    pub fn array(items: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    /// Build an object value from `(name, value)` pairs.
    ///
    /// ```
    /// use sieve_core::values::Value;
    ///
    /// let user = Value::object([("name", Value::from("ada")), ("age", Value::from(36))]);
    /// assert_eq!(user.member("age").unwrap(), Value::Number(36.0));
    /// assert!(user.member("__proto__").is_err());
    /// ```
    pub fn object<K: Into<String>, V: Into<Value>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        Value::Object(entries.into_iter().collect())
    }

    /// Wrap a Rust closure as a callable value. See [`Callable::native`].
    pub fn function<F>(name: impl Into<String>, arity: Arity, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, EvalErrorKind> + Send + Sync + 'static,
    {
        Value::Callable(Callable::native(name, arity, func))
    }

    /// Name of the value's type as shown in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Callable(_) => "function",
        }
    }

    /// `false`, `0`, `NaN` and the empty string are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Boolean(b) => *b,
            Value::Array(_) | Value::Object(_) | Value::Callable(_) => true,
        }
    }

    /// Guarded member read.
    ///
    /// The member check runs first, for every receiver type, so a denied
    /// name fails the same way whether or not the receiver is an object.
    pub fn member(&self, name: &str) -> Result<Value, EvalErrorKind> {
        guard::check_member(name)?;
        match self {
            Value::Object(obj) => obj.member(name).cloned(),
            other => Err(EvalErrorKind::TypeMismatch {
                message: format!("cannot read member `{name}` of a {}", other.type_name()),
            }),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Value::Callable(c) => Some(c),
            _ => None,
        }
    }

    /// Formatting used inside arrays and objects, where strings are quoted.
    pub(crate) fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", &**s),
            other => write!(f, "{other}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) if n.is_infinite() => {
                write!(f, "{}", if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    item.fmt_nested(f)?;
                }
                write!(f, "]")
            }
            Value::Object(obj) => write!(f, "{obj}"),
            Value::Callable(c) => write!(f, "{c}"),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n.into())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items.into())
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}

impl From<Callable> for Value {
    fn from(c: Callable) -> Self {
        Value::Callable(c)
    }
}
