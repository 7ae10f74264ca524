//! Context builder for the values an expression is evaluated against.

use std::collections::BTreeMap;

use crate::values::Value;

/// Named values supplied by the host for one evaluation.
///
/// The context is read-only to expressions: assignments bind local names
/// that shadow context entries for the rest of the evaluation, and never
/// write back. Nothing in the context is trusted. Placing a callable here
/// makes it *visible* to expressions, but only callables registered with
/// the engine (or built-ins) can actually be invoked.
///
/// # Example
///
/// ```
/// use sieve_core::api::Context;
/// use sieve_core::values::Value;
///
/// let context = Context::new()
///     .with("x", 3)
///     .with("user", Value::object([("name", "ada")]));
/// assert_eq!(context.get("x"), Some(&Value::Number(3.0)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    values: BTreeMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add a value, returning the one previously stored under `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
