//! Scope stack for local variable bindings.
//!
//! Supports two kinds of scopes through a unified `Scope` trait:
//! - **Complete scopes**: Immutable, pre-populated (closure captures)
//! - **Local scopes**: Mutable, filled by assignments and parameters
//!
//! The evaluator starts every evaluation with a single local scope. Closure
//! calls run on a fresh stack holding the closure's captures plus one local
//! scope for its parameters, so a body never sees its caller's locals.

use std::sync::Arc;

use hashbrown::HashMap;
use thiserror::Error;

/// Trait for scopes that can be pushed onto the ScopeStack.
pub trait Scope<T> {
    /// Look up a name in this scope.
    fn lookup(&self, name: &str) -> Option<&T>;

    /// Bind a value to a name in this scope.
    ///
    /// Complete scopes return `BindError::ScopeIsImmutable`.
    fn bind(&mut self, name: &str, value: T) -> Result<(), BindError>;

    /// Visit every binding, in no particular order.
    fn for_each(&self, f: &mut dyn FnMut(&str, &T));
}

/// A complete, immutable scope.
///
/// Bindings are sorted for binary search and shared between clones.
#[derive(Debug)]
pub struct CompleteScope<T>(Arc<[(String, T)]>);

impl<T> Clone for CompleteScope<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> CompleteScope<T> {
    /// Build a scope from arbitrary bindings. Later duplicates win.
    pub fn from_bindings(bindings: impl IntoIterator<Item = (String, T)>) -> Self {
        let mut sorted: Vec<(String, T)> = bindings.into_iter().collect();
        // Reversed so the stable sort puts the latest binding of a name first.
        sorted.reverse();
        sorted.sort_by(|(a, _), (b, _)| a.cmp(b));
        sorted.dedup_by(|(a, _), (b, _)| a == b);
        Self(sorted.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> Scope<T> for CompleteScope<T> {
    fn lookup(&self, name: &str) -> Option<&T> {
        self.0
            .binary_search_by(|(n, _)| n.as_str().cmp(name))
            .ok()
            .map(|idx| &self.0[idx].1)
    }

    fn bind(&mut self, _name: &str, _value: T) -> Result<(), BindError> {
        Err(BindError::ScopeIsImmutable)
    }

    fn for_each(&self, f: &mut dyn FnMut(&str, &T)) {
        for (name, value) in self.0.iter() {
            f(name, value);
        }
    }
}

/// A mutable scope. Binding an existing name replaces its value.
#[derive(Debug)]
pub struct LocalScope<T>(HashMap<String, T>);

impl<T> LocalScope<T> {
    pub fn new() -> Self {
        Self(HashMap::new())
    }
}

impl<T> Default for LocalScope<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(String, T)> for LocalScope<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> Scope<T> for LocalScope<T> {
    fn lookup(&self, name: &str) -> Option<&T> {
        self.0.get(name)
    }

    fn bind(&mut self, name: &str, value: T) -> Result<(), BindError> {
        self.0.insert(name.to_string(), value);
        Ok(())
    }

    fn for_each(&self, f: &mut dyn FnMut(&str, &T)) {
        for (name, value) in &self.0 {
            f(name, value);
        }
    }
}

/// A stack of scopes for variable lookup.
///
/// Maintains a single stack of boxed trait objects, searched from innermost
/// to outermost.
pub struct ScopeStack<T> {
    scopes: Vec<Box<dyn Scope<T>>>,
}

impl<T: Clone + 'static> ScopeStack<T> {
    /// Create a new empty scope stack.
    pub fn new() -> Self {
        Self { scopes: Vec::new() }
    }

    /// Push a scope onto the stack.
    pub fn push<S: Scope<T> + 'static>(&mut self, scope: S) {
        self.scopes.push(Box::new(scope));
    }

    /// Pop the topmost scope from the stack.
    pub fn pop(&mut self) -> Result<(), PopError> {
        self.scopes.pop().ok_or(PopError::EmptyStack)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Look up a name, searching scopes from innermost to outermost.
    pub fn lookup(&self, name: &str) -> Option<&T> {
        self.scopes.iter().rev().find_map(|scope| scope.lookup(name))
    }

    /// Bind a value in the topmost scope.
    pub fn bind_in_current(&mut self, name: &str, value: T) -> Result<(), BindError> {
        self.scopes
            .last_mut()
            .ok_or(BindError::NoScope)?
            .bind(name, value)
    }

    /// Flatten every visible binding into one immutable scope.
    ///
    /// Inner bindings shadow outer ones, exactly as `lookup` would resolve
    /// them at the moment of the call.
    pub fn snapshot(&self) -> CompleteScope<T> {
        let mut bindings = Vec::new();
        for scope in &self.scopes {
            scope.for_each(&mut |name, value| bindings.push((name.to_string(), value.clone())));
        }
        CompleteScope::from_bindings(bindings)
    }
}

impl<T: Clone + 'static> Default for ScopeStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Error when trying to bind a value in a scope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("No scope to bind in")]
    NoScope,
    #[error("Cannot bind in immutable scope")]
    ScopeIsImmutable,
}

/// Error when trying to pop a scope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PopError {
    #[error("Cannot pop from empty scope stack")]
    EmptyStack,
}
