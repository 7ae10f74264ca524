//! Callable values.
//!
//! Every [`Callable`] carries a [`FunctionId`] assigned when it is created.
//! Clones share the id; wrapping the same Rust closure twice yields two
//! distinct ids. The id is the callable's identity for the trust checks in
//! [`crate::guard`], so re-binding a callable under another name, or reaching
//! it through some object path, never changes whether it may be invoked.

use core::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Value;
use super::lambda::LambdaFunction;
use crate::evaluator::EvalErrorKind;

static NEXT_FUNCTION_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a callable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(u64);

impl FunctionId {
    fn fresh() -> Self {
        Self(NEXT_FUNCTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Signature expected for Rust functions that will be called from expressions.
///
/// Arguments have already been counted against the callable's [`Arity`].
///
/// # Example
///
/// ```ignore
/// fn double(args: &[Value]) -> Result<Value, EvalErrorKind> {
///     let n = expect_number("double", &args[0])?;
///     Ok(Value::Number(n * 2.0))
/// }
/// ```
pub type NativeFn = dyn Fn(&[Value]) -> Result<Value, EvalErrorKind> + Send + Sync;

/// Number of arguments a callable accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Wrapper for native Rust functions.
pub struct NativeFunction {
    func: Box<NativeFn>,
}

impl NativeFunction {
    pub fn call(&self, args: &[Value]) -> Result<Value, EvalErrorKind> {
        (self.func)(args)
    }
}

pub(crate) enum FunctionKind {
    Native(NativeFunction),
    Lambda(LambdaFunction),
}

struct CallableInner {
    id: FunctionId,
    name: String,
    arity: Arity,
    kind: FunctionKind,
}

/// A function value: a host-supplied native function or a closure created by
/// a local function definition.
#[derive(Clone)]
pub struct Callable(Arc<CallableInner>);

impl Callable {
    /// Wrap a Rust closure as a callable with a fresh identity.
    ///
    /// A fresh callable is *not* trusted: it can only be invoked from an
    /// expression after it has been registered with the engine.
    ///
    /// # Example
    ///
    /// ```
    /// use sieve_core::values::{Arity, Callable, Value};
    ///
    /// let double = Callable::native("double", Arity::Exact(1), |args| {
    ///     Ok(Value::Number(args[0].as_number().unwrap_or(0.0) * 2.0))
    /// });
    /// assert_eq!(double.name(), "double");
    /// assert_eq!(double.clone().id(), double.id());
    /// ```
    pub fn native<F>(name: impl Into<String>, arity: Arity, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, EvalErrorKind> + Send + Sync + 'static,
    {
        Self::new(
            name.into(),
            arity,
            FunctionKind::Native(NativeFunction {
                func: Box::new(func),
            }),
        )
    }

    pub(crate) fn lambda(lambda: LambdaFunction) -> Self {
        let name = lambda.name().to_string();
        let arity = Arity::Exact(lambda.params().len());
        Self::new(name, arity, FunctionKind::Lambda(lambda))
    }

    fn new(name: String, arity: Arity, kind: FunctionKind) -> Self {
        Self(Arc::new(CallableInner {
            id: FunctionId::fresh(),
            name,
            arity,
            kind,
        }))
    }

    pub fn id(&self) -> FunctionId {
        self.0.id
    }

    /// The name the callable was created with. Purely informational.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn arity(&self) -> Arity {
        self.0.arity
    }

    /// Whether this is a closure produced by a local function definition.
    pub fn is_lambda(&self) -> bool {
        matches!(self.0.kind, FunctionKind::Lambda(_))
    }

    pub(crate) fn kind(&self) -> &FunctionKind {
        &self.0.kind
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Callable {}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("id", &self.id())
            .field("name", &self.name())
            .field("arity", &self.arity())
            .finish()
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name())
    }
}
