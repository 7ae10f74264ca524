//! Tree-walking evaluator for Sieve expressions.
//!
//! The evaluator interprets a parsed [`Expr`] against a host [`Context`] and
//! produces a runtime [`Value`].
//!
//! ## Design Principles
//!
//! - **Never panic**: All adversarial inputs must be handled gracefully
//! - **Stack-safe**: Depth tracking prevents stack overflow from deeply nested
//!   expressions and runaway recursion
//! - **Guarded**: Every member read and every call passes through
//!   [`crate::guard`] before it happens
//!
//! ## Example
//!
//! ```
//! use sieve_core::api::{Context, GrammarConfig};
//! use sieve_core::registry::TrustedRegistry;
//! use sieve_core::values::Value;
//! use sieve_core::{evaluator, parser};
//!
//! let expr = parser::parse("sqrt(x) + 1", &GrammarConfig::default()).unwrap();
//! let registry = TrustedRegistry::with_builtins();
//! let context = Context::new().with("x", 16);
//!
//! let result = evaluator::eval(&expr, &context, &registry).unwrap();
//! assert_eq!(result, Value::Number(5.0));
//! ```

mod error;
mod eval;
mod operators;

#[cfg(test)]
mod security_test;

pub use error::{EvalError, EvalErrorKind};

use crate::api::{Context, ExecutionOptions};
use crate::parser::Expr;
use crate::registry::TrustedRegistry;
use crate::values::Value;

/// Evaluate an expression with default limits.
///
/// Uses the default depth limit of 256.
pub fn eval(
    expr: &Expr,
    context: &Context,
    registry: &TrustedRegistry,
) -> Result<Value, EvalError> {
    eval_with_options(expr, context, registry, &ExecutionOptions::default())
}

/// Evaluate an expression with custom limits.
///
/// ## Example
///
/// ```ignore
/// // Allow deeper recursion for specific use case
/// let options = ExecutionOptions { max_depth: 5000 };
/// let result = eval_with_options(&expr, &context, &registry, &options)?;
/// ```
pub fn eval_with_options(
    expr: &Expr,
    context: &Context,
    registry: &TrustedRegistry,
    options: &ExecutionOptions,
) -> Result<Value, EvalError> {
    eval::Evaluator::new(options, registry, context).eval(expr)
}
