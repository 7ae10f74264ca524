//! Compiled Sieve expressions.

use tracing::debug;

use super::{Context, Error, ExecutionOptions};
use crate::evaluator;
use crate::parser::Expr;
use crate::registry::TrustedRegistry;
use crate::values::Value;

/// A parsed expression ready for execution.
///
/// Compiled expressions borrow the engine's registry, so the set of trusted
/// callables cannot change while they are alive. They can be run any number
/// of times against different contexts; every run is an independent
/// evaluation with its own local scope and closure set.
///
/// # Example
///
/// ```
/// use sieve_core::api::{Context, Engine};
/// use sieve_core::values::Value;
///
/// let engine = Engine::default();
/// let expr = engine.compile("x * x").unwrap();
///
/// for x in [2, 3] {
///     let result = expr.run(&Context::new().with("x", x)).unwrap();
///     assert_eq!(result, Value::from(x * x));
/// }
/// ```
#[derive(Debug)]
pub struct CompiledExpression<'e> {
    source: String,
    expr: Expr,
    registry: &'e TrustedRegistry,

    /// Default runtime options, copied from the engine.
    options: ExecutionOptions,
}

impl<'e> CompiledExpression<'e> {
    /// This is called internally by Engine::compile().
    pub(crate) fn new(
        source: &str,
        expr: Expr,
        registry: &'e TrustedRegistry,
        options: ExecutionOptions,
    ) -> Self {
        Self {
            source: source.to_string(),
            expr,
            registry,
            options,
        }
    }

    /// The expression text this was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The syntax tree.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Execute with the engine's default execution options.
    pub fn run(&self, context: &Context) -> Result<Value, Error> {
        self.run_with_options(context, &self.options)
    }

    /// Execute with custom execution options.
    ///
    /// # Example
    ///
    /// ```
    /// use sieve_core::api::{Context, Engine, ExecutionOptions};
    ///
    /// let engine = Engine::default();
    /// let expr = engine.compile("((((1))))").unwrap();
    ///
    /// let tight = ExecutionOptions { max_depth: 0 };
    /// assert!(expr.run_with_options(&Context::default(), &tight).is_err());
    /// ```
    pub fn run_with_options(
        &self,
        context: &Context,
        options: &ExecutionOptions,
    ) -> Result<Value, Error> {
        debug!(
            source = %self.source,
            context_len = context.len(),
            max_depth = options.max_depth,
            "evaluating expression"
        );
        let value = evaluator::eval_with_options(&self.expr, context, self.registry, options)?;
        Ok(value)
    }
}
