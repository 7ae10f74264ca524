//! The Sieve engine.

use tracing::debug;

use super::{CompiledExpression, Context, EngineOptions, Error};
use crate::lexer;
use crate::parser::ExpressionParser;
use crate::registry::TrustedRegistry;
use crate::values::{Callable, Value};

/// The Sieve compilation and execution engine.
///
/// The engine owns:
/// - The parser, built once from the grammar configuration
/// - The trusted-callable registry (built-ins plus host registrations)
/// - Default execution options
///
/// Expressions are untrusted input. Whatever the expression text or the
/// context contain, the only callables an expression can invoke are the
/// ones this engine trusts, plus closures it defines itself.
///
/// # Example
///
/// ```
/// use sieve_core::api::{Context, Engine, EngineOptions};
/// use sieve_core::values::{Arity, Callable, Value};
///
/// let mut engine = Engine::new(EngineOptions::default());
///
/// let double = Callable::native("double", Arity::Exact(1), |args| {
///     Ok(Value::Number(args[0].as_number().unwrap_or(f64::NAN) * 2.0))
/// });
/// engine.register_function("double", double);
///
/// let context = Context::new().with("x", 21);
/// let result = engine.evaluate("double(x)", &context).unwrap();
/// assert_eq!(result, Value::Number(42.0));
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    options: EngineOptions,
    parser: ExpressionParser,
    registry: TrustedRegistry,
}

static_assertions::assert_impl_all!(Engine: Send, Sync);

impl Engine {
    /// Create an engine trusting the standard library.
    pub fn new(options: EngineOptions) -> Self {
        Self {
            parser: ExpressionParser::new(options.grammar.clone()),
            registry: TrustedRegistry::with_builtins(),
            options,
        }
    }

    /// Access the engine options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Access the trusted-callable registry.
    pub fn registry(&self) -> &TrustedRegistry {
        &self.registry
    }

    /// Trust `callable` and make it callable by `name`.
    ///
    /// Trust follows the callable's identity: once registered, the same
    /// callable can be invoked under any name or object path it is reached
    /// through, for example `obj.alias(5)` with `obj.alias` set to it in the
    /// context. Re-registering a name replaces the binding but does not
    /// revoke trust in the callable it replaced.
    pub fn register_function(&mut self, name: impl Into<String>, callable: Callable) {
        self.registry.register(name, callable);
    }

    /// Parse an expression once for repeated evaluation.
    pub fn compile(&self, source: &str) -> Result<CompiledExpression<'_>, Error> {
        debug!(len = source.len(), "compiling expression");
        let tokens = lexer::tokenize(source)?;
        let expr = self.parser.parse(&tokens, source.len())?;
        Ok(CompiledExpression::new(
            source,
            expr,
            &self.registry,
            self.options.execution.clone(),
        ))
    }

    /// Compile and run an expression in one step.
    ///
    /// Pass `&Context::default()` when there is nothing to supply.
    pub fn evaluate(&self, source: &str, context: &Context) -> Result<Value, Error> {
        self.compile(source)?.run(context)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}
