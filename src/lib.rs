//! Sieve - a sandboxed, embeddable expression evaluator
//!
//! # Overview
//!
//! Sieve evaluates small arithmetic and logical expressions written by
//! untrusted users against values supplied by a host application. Common
//! use cases include:
//!
//! - Spreadsheet-style formulas
//! - Pricing and scoring rules
//! - Filters over user-defined fields
//!
//! The host's context may contain anything, including functions with side
//! effects. Expressions can read it but can only *call* functions the engine
//! trusts: the built-in math and collection library, functions the host
//! registers explicitly, and local functions the expression defines itself.
//! Prototype-style members (`__proto__`, `constructor`, `prototype`) can
//! never be read or assigned.
//!
//! # Quick Start
//!
//! ```
//! use sieve::{Context, Engine, EngineOptions, Value};
//!
//! let engine = Engine::new(EngineOptions::with_fndef());
//!
//! let context = Context::new().with("price", 120).with("qty", 3);
//! let result = engine.evaluate("min(price * qty, 300)", &context).unwrap();
//! assert_eq!(result, Value::Number(300.0));
//!
//! let result = engine.evaluate("(f(x) = x * x)(5)", &Context::default()).unwrap();
//! assert_eq!(result, Value::Number(25.0));
//! ```
//!
//! # Host functions
//!
//! A function placed in the context is data, not capability. Register it to
//! make it callable:
//!
//! ```
//! use sieve::{Arity, Callable, Context, Engine, Value};
//!
//! let mut engine = Engine::default();
//! let double = Callable::native("double", Arity::Exact(1), |args| {
//!     Ok(Value::Number(args[0].as_number().unwrap_or(f64::NAN) * 2.0))
//! });
//!
//! let context = Context::new().with("double", double.clone());
//! assert!(engine.evaluate("double(4)", &context).unwrap_err().is_security_violation());
//!
//! engine.register_function("double", double);
//! assert_eq!(engine.evaluate("double(4)", &context).unwrap(), Value::Number(8.0));
//! ```

mod error_renderer;

// Re-export public API from sieve_core
pub use sieve_core::api::{
    CompiledExpression, Context, Diagnostic, Engine, EngineOptions, Error, ExecutionOptions,
    GrammarConfig, Severity,
};

// Re-export values and the standard library
pub use sieve_core::stdlib;
pub use sieve_core::values::{self, Arity, Callable, FunctionId, Object, Value};

// Re-export errors
pub use sieve_core::evaluator::{EvalError, EvalErrorKind};
pub use sieve_core::lexer::{LexError, LexErrorKind};
pub use sieve_core::parser::{ParseError, ParseErrorKind, Span};

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};
