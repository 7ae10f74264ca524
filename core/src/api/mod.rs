//! Public API for the Sieve expression evaluator.
//!
//! Hosts build one [`Engine`], register the functions expressions may call,
//! then compile and run expressions against a [`Context`] of named values.
//!
//! # Example
//!
//! ```
//! use sieve_core::api::{Context, Engine, EngineOptions};
//! use sieve_core::values::{Arity, Value};
//!
//! let engine = Engine::new(EngineOptions::default());
//!
//! // Host values may include functions the expression must not call.
//! let context = Context::new()
//!     .with("x", 4)
//!     .with("write", Value::function("write", Arity::AtLeast(0), |_| {
//!         Ok(Value::Boolean(true))
//!     }));
//!
//! assert_eq!(engine.evaluate("sqrt(x) * 2", &context).unwrap(), Value::Number(4.0));
//!
//! let err = engine.evaluate("write('x', 'y')", &context).unwrap_err();
//! assert!(err.is_security_violation());
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod expression;
pub mod options;

pub use context::Context;
pub use engine::Engine;
pub use error::{Diagnostic, Error, Severity};
pub use expression::CompiledExpression;
pub use options::{EngineOptions, ExecutionOptions, GrammarConfig};
