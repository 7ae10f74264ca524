//! Sieve core: lexer, parser, guarded evaluator and host API.
//!
//! Data flows one way: source text → [`lexer`] → tokens → [`parser`] →
//! [`parser::Expr`] → [`evaluator`] (consulting [`guard`] at every member
//! access and call) → [`values::Value`]. Most hosts only need [`api`].

pub mod api;
pub mod evaluator;
pub mod guard;
pub mod lexer;
pub mod parser;
pub mod registry;
pub mod scope_stack;
pub mod stack;
pub mod stdlib;
pub mod values;
