pub mod error;
mod parsed_expr;
#[allow(clippy::module_inception)]
pub mod parser;
mod syntax;

pub use error::{ParseError, ParseErrorKind};
pub use parsed_expr::{Expr, ExprKind, FunctionDef, Literal};
pub use parser::{ExpressionParser, parse};
pub use syntax::{BinaryOp, Span, UnaryOp};

#[cfg(test)]
mod parse_test;
