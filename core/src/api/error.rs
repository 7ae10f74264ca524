//! Public error types for the Sieve API.
//!
//! Every failure of [`Engine`](super::Engine) is one of three stages: lexing,
//! parsing or evaluation. Each stage error carries a [`Span`] into the
//! expression source and converts into a [`Diagnostic`] for rendering.

use core::fmt;

use thiserror::Error;

use crate::evaluator::EvalError;
use crate::lexer::{LexError, LexErrorKind};
use crate::parser::{ParseError, Span};

/// Public error type for all Sieve operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}

impl Error {
    /// Whether the error is a refusal by the security guard.
    pub fn is_security_violation(&self) -> bool {
        match self {
            Error::Eval(e) => e.is_security_violation(),
            Error::Lex(_) | Error::Parse(_) => false,
        }
    }

    /// Location in the expression source.
    pub fn span(&self) -> &Span {
        match self {
            Error::Lex(e) => &e.span,
            Error::Parse(e) => &e.span,
            Error::Eval(e) => &e.span,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Error::Lex(e) => e.to_diagnostic(),
            Error::Parse(e) => e.to_diagnostic(),
            Error::Eval(e) => e.to_diagnostic(),
        }
    }
}

/// A diagnostic message (error, warning, or info) with source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level (error, warning, info).
    pub severity: Severity,

    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue.
    pub span: Span,

    /// Optional help text suggesting how to fix the issue.
    pub help: Option<String>,

    /// Optional error code (e.g., "E001") for documentation lookup.
    pub code: Option<String>,
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

impl LexError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (code, help) = match self.kind {
            LexErrorKind::UnexpectedCharacter => ("L001", None),
            LexErrorKind::UnterminatedString => ("L002", Some("Add the closing quote")),
            LexErrorKind::UnterminatedNumber => {
                ("L003", Some("Add digits after `.` or the exponent marker"))
            }
            LexErrorKind::InvalidNumber => ("L004", None),
            LexErrorKind::InvalidEscape => (
                "L005",
                Some("Valid escapes are \\\" \\' \\\\ \\/ \\b \\f \\n \\r \\t and \\uXXXX"),
            ),
        };

        Diagnostic {
            severity: Severity::Error,
            message: self.kind.to_string(),
            span: self.span.clone(),
            help: help.map(String::from),
            code: Some(code.to_string()),
        }
    }
}
