//! Runtime evaluation errors.
//!
//! Every error aborts the evaluation that raised it; there is no in-language
//! recovery. Two kinds are security violations, raised by the guard:
//!
//! - [`EvalErrorKind::CallNotAllowed`]: invoking a callable that is neither
//!   registered with the engine nor a closure of the running evaluation.
//! - [`EvalErrorKind::ProtoAccessDenied`]: naming a prototype-chain member.

use thiserror::Error;

use crate::api::{Diagnostic, Severity};
use crate::parser::Span;
use crate::values::Arity;

/// Runtime evaluation error with the span of the failing node.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at {span}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalErrorKind {
    #[error("unknown identifier `{name}`")]
    UnknownIdentifier { name: String },

    #[error("unknown member `{name}`")]
    UnknownMember { name: String },

    #[error("`{callee}` is not callable (found {found})")]
    NotCallable { callee: String, found: &'static str },

    #[error("call to `{callee}` is not allowed")]
    CallNotAllowed { callee: String },

    #[error("access to member `{name}` is denied")]
    ProtoAccessDenied { name: String },

    #[error("evaluation depth {depth} exceeds maximum of {max_depth}")]
    DepthExceeded { depth: usize, max_depth: usize },

    #[error("type mismatch: {message}")]
    TypeMismatch { message: String },

    #[error("`{callee}` expects {expected} argument(s), got {found}")]
    ArityMismatch {
        callee: String,
        expected: Arity,
        found: usize,
    },

    #[error("index {index} out of bounds (length {len})")]
    IndexOutOfBounds { index: i64, len: usize },

    #[error("cannot assign to `{name}`: host values are read-only")]
    ReadOnly { name: String },

    /// Failure reported by a native function.
    #[error("{function}: {message}")]
    Native { function: String, message: String },
}

impl EvalErrorKind {
    /// Shorthand for native functions reporting their own failures.
    pub fn native(function: impl Into<String>, message: impl Into<String>) -> Self {
        EvalErrorKind::Native {
            function: function.into(),
            message: message.into(),
        }
    }

    pub fn type_mismatch(message: impl Into<String>) -> Self {
        EvalErrorKind::TypeMismatch {
            message: message.into(),
        }
    }

    /// Whether the guard refused the operation.
    pub fn is_security_violation(&self) -> bool {
        matches!(
            self,
            EvalErrorKind::CallNotAllowed { .. } | EvalErrorKind::ProtoAccessDenied { .. }
        )
    }

    fn code(&self) -> &'static str {
        match self {
            EvalErrorKind::UnknownIdentifier { .. } => "E001",
            EvalErrorKind::UnknownMember { .. } => "E002",
            EvalErrorKind::NotCallable { .. } => "E003",
            EvalErrorKind::CallNotAllowed { .. } => "E004",
            EvalErrorKind::ProtoAccessDenied { .. } => "E005",
            EvalErrorKind::DepthExceeded { .. } => "E006",
            EvalErrorKind::TypeMismatch { .. } => "E007",
            EvalErrorKind::ArityMismatch { .. } => "E008",
            EvalErrorKind::IndexOutOfBounds { .. } => "E009",
            EvalErrorKind::ReadOnly { .. } => "E010",
            EvalErrorKind::Native { .. } => "E011",
        }
    }
}

impl EvalError {
    pub fn new(kind: EvalErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn is_security_violation(&self) -> bool {
        self.kind.is_security_violation()
    }

    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        let help = match &self.kind {
            EvalErrorKind::CallNotAllowed { .. } => {
                Some("Only functions registered with the engine can be called")
            }
            EvalErrorKind::DepthExceeded { .. } => {
                Some("Simplify the expression or raise `ExecutionOptions::max_depth`")
            }
            EvalErrorKind::ReadOnly { .. } => {
                Some("Assign to a local name instead, e.g. `x = value`")
            }
            _ => None,
        };

        Diagnostic {
            severity: Severity::Error,
            message: self.kind.to_string(),
            span: self.span.clone(),
            help: help.map(String::from),
            code: Some(self.kind.code().to_string()),
        }
    }
}
