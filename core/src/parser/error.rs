use thiserror::Error;

use crate::api::{Diagnostic, Severity};
use crate::parser::Span;

/// Parser error with the location of the offending token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at position {pos}", pos = .span.start())]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

/// Specific kinds of parse errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    #[error("expected {expected}, found end of input")]
    UnexpectedEnd { expected: String },

    #[error("unclosed delimiter `{delimiter}`")]
    UnclosedDelimiter { delimiter: char },

    #[error("invalid assignment target")]
    InvalidAssignmentTarget,

    #[error("duplicate parameter `{name}`")]
    DuplicateParameter { name: String },

    /// Syntax belonging to a grammar extension that is switched off.
    #[error("the `{extension}` operator is not enabled")]
    ExtensionDisabled { extension: &'static str },

    #[error("expression nesting depth exceeds maximum of {max_depth} levels")]
    MaxDepthExceeded { max_depth: usize },
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Byte offset of the error, always within `0..=source.len()`.
    pub fn position(&self) -> usize {
        self.span.start()
    }

    /// What the parser was looking for, when it knows.
    pub fn expected(&self) -> Option<&str> {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, .. }
            | ParseErrorKind::UnexpectedEnd { expected } => Some(expected),
            ParseErrorKind::UnclosedDelimiter { delimiter: '(' } => Some("`)`"),
            ParseErrorKind::UnclosedDelimiter { delimiter: '[' } => Some("`]`"),
            _ => None,
        }
    }

    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (code, help) = match &self.kind {
            ParseErrorKind::UnexpectedToken { .. } => ("P001", None),
            ParseErrorKind::UnexpectedEnd { .. } => {
                ("P002", Some("The expression ends too early"))
            }
            ParseErrorKind::UnclosedDelimiter { .. } => {
                ("P003", Some("Add the missing closing delimiter"))
            }
            ParseErrorKind::InvalidAssignmentTarget => (
                "P004",
                Some("Only names, members and `name(params)` can be assigned"),
            ),
            ParseErrorKind::DuplicateParameter { .. } => ("P005", None),
            ParseErrorKind::ExtensionDisabled { .. } => (
                "P006",
                Some("Enable the operator in the engine's grammar configuration"),
            ),
            ParseErrorKind::MaxDepthExceeded { .. } => {
                ("P007", Some("Reduce nesting or simplify the expression"))
            }
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
