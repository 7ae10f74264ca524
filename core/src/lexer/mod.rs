//! Expression lexer.
//!
//! Converts source text into a flat sequence of [`Token`]s. The lexer knows
//! nothing about the grammar: it only classifies characters into numbers,
//! strings, identifiers, operators and punctuation.
//!
//! ```
//! use sieve_core::lexer::{tokenize, TokenKind};
//!
//! let tokens = tokenize("x * 2").unwrap();
//! assert_eq!(tokens[1].kind, TokenKind::Star);
//! ```

mod token;

#[cfg(test)]
mod lexer_test;

pub use token::{Token, TokenCategory, TokenKind};

use logos::Logos;
use thiserror::Error;

use crate::parser::Span;

/// Kinds of lexical failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Error)]
pub enum LexErrorKind {
    #[default]
    #[error("unexpected character")]
    UnexpectedCharacter,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated number literal")]
    UnterminatedNumber,
    #[error("invalid number literal")]
    InvalidNumber,
    #[error("invalid escape sequence in string literal")]
    InvalidEscape,
}

/// A lexical error with the offending source slice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} `{text}` at {span}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    pub text: String,
}

impl LexError {
    pub fn position(&self) -> usize {
        self.span.start()
    }
}

/// Tokenize `source`, failing on the first malformed token.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = Span(lexer.span());
        match result {
            Ok(kind) => tokens.push(Token {
                kind,
                text: lexer.slice(),
                span,
            }),
            Err(kind) => {
                return Err(LexError {
                    kind,
                    text: lexer.slice().to_string(),
                    span,
                });
            }
        }
    }

    Ok(tokens)
}
