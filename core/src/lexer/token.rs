//! Token definitions.
//!
//! `TokenKind` is the logos-derived scanner. Literal payloads (numbers,
//! unescaped strings, identifier names) are decoded while scanning so that the
//! parser never has to re-read the source text.

use core::fmt;

use logos::{Lexer, Logos};

use super::LexErrorKind;
use crate::parser::Span;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(error = LexErrorKind)]
pub enum TokenKind {
    // Literals
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?", decimal)]
    #[regex(r"0[xX][0-9a-fA-F]+", hexadecimal)]
    #[regex(r"[0-9]+\.", unterminated_number)]
    #[regex(r"[0-9]+(\.[0-9]*)?[eE][+-]?", unterminated_number)]
    Number(f64),

    #[regex(r#""([^"\\]|\\.)*""#, string)]
    #[regex(r#"'([^'\\]|\\.)*'"#, string)]
    #[regex(r#""([^"\\]|\\.)*"#, unterminated_string)]
    #[regex(r#"'([^'\\]|\\.)*"#, unterminated_string)]
    Str(String),

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*", |lex| lex.slice().to_owned())]
    Ident(String),

    // Keywords
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("not")]
    Not,
    #[token("in")]
    In,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    #[token("||")]
    PipePipe,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    Le,
    #[token(">")]
    Gt,
    #[token(">=")]
    Ge,
    #[token("=")]
    Assign,
    #[token("!")]
    Bang,
    #[token("?")]
    Question,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
}

/// Coarse token classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCategory {
    Number,
    String,
    Identifier,
    Operator,
    Punctuation,
}

impl TokenKind {
    pub fn category(&self) -> TokenCategory {
        use TokenKind::*;
        match self {
            Number(_) => TokenCategory::Number,
            Str(_) => TokenCategory::String,
            Ident(_) | True | False => TokenCategory::Identifier,
            And | Or | Not | In | Plus | Minus | Star | Slash | Percent | Caret | PipePipe
            | EqEq | NotEq | Lt | Le | Gt | Ge | Assign | Bang | Question => {
                TokenCategory::Operator
            }
            LParen | RParen | LBracket | RBracket | Comma | Dot | Semicolon | Colon => {
                TokenCategory::Punctuation
            }
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokenKind::*;
        let text = match self {
            Number(n) => return write!(f, "number `{n}`"),
            Str(s) => return write!(f, "string {s:?}"),
            Ident(name) => return write!(f, "identifier `{name}`"),
            True => "true",
            False => "false",
            And => "and",
            Or => "or",
            Not => "not",
            In => "in",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Percent => "%",
            Caret => "^",
            PipePipe => "||",
            EqEq => "==",
            NotEq => "!=",
            Lt => "<",
            Le => "<=",
            Gt => ">",
            Ge => ">=",
            Assign => "=",
            Bang => "!",
            Question => "?",
            LParen => "(",
            RParen => ")",
            LBracket => "[",
            RBracket => "]",
            Comma => ",",
            Dot => ".",
            Semicolon => ";",
            Colon => ":",
        };
        write!(f, "`{text}`")
    }
}

/// A single lexed token. `text` borrows the exact source slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub span: Span,
}

impl Token<'_> {
    pub fn position(&self) -> usize {
        self.span.start()
    }

    pub fn category(&self) -> TokenCategory {
        self.kind.category()
    }
}

fn decimal(lex: &mut Lexer<TokenKind>) -> Result<f64, LexErrorKind> {
    lex.slice()
        .parse::<f64>()
        .map_err(|_| LexErrorKind::InvalidNumber)
}

fn hexadecimal(lex: &mut Lexer<TokenKind>) -> Result<f64, LexErrorKind> {
    u64::from_str_radix(&lex.slice()[2..], 16)
        .map(|n| n as f64)
        .map_err(|_| LexErrorKind::InvalidNumber)
}

fn unterminated_number(_lex: &mut Lexer<TokenKind>) -> Result<f64, LexErrorKind> {
    Err(LexErrorKind::UnterminatedNumber)
}

fn unterminated_string(_lex: &mut Lexer<TokenKind>) -> Result<String, LexErrorKind> {
    Err(LexErrorKind::UnterminatedString)
}

fn string(lex: &mut Lexer<TokenKind>) -> Result<String, LexErrorKind> {
    let slice = lex.slice();
    unescape(&slice[1..slice.len() - 1])
}

/// Decode backslash escapes inside a quoted string body.
pub(crate) fn unescape(body: &str) -> Result<String, LexErrorKind> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let decoded = match chars.next() {
            Some('"') => '"',
            Some('\'') => '\'',
            Some('\\') => '\\',
            Some('/') => '/',
            Some('b') => '\u{8}',
            Some('f') => '\u{c}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 {
                    return Err(LexErrorKind::InvalidEscape);
                }
                u32::from_str_radix(&hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or(LexErrorKind::InvalidEscape)?
            }
            _ => return Err(LexErrorKind::InvalidEscape),
        };
        out.push(decoded);
    }
    Ok(out)
}
