//! Precedence-climbing parser over the lexer's token stream.

use std::sync::Arc;

use tracing::trace;

use crate::api::{Error, GrammarConfig};
use crate::lexer::{self, Token, TokenKind};
use crate::parser::{
    BinaryOp, Expr, ExprKind, FunctionDef, Literal, ParseError, ParseErrorKind, Span, UnaryOp,
};
use crate::stack::ensure_sufficient_stack;

// Binding powers, lowest to highest. Assignment, conditional and sequences are
// handled by dedicated layers above `parse_binary`.
const OR_PREC: u8 = 1;
const AND_PREC: u8 = 2;
const COMPARISON_PREC: u8 = 3;
const ADDITIVE_PREC: u8 = 4;
const MULTIPLICATIVE_PREC: u8 = 5;
const UNARY_PREC: u8 = 6;
const POWER_PREC: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Assoc {
    Left,
    Right,
}

fn infix_op(kind: &TokenKind) -> Option<(BinaryOp, u8, Assoc)> {
    use Assoc::*;
    let entry = match kind {
        TokenKind::Or => (BinaryOp::Or, OR_PREC, Left),
        TokenKind::And => (BinaryOp::And, AND_PREC, Left),
        TokenKind::EqEq => (BinaryOp::Eq, COMPARISON_PREC, Left),
        TokenKind::NotEq => (BinaryOp::Neq, COMPARISON_PREC, Left),
        TokenKind::Lt => (BinaryOp::Lt, COMPARISON_PREC, Left),
        TokenKind::Le => (BinaryOp::Le, COMPARISON_PREC, Left),
        TokenKind::Gt => (BinaryOp::Gt, COMPARISON_PREC, Left),
        TokenKind::Ge => (BinaryOp::Ge, COMPARISON_PREC, Left),
        TokenKind::In => (BinaryOp::In, COMPARISON_PREC, Left),
        TokenKind::Plus => (BinaryOp::Add, ADDITIVE_PREC, Left),
        TokenKind::Minus => (BinaryOp::Sub, ADDITIVE_PREC, Left),
        TokenKind::PipePipe => (BinaryOp::Concat, ADDITIVE_PREC, Left),
        TokenKind::Star => (BinaryOp::Mul, MULTIPLICATIVE_PREC, Left),
        TokenKind::Slash => (BinaryOp::Div, MULTIPLICATIVE_PREC, Left),
        TokenKind::Percent => (BinaryOp::Mod, MULTIPLICATIVE_PREC, Left),
        TokenKind::Caret => (BinaryOp::Pow, POWER_PREC, Right),
        _ => return None,
    };
    Some(entry)
}

fn prefix_op(kind: &TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Minus => Some(UnaryOp::Neg),
        TokenKind::Plus => Some(UnaryOp::Plus),
        TokenKind::Not | TokenKind::Bang => Some(UnaryOp::Not),
        _ => None,
    }
}

/// Expression parser. The grammar configuration is fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct ExpressionParser {
    config: GrammarConfig,
}

impl ExpressionParser {
    pub fn new(config: GrammarConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GrammarConfig {
        &self.config
    }

    /// Parse a complete token sequence. `source_len` is used to place
    /// end-of-input errors.
    pub fn parse(&self, tokens: &[Token<'_>], source_len: usize) -> Result<Expr, ParseError> {
        let mut state = ParseState {
            tokens,
            pos: 0,
            source_len,
            config: &self.config,
            depth: 0,
        };

        let expr = state.parse_sequence(false)?;
        if let Some(token) = state.peek() {
            return Err(state.unexpected(token, "an operator or end of input"));
        }
        Ok(expr)
    }
}

/// Lex and parse `source` in one step.
pub fn parse(source: &str, config: &GrammarConfig) -> Result<Expr, Error> {
    let tokens = lexer::tokenize(source)?;
    trace!(tokens = tokens.len(), "tokenized expression");
    let expr = ExpressionParser::new(config.clone()).parse(&tokens, source.len())?;
    Ok(expr)
}

struct ParseState<'t, 'src> {
    tokens: &'t [Token<'src>],
    pos: usize,
    source_len: usize,
    config: &'t GrammarConfig,
    depth: usize,
}

impl<'t, 'src> ParseState<'t, 'src> {
    fn peek(&self) -> Option<&'t Token<'src>> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&'t TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn at(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    fn advance(&mut self) -> Option<&'t Token<'src>> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn end_span(&self) -> Span {
        Span::point(self.source_len)
    }

    fn unexpected(&self, token: &Token<'_>, expected: &str) -> ParseError {
        ParseError::new(
            ParseErrorKind::UnexpectedToken {
                expected: expected.to_string(),
                found: token.kind.to_string(),
            },
            token.span.clone(),
        )
    }

    fn unexpected_end(&self, expected: &str) -> ParseError {
        ParseError::new(
            ParseErrorKind::UnexpectedEnd {
                expected: expected.to_string(),
            },
            self.end_span(),
        )
    }

    /// Consume the closing delimiter of a group opened at `open`.
    fn expect_close(&mut self, close: TokenKind, open: &Token<'_>) -> Result<Span, ParseError> {
        match self.peek() {
            Some(token) if token.kind == close => {
                self.pos += 1;
                Ok(token.span.clone())
            }
            Some(token) => Err(self.unexpected(token, &close.to_string())),
            None => {
                let delimiter = open.text.chars().next().unwrap_or('(');
                Err(ParseError::new(
                    ParseErrorKind::UnclosedDelimiter { delimiter },
                    open.span.clone(),
                ))
            }
        }
    }

    /// `item (; item)*`, or inside parentheses `item ((, | ;) item)*`.
    fn parse_sequence(&mut self, allow_comma: bool) -> Result<Expr, ParseError> {
        let first = self.parse_assignment()?;
        let mut items = vec![first];

        while let Some(kind) = self.peek_kind() {
            let is_separator =
                *kind == TokenKind::Semicolon || (allow_comma && *kind == TokenKind::Comma);
            if !is_separator {
                break;
            }
            self.pos += 1;
            items.push(self.parse_assignment()?);
        }

        if items.len() == 1 {
            return Ok(items.remove(0));
        }
        let span = Span::combine(&items[0].span, &items[items.len() - 1].span);
        Ok(Expr::new(ExprKind::Sequence(items), span))
    }

    /// Run a recursive grammar rule on a stack that can hold it. Levels
    /// claimed with [`Self::descend`] inside `rule` are released on return.
    fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let entry = self.depth;
        let result = ensure_sufficient_stack(|| rule(self));
        self.depth = entry;
        result
    }

    /// Claim one level of nesting. Called for every step that makes the
    /// resulting tree deeper, so the tree never exceeds `max_depth` levels.
    fn descend(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.config.max_depth {
            let span = self.peek().map_or_else(|| self.end_span(), |t| t.span.clone());
            return Err(ParseError::new(
                ParseErrorKind::MaxDepthExceeded {
                    max_depth: self.config.max_depth,
                },
                span,
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        self.nested(Self::parse_assignment_inner)
    }

    fn parse_assignment_inner(&mut self) -> Result<Expr, ParseError> {
        let target = self.parse_conditional()?;

        let Some(eq) = self.peek().filter(|t| t.kind == TokenKind::Assign) else {
            return Ok(target);
        };
        self.pos += 1;
        self.descend()?;

        let extension_disabled = |extension: &'static str| {
            ParseError::new(ParseErrorKind::ExtensionDisabled { extension }, eq.span.clone())
        };

        match target.kind {
            ExprKind::Ident(name) => {
                if !self.config.assignment {
                    return Err(extension_disabled("assignment"));
                }
                let value = self.parse_assignment()?;
                let span = Span::combine(&target.span, &value.span);
                Ok(Expr::new(
                    ExprKind::Assign {
                        name,
                        value: Box::new(value),
                    },
                    span,
                ))
            }
            ExprKind::Member { .. } | ExprKind::Index { .. } => {
                if !self.config.assignment {
                    return Err(extension_disabled("assignment"));
                }
                let value = self.parse_assignment()?;
                let span = Span::combine(&target.span, &value.span);
                Ok(Expr::new(
                    ExprKind::MemberAssign {
                        target: Box::new(target),
                        value: Box::new(value),
                    },
                    span,
                ))
            }
            ExprKind::Call { callee, args } => {
                if !self.config.fndef {
                    return Err(extension_disabled("fndef"));
                }
                let Expr { kind, span } = *callee;
                let ExprKind::Ident(name) = kind else {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidAssignmentTarget,
                        span,
                    ));
                };

                let mut params: Vec<String> = Vec::with_capacity(args.len());
                for Expr { kind, span } in args {
                    let ExprKind::Ident(param) = kind else {
                        return Err(ParseError::new(
                            ParseErrorKind::InvalidAssignmentTarget,
                            span,
                        ));
                    };
                    if params.contains(&param) {
                        return Err(ParseError::new(
                            ParseErrorKind::DuplicateParameter { name: param },
                            span,
                        ));
                    }
                    params.push(param);
                }

                let body = self.parse_assignment()?;
                let span = Span::combine(&target.span, &body.span);
                Ok(Expr::new(
                    ExprKind::FunctionDef(Arc::new(FunctionDef { name, params, body })),
                    span,
                ))
            }
            _ => Err(ParseError::new(
                ParseErrorKind::InvalidAssignmentTarget,
                target.span,
            )),
        }
    }

    fn parse_conditional(&mut self) -> Result<Expr, ParseError> {
        self.nested(Self::parse_conditional_inner)
    }

    fn parse_conditional_inner(&mut self) -> Result<Expr, ParseError> {
        let cond = self.parse_binary(OR_PREC)?;
        if !self.at(&TokenKind::Question) {
            return Ok(cond);
        }
        self.pos += 1;
        self.descend()?;

        let then_branch = self.parse_conditional()?;
        match self.peek() {
            Some(token) if token.kind == TokenKind::Colon => self.pos += 1,
            Some(token) => return Err(self.unexpected(token, "`:`")),
            None => return Err(self.unexpected_end("`:`")),
        }
        let else_branch = self.parse_conditional()?;

        let span = Span::combine(&cond.span, &else_branch.span);
        Ok(Expr::new(
            ExprKind::Conditional {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            span,
        ))
    }

    fn parse_binary(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        self.nested(|state| {
            state.descend()?;
            state.parse_binary_inner(min_prec)
        })
    }

    fn parse_binary_inner(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        let mut lhs = match self.peek() {
            Some(token) => match prefix_op(&token.kind) {
                Some(op) => {
                    self.pos += 1;
                    let operand = self.parse_binary(UNARY_PREC)?;
                    let span = Span::combine(&token.span, &operand.span);
                    Expr::new(
                        ExprKind::Unary {
                            op,
                            expr: Box::new(operand),
                        },
                        span,
                    )
                }
                None => self.parse_postfix()?,
            },
            None => return Err(self.unexpected_end("an expression")),
        };

        while let Some(token) = self.peek() {
            let Some((op, prec, assoc)) = infix_op(&token.kind) else {
                break;
            };
            if prec < min_prec {
                break;
            }
            if op == BinaryOp::In && !self.config.in_operator {
                return Err(ParseError::new(
                    ParseErrorKind::ExtensionDisabled { extension: "in" },
                    token.span.clone(),
                ));
            }
            self.pos += 1;
            // Each left-associative step wraps `lhs` one level deeper.
            self.descend()?;

            let next_min = match assoc {
                Assoc::Left => prec + 1,
                Assoc::Right => prec,
            };
            let rhs = self.parse_binary(next_min)?;
            let span = Span::combine(&lhs.span, &rhs.span);
            lhs = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(lhs),
                    right: Box::new(rhs),
                },
                span,
            );
        }

        Ok(lhs)
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;

        while let Some(token) = self.peek() {
            if matches!(
                token.kind,
                TokenKind::LParen | TokenKind::Dot | TokenKind::LBracket
            ) {
                self.descend()?;
            }
            match token.kind {
                TokenKind::LParen => {
                    self.pos += 1;
                    let args = self.parse_list(TokenKind::RParen, token)?;
                    let close = self.expect_close(TokenKind::RParen, token)?;
                    let span = Span::combine(&expr.span, &close);
                    expr = Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        span,
                    );
                }
                TokenKind::Dot => {
                    self.pos += 1;
                    let (property, span) = match self.advance() {
                        Some(Token {
                            kind: TokenKind::Ident(name),
                            span,
                            ..
                        }) => (name.clone(), span.clone()),
                        Some(other) => return Err(self.unexpected(other, "a member name")),
                        None => return Err(self.unexpected_end("a member name")),
                    };
                    let span = Span::combine(&expr.span, &span);
                    expr = Expr::new(
                        ExprKind::Member {
                            object: Box::new(expr),
                            property,
                        },
                        span,
                    );
                }
                TokenKind::LBracket => {
                    self.pos += 1;
                    let index = self.parse_assignment()?;
                    let close = self.expect_close(TokenKind::RBracket, token)?;
                    let span = Span::combine(&expr.span, &close);
                    expr = Expr::new(
                        ExprKind::Index {
                            object: Box::new(expr),
                            index: Box::new(index),
                        },
                        span,
                    );
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    /// Comma-separated items up to (not including) `close`.
    fn parse_list(&mut self, close: TokenKind, open: &Token<'_>) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        if self.at(&close) {
            return Ok(items);
        }

        loop {
            items.push(self.parse_assignment()?);
            match self.peek() {
                Some(token) if token.kind == TokenKind::Comma => self.pos += 1,
                Some(token) if token.kind == close => break,
                Some(token) => {
                    return Err(self.unexpected(token, &format!("`,` or {close}")));
                }
                None => {
                    let delimiter = open.text.chars().next().unwrap_or('(');
                    return Err(ParseError::new(
                        ParseErrorKind::UnclosedDelimiter { delimiter },
                        open.span.clone(),
                    ));
                }
            }
        }

        Ok(items)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let Some(token) = self.advance() else {
            return Err(self.unexpected_end("an expression"));
        };
        let span = token.span.clone();

        let kind = match &token.kind {
            TokenKind::Number(n) => ExprKind::Literal(Literal::Number(*n)),
            TokenKind::Str(s) => ExprKind::Literal(Literal::Str(s.clone())),
            TokenKind::True => ExprKind::Literal(Literal::Bool(true)),
            TokenKind::False => ExprKind::Literal(Literal::Bool(false)),
            TokenKind::Ident(name) => ExprKind::Ident(name.clone()),
            TokenKind::LParen => {
                let inner = self.parse_sequence(true)?;
                self.expect_close(TokenKind::RParen, token)?;
                return Ok(inner);
            }
            TokenKind::LBracket => {
                let items = self.parse_list(TokenKind::RBracket, token)?;
                let close = self.expect_close(TokenKind::RBracket, token)?;
                return Ok(Expr::new(
                    ExprKind::Array(items),
                    Span::combine(&span, &close),
                ));
            }
            _ => return Err(self.unexpected(token, "an expression")),
        };

        Ok(Expr::new(kind, span))
    }
}
