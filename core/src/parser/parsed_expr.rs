use core::fmt;
use std::sync::Arc;

use crate::parser::{BinaryOp, Span, UnaryOp};

/// A parsed expression node. Children are owned by their parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Ident(String),
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Conditional {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Array(Vec<Expr>),
    Member {
        object: Box<Expr>,
        property: String,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Assign {
        name: String,
        value: Box<Expr>,
    },
    // REQUIRES: target is a Member or Index node.
    MemberAssign {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Sequence(Vec<Expr>),
    /// Only produced when the `fndef` grammar extension is enabled.
    FunctionDef(Arc<FunctionDef>),
}

/// A local function definition, `name(params) = body`.
///
/// Shared with every closure created from it, so the body is never cloned.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<String>,
    pub body: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Str(String),
    Bool(bool),
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Short human-readable path for diagnostics, e.g. `a.b.write`.
    pub fn describe(&self) -> String {
        match &self.kind {
            ExprKind::Ident(name) => name.clone(),
            ExprKind::Member { object, property } => {
                format!("{}.{}", object.describe(), property)
            }
            ExprKind::Index { object, .. } => format!("{}[..]", object.describe()),
            ExprKind::Call { callee, .. } => format!("{}(..)", callee.describe()),
            ExprKind::FunctionDef(def) => def.name.clone(),
            _ => String::from("<expression>"),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{n}"),
            Literal::Str(s) => write!(f, "{s:?}"),
            Literal::Bool(b) => write!(f, "{b}"),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for item in items {
        write!(f, " {item}")?;
    }
    Ok(())
}

/// Fully parenthesized prefix rendering. Spans are not printed, so two
/// sources that parse to the same tree render identically.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Literal(lit) => write!(f, "{lit}"),
            ExprKind::Ident(name) => write!(f, "{name}"),
            ExprKind::Unary { op, expr } => write!(f, "({op} {expr})"),
            ExprKind::Binary { op, left, right } => write!(f, "({op} {left} {right})"),
            ExprKind::Conditional {
                cond,
                then_branch,
                else_branch,
            } => write!(f, "(? {cond} {then_branch} {else_branch})"),
            ExprKind::Array(items) => {
                write!(f, "(array")?;
                write_list(f, items)?;
                write!(f, ")")
            }
            ExprKind::Member { object, property } => write!(f, "(. {object} {property})"),
            ExprKind::Index { object, index } => write!(f, "([] {object} {index})"),
            ExprKind::Call { callee, args } => {
                write!(f, "(call {callee}")?;
                write_list(f, args)?;
                write!(f, ")")
            }
            ExprKind::Assign { name, value } => write!(f, "(= {name} {value})"),
            ExprKind::MemberAssign { target, value } => write!(f, "(= {target} {value})"),
            ExprKind::Sequence(items) => {
                write!(f, "(seq")?;
                write_list(f, items)?;
                write!(f, ")")
            }
            ExprKind::FunctionDef(def) => {
                write!(f, "(def {} ({}) {})", def.name, def.params.join(" "), def.body)
            }
        }
    }
}
