//! Binary and unary operator implementations.
//!
//! `and`/`or` short-circuit in the evaluator; the versions here only see
//! already-evaluated operands.

use core::cmp::Ordering;

use crate::evaluator::EvalErrorKind;
use crate::parser::{BinaryOp, UnaryOp};
use crate::values::Value;

pub(super) fn eval_unary(op: UnaryOp, value: &Value) -> Result<Value, EvalErrorKind> {
    match (op, value) {
        (UnaryOp::Neg, Value::Number(n)) => Ok(Value::Number(-n)),
        (UnaryOp::Plus, Value::Number(n)) => Ok(Value::Number(*n)),
        (UnaryOp::Not, v) => Ok(Value::Boolean(!v.is_truthy())),
        (op, v) => Err(EvalErrorKind::type_mismatch(format!(
            "cannot apply unary `{op}` to a {}",
            v.type_name()
        ))),
    }
}

pub(super) fn eval_binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalErrorKind> {
    use BinaryOp::*;

    match op {
        Add | Sub | Mul | Div | Mod | Pow => match (left, right) {
            (Value::Number(l), Value::Number(r)) => {
                Ok(Value::Number(eval_binary_number(op, *l, *r)))
            }
            _ => Err(mismatch(op, left, right)),
        },
        Concat => concat(left, right).ok_or_else(|| mismatch(op, left, right)),
        Eq => Ok(Value::Boolean(left == right)),
        Neq => Ok(Value::Boolean(left != right)),
        Lt | Le | Gt | Ge => {
            let ordering = match (left, right) {
                (Value::Number(l), Value::Number(r)) => l.partial_cmp(r),
                (Value::String(l), Value::String(r)) => Some(l.cmp(r)),
                _ => return Err(mismatch(op, left, right)),
            };
            // NaN compares false against everything.
            let result = ordering.is_some_and(|ord| match op {
                Lt => ord == Ordering::Less,
                Le => ord != Ordering::Greater,
                Gt => ord == Ordering::Greater,
                _ => ord != Ordering::Less,
            });
            Ok(Value::Boolean(result))
        }
        In => match right {
            Value::Array(items) => Ok(Value::Boolean(items.contains(left))),
            _ => Err(mismatch(op, left, right)),
        },
        And => Ok(Value::Boolean(left.is_truthy() && right.is_truthy())),
        Or => Ok(Value::Boolean(left.is_truthy() || right.is_truthy())),
    }
}

/// Arithmetic on two numbers.
///
/// Follows IEEE 754 semantics (produces inf/nan rather than failing).
pub(super) fn eval_binary_number(op: BinaryOp, left: f64, right: f64) -> f64 {
    match op {
        BinaryOp::Add => left + right,
        BinaryOp::Sub => left - right,
        BinaryOp::Mul => left * right,
        BinaryOp::Div => left / right,
        BinaryOp::Mod => left % right,
        BinaryOp::Pow => left.powf(right),
        _ => f64::NAN,
    }
}

/// `||`: array concatenation, or string concatenation when either side is a
/// string and the other is a scalar.
fn concat(left: &Value, right: &Value) -> Option<Value> {
    match (left, right) {
        (Value::Array(l), Value::Array(r)) => {
            Some(Value::Array(l.iter().chain(r.iter()).cloned().collect()))
        }
        (Value::String(_), r) if is_scalar(r) => Some(Value::from(format!("{left}{right}"))),
        (l, Value::String(_)) if is_scalar(l) => Some(Value::from(format!("{left}{right}"))),
        _ => None,
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::Number(_) | Value::String(_) | Value::Boolean(_))
}

fn mismatch(op: BinaryOp, left: &Value, right: &Value) -> EvalErrorKind {
    EvalErrorKind::type_mismatch(format!(
        "cannot apply `{op}` to a {} and a {}",
        left.type_name(),
        right.type_name()
    ))
}
