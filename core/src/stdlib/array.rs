//! Collection functions over arrays and strings.

use super::arg;
use crate::evaluator::EvalErrorKind;
use crate::values::{Arity, Callable, Value};

/// Number of elements of an array, or characters of a string.
fn length(args: &[Value]) -> Result<Value, EvalErrorKind> {
    let len = match arg("length", args, 0)? {
        Value::Array(items) => items.len(),
        Value::String(s) => s.chars().count(),
        other => {
            return Err(EvalErrorKind::type_mismatch(format!(
                "`length` expects an array or a string, got {}",
                other.type_name()
            )));
        }
    };
    Ok(Value::Number(len as f64))
}

/// `indexOf(target, haystack)`: position of `target`, or -1.
///
/// In a string the position is counted in characters.
fn index_of(args: &[Value]) -> Result<Value, EvalErrorKind> {
    let target = arg("indexOf", args, 0)?;
    let position = match (target, arg("indexOf", args, 1)?) {
        (target, Value::Array(items)) => items.iter().position(|item| item == target),
        (Value::String(needle), Value::String(haystack)) => haystack
            .find(&**needle)
            .map(|byte_pos| haystack[..byte_pos].chars().count()),
        (target, Value::String(_)) => {
            return Err(EvalErrorKind::type_mismatch(format!(
                "`indexOf` can only search a string for a string, got {}",
                target.type_name()
            )));
        }
        (_, other) => {
            return Err(EvalErrorKind::type_mismatch(format!(
                "`indexOf` expects an array or a string, got {}",
                other.type_name()
            )));
        }
    };
    Ok(Value::Number(position.map_or(-1.0, |p| p as f64)))
}

/// `join(separator, array)`: elements formatted as by `||`.
fn join(args: &[Value]) -> Result<Value, EvalErrorKind> {
    let separator = match arg("join", args, 0)? {
        Value::String(s) => s,
        other => {
            return Err(EvalErrorKind::type_mismatch(format!(
                "`join` expects a string separator, got {}",
                other.type_name()
            )));
        }
    };
    let Value::Array(items) = arg("join", args, 1)? else {
        return Err(EvalErrorKind::type_mismatch("`join` expects an array to join"));
    };

    let joined = items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(&**separator);
    Ok(Value::from(joined))
}

pub(super) fn functions() -> Vec<Callable> {
    vec![
        Callable::native("length", Arity::Exact(1), length),
        Callable::native("indexOf", Arity::Exact(2), index_of),
        Callable::native("join", Arity::Exact(2), join),
    ]
}
