//! Sieve Standard Library
//!
//! The built-in functions every engine trusts, plus the constants `PI` and
//! `E`. Built-ins are created once per process, so the identity returned by
//! [`builtin`] is the same one every [`TrustedRegistry`] seeded with
//! [`TrustedRegistry::with_builtins`] trusts. A host can place a built-in
//! inside its context under any name and expressions may still call it.
//!
//! - Math: `abs`, `sqrt`, `sin`, `min`, `max`, `roundTo`, ...
//! - Collections: `length`, `indexOf`, `join`
//!
//! [`TrustedRegistry`]: crate::registry::TrustedRegistry
//! [`TrustedRegistry::with_builtins`]: crate::registry::TrustedRegistry::with_builtins

use once_cell::sync::Lazy;

use crate::evaluator::EvalErrorKind;
use crate::values::{Callable, Value};

mod array;
mod math;


static BUILTINS: Lazy<Vec<Callable>> = Lazy::new(|| {
    let mut functions = math::functions();
    functions.extend(array::functions());
    functions
});

/// Named constants, resolved after every other kind of binding.
pub const CONSTANTS: [(&str, f64); 2] = [("PI", core::f64::consts::PI), ("E", core::f64::consts::E)];

/// Every built-in function.
pub fn builtins() -> &'static [Callable] {
    &BUILTINS
}

/// Look up a built-in by name.
///
/// ```
/// use sieve_core::stdlib;
///
/// let sqrt = stdlib::builtin("sqrt").unwrap();
/// assert_eq!(sqrt.id(), stdlib::builtin("sqrt").unwrap().id());
/// assert!(stdlib::builtin("eval").is_none());
/// ```
pub fn builtin(name: &str) -> Option<Callable> {
    BUILTINS.iter().find(|c| c.name() == name).cloned()
}

pub fn constant(name: &str) -> Option<Value> {
    CONSTANTS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, v)| Value::Number(*v))
}

fn arg<'a>(function: &str, args: &'a [Value], index: usize) -> Result<&'a Value, EvalErrorKind> {
    args.get(index).ok_or_else(|| {
        EvalErrorKind::native(function, format!("missing argument {}", index + 1))
    })
}

fn number_arg(function: &str, args: &[Value], index: usize) -> Result<f64, EvalErrorKind> {
    let value = arg(function, args, index)?;
    value.as_number().ok_or_else(|| {
        EvalErrorKind::type_mismatch(format!(
            "`{function}` expects a number, got {}",
            value.type_name()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_identity_is_stable() {
        let a = builtin("max").unwrap();
        let b = builtin("max").unwrap();
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_builtin_names_are_unique() {
        let mut names: Vec<&str> = builtins().iter().map(|c| c.name()).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len());
    }

    #[test]
    fn test_constants() {
        assert_eq!(constant("PI"), Some(Value::Number(core::f64::consts::PI)));
        assert_eq!(constant("E"), Some(Value::Number(core::f64::consts::E)));
        assert_eq!(constant("pi"), None);
    }
}
