//! Shared engine, sandbox context and the `test_case!` macro for the
//! integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use once_cell::sync::Lazy;
use sieve::{Arity, Callable, Context, Engine, EngineOptions, Error, GrammarConfig, Value};

/// Calls that reached any dangerous host function. Must stay zero.
pub static HOST_CALLS: AtomicUsize = AtomicUsize::new(0);

fn dangerous(name: &str) -> Value {
    Value::function(name, Arity::AtLeast(0), |_| {
        HOST_CALLS.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Boolean(true))
    })
}

pub static DOUBLE: Lazy<Callable> = Lazy::new(|| {
    Callable::native("double", Arity::Exact(1), |args| match args[0].as_number() {
        Some(n) => Ok(Value::Number(n * 2.0)),
        None => Err(sieve::EvalErrorKind::native("double", "expects a number")),
    })
});

/// All extensions on, plus `double` registered by the host.
pub static ENGINE: Lazy<Engine> = Lazy::new(|| {
    let mut engine = Engine::new(EngineOptions {
        grammar: GrammarConfig {
            fndef: true,
            in_operator: true,
            ..GrammarConfig::default()
        },
        ..EngineOptions::default()
    });
    engine.register_function("double", DOUBLE.clone());
    engine
});

/// A host context mixing plain data with functions that must never run.
pub static SANDBOX: Lazy<Context> = Lazy::new(|| {
    let sqrt = sieve::stdlib::builtin("sqrt").expect("sqrt is built in");
    Context::new()
        .with("write", dangerous("write"))
        .with("cmd", dangerous("cmd"))
        .with("exec", dangerous("exec"))
        .with("evil", dangerous("cmd"))
        .with(
            "a",
            Value::object([("b", Value::object([("write", dangerous("write"))]))]),
        )
        .with(
            "user",
            Value::object([(
                "config",
                Value::object([("isAdmin", Value::from(false)), ("name", Value::from("ada"))]),
            )]),
        )
        .with(
            "obj",
            Value::object([
                ("alias", Value::from(DOUBLE.clone())),
                ("squareRoot", Value::from(sqrt)),
                ("x", Value::from(1)),
            ]),
        )
        .with("items", Value::array([3, 1, 2]))
        .with("price", 120)
        .with("qty", 3)
});

pub fn evaluate(source: &str) -> Result<Value, Error> {
    ENGINE.evaluate(source, &SANDBOX)
}

pub fn host_calls() -> usize {
    HOST_CALLS.load(Ordering::SeqCst)
}

/// One `#[test]` per case.
///
/// - `value:` the expression evaluates to this value
/// - `eval_error:` evaluation fails with an `EvalErrorKind` matching the pattern
/// - `parse_error:` parsing fails with a `ParseErrorKind` matching the pattern
/// - `lex_error:` lexing fails with a `LexErrorKind` matching the pattern
macro_rules! test_case {
    ($name:ident, input: $input:expr, value: $value:expr $(,)?) => {
        #[test]
        fn $name() {
            let actual = $crate::cases::evaluate($input);
            pretty_assertions::assert_eq!(actual, Ok(sieve::Value::from($value)), "{}", $input);
        }
    };
    ($name:ident, input: $input:expr, eval_error: $kind:pat $(,)?) => {
        #[test]
        fn $name() {
            let actual = $crate::cases::evaluate($input);
            assert!(
                matches!(&actual, Err(sieve::Error::Eval(e)) if matches!(e.kind, $kind)),
                "{}: got {:?}",
                $input,
                actual
            );
            assert_eq!($crate::cases::host_calls(), 0, "{} reached the host", $input);
        }
    };
    ($name:ident, input: $input:expr, parse_error: $kind:pat $(,)?) => {
        #[test]
        fn $name() {
            let actual = $crate::cases::evaluate($input);
            assert!(
                matches!(&actual, Err(sieve::Error::Parse(e)) if matches!(e.kind, $kind)),
                "{}: got {:?}",
                $input,
                actual
            );
        }
    };
    ($name:ident, input: $input:expr, lex_error: $kind:pat $(,)?) => {
        #[test]
        fn $name() {
            let actual = $crate::cases::evaluate($input);
            assert!(
                matches!(&actual, Err(sieve::Error::Lex(e)) if matches!(e.kind, $kind)),
                "{}: got {:?}",
                $input,
                actual
            );
        }
    };
}
