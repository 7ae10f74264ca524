//! Math functions.
//!
//! Unary: abs acos acosh asin asinh atan atanh cbrt ceil cos cosh exp expm1
//!        floor ln log log10 log2 log1p round sign sin sinh sqrt tan tanh trunc
//! Binary: atan2 pow roundTo
//! Variadic: min max hypot
//!
//! All functions follow IEEE-754: out-of-domain inputs produce `NaN` rather
//! than an error.

use super::number_arg;
use crate::evaluator::EvalErrorKind;
use crate::values::{Arity, Callable, Value};

const UNARY: &[(&str, fn(f64) -> f64)] = &[
    ("abs", f64::abs),
    ("acos", f64::acos),
    ("acosh", f64::acosh),
    ("asin", f64::asin),
    ("asinh", f64::asinh),
    ("atan", f64::atan),
    ("atanh", f64::atanh),
    ("cbrt", f64::cbrt),
    ("ceil", f64::ceil),
    ("cos", f64::cos),
    ("cosh", f64::cosh),
    ("exp", f64::exp),
    ("expm1", f64::exp_m1),
    ("floor", f64::floor),
    ("ln", f64::ln),
    ("log", f64::ln),
    ("log10", f64::log10),
    ("log2", f64::log2),
    ("log1p", f64::ln_1p),
    ("round", f64::round),
    ("sign", sign),
    ("sin", f64::sin),
    ("sinh", f64::sinh),
    ("sqrt", f64::sqrt),
    ("tan", f64::tan),
    ("tanh", f64::tanh),
    ("trunc", f64::trunc),
];

/// Like `f64::signum`, but zero and NaN map to themselves.
fn sign(x: f64) -> f64 {
    if x == 0.0 || x.is_nan() { x } else { x.signum() }
}

fn unary(name: &'static str, f: fn(f64) -> f64) -> Callable {
    Callable::native(name, Arity::Exact(1), move |args| {
        Ok(Value::Number(f(number_arg(name, args, 0)?)))
    })
}

fn math_atan2(args: &[Value]) -> Result<Value, EvalErrorKind> {
    let y = number_arg("atan2", args, 0)?;
    let x = number_arg("atan2", args, 1)?;
    Ok(Value::Number(y.atan2(x)))
}

fn math_pow(args: &[Value]) -> Result<Value, EvalErrorKind> {
    let base = number_arg("pow", args, 0)?;
    let exp = number_arg("pow", args, 1)?;
    Ok(Value::Number(base.powf(exp)))
}

/// Round to a number of decimal places. Negative places round to tens,
/// hundreds and so on.
fn math_round_to(args: &[Value]) -> Result<Value, EvalErrorKind> {
    let value = number_arg("roundTo", args, 0)?;
    let places = number_arg("roundTo", args, 1)?;
    if places.fract() != 0.0 {
        return Err(EvalErrorKind::native(
            "roundTo",
            format!("decimal places must be an integer, got {places}"),
        ));
    }
    let factor = 10f64.powf(places);
    if factor == 0.0 {
        // Rounding to a power of ten far above any finite value.
        return Ok(Value::Number(0.0));
    }
    let scaled = value * factor;
    if !scaled.is_finite() {
        // Already exact at this precision.
        return Ok(Value::Number(value));
    }
    Ok(Value::Number(scaled.round() / factor))
}

/// Numbers passed either as separate arguments or as a single array.
fn variadic_numbers(function: &str, args: &[Value]) -> Result<Vec<f64>, EvalErrorKind> {
    let items = match args {
        [Value::Array(items)] => &items[..],
        _ => args,
    };
    if items.is_empty() {
        return Err(EvalErrorKind::native(function, "requires at least one value"));
    }
    (0..items.len())
        .map(|i| number_arg(function, items, i))
        .collect()
}

fn math_min(args: &[Value]) -> Result<Value, EvalErrorKind> {
    let numbers = variadic_numbers("min", args)?;
    Ok(Value::Number(numbers.into_iter().fold(f64::INFINITY, f64::min)))
}

fn math_max(args: &[Value]) -> Result<Value, EvalErrorKind> {
    let numbers = variadic_numbers("max", args)?;
    Ok(Value::Number(
        numbers.into_iter().fold(f64::NEG_INFINITY, f64::max),
    ))
}

fn math_hypot(args: &[Value]) -> Result<Value, EvalErrorKind> {
    let numbers = variadic_numbers("hypot", args)?;
    Ok(Value::Number(numbers.into_iter().fold(0.0, f64::hypot)))
}

pub(super) fn functions() -> Vec<Callable> {
    let mut functions: Vec<Callable> = UNARY.iter().map(|&(name, f)| unary(name, f)).collect();
    functions.extend([
        Callable::native("atan2", Arity::Exact(2), math_atan2),
        Callable::native("pow", Arity::Exact(2), math_pow),
        Callable::native("roundTo", Arity::Exact(2), math_round_to),
        Callable::native("min", Arity::AtLeast(1), math_min),
        Callable::native("max", Arity::AtLeast(1), math_max),
        Callable::native("hypot", Arity::AtLeast(1), math_hypot),
    ]);
    functions
}
