//! Adversarial expressions against a context full of dangerous host values.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::{
    api::GrammarConfig,
    parser, stdlib,
    test_utils::init_test_logging,
    values::{Arity, Callable},
};
use pretty_assertions::assert_eq;

/// A host function that counts its invocations so tests can prove it never
/// ran.
fn dangerous(name: &str, calls: &Arc<AtomicUsize>) -> Value {
    let calls = Arc::clone(calls);
    Value::function(name, Arity::AtLeast(0), move |_| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Boolean(true))
    })
}

struct Sandbox {
    grammar: GrammarConfig,
    registry: TrustedRegistry,
    context: Context,
    calls: Arc<AtomicUsize>,
}

impl Sandbox {
    fn new() -> Self {
        init_test_logging();
        let calls = Arc::new(AtomicUsize::new(0));
        let context = Context::new()
            .with("write", dangerous("write", &calls))
            .with("cmd", dangerous("cmd", &calls))
            .with("exec", dangerous("exec", &calls))
            .with("evil", dangerous("cmd", &calls))
            .with(
                "a",
                Value::object([("b", Value::object([("write", dangerous("write", &calls))]))]),
            )
            .with(
                "user",
                Value::object([("config", Value::object([("isAdmin", false)]))]),
            )
            .with("obj", Value::object([("x", 1)]));

        Self {
            grammar: GrammarConfig {
                fndef: true,
                ..GrammarConfig::default()
            },
            registry: TrustedRegistry::with_builtins(),
            context,
            calls,
        }
    }

    fn run(&self, input: &str) -> Result<Value, EvalError> {
        let parsed = parser::parse(input, &self.grammar).expect("parsing failed");
        eval(&parsed, &self.context, &self.registry)
    }

    fn error(&self, input: &str) -> EvalErrorKind {
        match self.run(input) {
            Ok(value) => panic!("expected {input:?} to be rejected, got {value}"),
            Err(e) => e.kind,
        }
    }

    fn assert_denied_call(&self, input: &str, callee: &str) {
        assert_eq!(
            self.error(input),
            EvalErrorKind::CallNotAllowed {
                callee: callee.to_string()
            },
            "{input}"
        );
        assert_eq!(self.calls.load(Ordering::SeqCst), 0, "{input} reached the host");
    }

    fn assert_denied_member(&self, input: &str, name: &str) {
        assert_eq!(
            self.error(input),
            EvalErrorKind::ProtoAccessDenied {
                name: name.to_string()
            },
            "{input}"
        );
    }
}

// ============================================================================
// Calls to host functions
// ============================================================================

#[test]
fn test_direct_call_to_context_function() {
    let sandbox = Sandbox::new();
    sandbox.assert_denied_call("write('pwned.txt', 'Hello!')", "write");
    sandbox.assert_denied_call("exec('whoami')", "exec");
}

#[test]
fn test_variable_holding_dangerous_function() {
    let sandbox = Sandbox::new();
    sandbox.assert_denied_call("evil('ls -lh /')", "evil");
    sandbox.assert_denied_call("f = cmd; f('ls')", "f");
}

#[test]
fn test_nested_member_call() {
    let sandbox = Sandbox::new();
    sandbox.assert_denied_call("a.b.write('x', 'y')", "a.b.write");
    sandbox.assert_denied_call("a['b']['write']('x', 'y')", "a[..][..]");
}

#[test]
fn test_function_reached_through_values() {
    let sandbox = Sandbox::new();
    sandbox.assert_denied_call("[write][0]('x')", "<expression>[..]");
    sandbox.assert_denied_call("(true ? write : sqrt)('x')", "<expression>");
}

#[test]
fn test_local_function_calling_host_function() {
    let sandbox = Sandbox::new();

    assert_eq!(sandbox.run("(f(x) = x * x)(5)").unwrap(), Value::Number(25.0));
    sandbox.assert_denied_call("((h(x) = write('pwned.txt', x)) + h(5))", "write");
    sandbox.assert_denied_call("((h(x) = write(x)), h(5))", "write");
}

#[test]
fn test_host_function_passed_to_closure() {
    let sandbox = Sandbox::new();
    sandbox.assert_denied_call("apply(g) = g('x'); apply(write)", "g");
    sandbox.assert_denied_call("wrap(x) = cmd; wrap(1)('ls')", "wrap(..)");
}

#[test]
fn test_trust_is_by_identity_not_name() {
    let mut sandbox = Sandbox::new();
    // A host function that merely claims a builtin's name.
    sandbox
        .context
        .insert("sqrt", dangerous("sqrt", &sandbox.calls));
    sandbox.assert_denied_call("sqrt(4)", "sqrt");
}

#[test]
fn test_args_evaluated_before_denial() {
    let sandbox = Sandbox::new();
    // Argument errors surface first; the host is never reached either way.
    assert!(matches!(
        sandbox.error("write(missing)"),
        EvalErrorKind::UnknownIdentifier { .. }
    ));
    assert_eq!(sandbox.calls.load(Ordering::SeqCst), 0);
}

// ============================================================================
// Registered and built-in functions
// ============================================================================

#[test]
fn test_registered_function_through_alias() {
    let mut sandbox = Sandbox::new();
    let double = Callable::native("double", Arity::Exact(1), |args| {
        Ok(Value::Number(args[0].as_number().unwrap_or(f64::NAN) * 2.0))
    });
    sandbox.registry.register("double", double.clone());
    sandbox
        .context
        .insert("obj", Value::object([("alias", double)]));

    assert_eq!(sandbox.run("obj.alias(5)").unwrap(), Value::Number(10.0));
    assert_eq!(sandbox.run("double(5)").unwrap(), Value::Number(10.0));
}

#[test]
fn test_builtin_through_host_object() {
    let mut sandbox = Sandbox::new();
    let sqrt = stdlib::builtin("sqrt").expect("sqrt is built in");
    sandbox
        .context
        .insert("obj", Value::object([("squareRoot", sqrt)]));

    assert_eq!(sandbox.run("obj.squareRoot(16)").unwrap(), Value::Number(4.0));
}

#[test]
fn test_closures_do_not_outlive_their_evaluation() {
    let mut sandbox = Sandbox::new();
    let closure = sandbox.run("f(x) = x + 1").unwrap();
    assert_eq!(sandbox.run("f(x) = x + 1; f(1)").unwrap(), Value::Number(2.0));

    // The same closure handed back through the host is no longer trusted.
    sandbox.context.insert("g", closure);
    sandbox.assert_denied_call("g(1)", "g");
}

// ============================================================================
// Prototype members
// ============================================================================

#[test]
fn test_proto_member_read() {
    let sandbox = Sandbox::new();
    sandbox.assert_denied_member("obj.__proto__", "__proto__");
    sandbox.assert_denied_member("obj.constructor", "constructor");
    sandbox.assert_denied_member("obj.prototype", "prototype");
    sandbox.assert_denied_member("user.config.__proto__", "__proto__");
}

#[test]
fn test_proto_member_on_any_value() {
    let sandbox = Sandbox::new();
    // Non-objects are denied before the type is even considered.
    sandbox.assert_denied_member("'s'.constructor", "constructor");
    sandbox.assert_denied_member("(1).__proto__", "__proto__");
    sandbox.assert_denied_member("[1]['constructor']", "constructor");
    sandbox.assert_denied_member("sqrt.prototype", "prototype");
}

#[test]
fn test_proto_member_computed_key() {
    let sandbox = Sandbox::new();
    sandbox.assert_denied_member("obj['__proto__']", "__proto__");
    sandbox.assert_denied_member("obj['constr' || 'uctor']", "constructor");
    sandbox.assert_denied_member("k = '__proto__'; obj[k]", "__proto__");
}

#[test]
fn test_proto_member_in_assignment_target() {
    let sandbox = Sandbox::new();
    sandbox.assert_denied_member("user.config.__proto__.isAdmin = true", "__proto__");
    sandbox.assert_denied_member("obj.__proto__ = 1", "__proto__");
    sandbox.assert_denied_member("obj['prototype'] = 1", "prototype");

    // Host data is untouched.
    assert_eq!(
        sandbox.run("user.config.isAdmin").unwrap(),
        Value::Boolean(false)
    );
}

#[test]
fn test_member_assignment_never_mutates() {
    let sandbox = Sandbox::new();
    assert_eq!(
        sandbox.error("user.config.isAdmin = true"),
        EvalErrorKind::ReadOnly {
            name: "user.config.isAdmin".to_string()
        }
    );
    assert_eq!(
        sandbox.run("user.config.isAdmin").unwrap(),
        Value::Boolean(false)
    );
}

#[test]
fn test_security_violations_are_flagged() {
    let sandbox = Sandbox::new();
    assert!(sandbox.error("write('x')").is_security_violation());
    assert!(sandbox.error("obj.__proto__").is_security_violation());
    assert!(!sandbox.error("obj.missing").is_security_violation());
    assert!(!sandbox.error("sqrt(1, 2)").is_security_violation());
}
