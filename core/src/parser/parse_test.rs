use crate::api::{Error, GrammarConfig};
use crate::parser::{ExprKind, Literal, ParseErrorKind, parse};
use pretty_assertions::assert_eq;

fn parse_default(source: &str) -> Result<crate::parser::Expr, Error> {
    parse(source, &GrammarConfig::default())
}

fn parse_error(source: &str, config: &GrammarConfig) -> crate::parser::ParseError {
    match parse(source, config) {
        Err(Error::Parse(e)) => e,
        other => panic!("expected parse error for {source:?}, got {other:?}"),
    }
}

fn with_fndef() -> GrammarConfig {
    GrammarConfig {
        fndef: true,
        ..GrammarConfig::default()
    }
}

#[test]
fn test_literals() {
    let expr = parse_default("'hi'").unwrap();
    assert_eq!(expr.kind, ExprKind::Literal(Literal::Str("hi".to_string())));

    let expr = parse_default("true").unwrap();
    assert_eq!(expr.kind, ExprKind::Literal(Literal::Bool(true)));

    let expr = parse_default("0x10").unwrap();
    assert_eq!(expr.kind, ExprKind::Literal(Literal::Number(16.0)));
}

#[test]
fn test_spans_cover_source() {
    let source = "foo.bar(1, 2)";
    let expr = parse_default(source).unwrap();
    assert_eq!(expr.span.str_of(source), source);

    let ExprKind::Call { callee, args } = &expr.kind else {
        panic!("expected call, got {expr}");
    };
    assert_eq!(callee.span.str_of(source), "foo.bar");
    assert_eq!(args[1].span.str_of(source), "2");
}

#[test]
fn test_array_literals() {
    assert_eq!(parse_default("[]").unwrap().to_string(), "(array)");
    assert_eq!(
        parse_default("[1, [2], 'a']").unwrap().to_string(),
        "(array 1 (array 2) \"a\")"
    );
}

#[test]
fn test_parenthesized_sequence() {
    let expr = parse(" ((h(x) = x) , h(5))", &with_fndef()).unwrap();
    assert_eq!(expr.to_string(), "(seq (def h (x) x) (call h 5))");
}

#[test]
fn test_member_assignment_parses() {
    let expr = parse_default("user.config.__proto__.isAdmin = true").unwrap();
    assert_eq!(
        expr.to_string(),
        "(= (. (. (. user config) __proto__) isAdmin) true)"
    );
}

#[test]
fn test_fndef_disabled_is_parse_error() {
    let err = parse_error("f(x) = x * x", &GrammarConfig::default());
    assert_eq!(
        err.kind,
        ParseErrorKind::ExtensionDisabled { extension: "fndef" }
    );
    assert_eq!(err.position(), 5);
}

#[test]
fn test_assignment_disabled_is_parse_error() {
    let config = GrammarConfig {
        assignment: false,
        ..GrammarConfig::default()
    };
    let err = parse_error("x = 1", &config);
    assert_eq!(
        err.kind,
        ParseErrorKind::ExtensionDisabled {
            extension: "assignment"
        }
    );

    // Function definitions are governed by their own switch.
    let config = GrammarConfig {
        assignment: false,
        fndef: true,
        ..GrammarConfig::default()
    };
    assert!(parse("f(x) = x", &config).is_ok());
}

#[test]
fn test_in_operator_disabled_by_default() {
    let err = parse_error("1 in [1]", &GrammarConfig::default());
    assert_eq!(err.kind, ParseErrorKind::ExtensionDisabled { extension: "in" });
    assert_eq!(err.position(), 2);
}

#[test]
fn test_invalid_function_definitions() {
    let err = parse_error("f(1) = 2", &with_fndef());
    assert_eq!(err.kind, ParseErrorKind::InvalidAssignmentTarget);

    let err = parse_error("a.f(x) = 2", &with_fndef());
    assert_eq!(err.kind, ParseErrorKind::InvalidAssignmentTarget);

    let err = parse_error("f(x, x) = 2", &with_fndef());
    assert_eq!(
        err.kind,
        ParseErrorKind::DuplicateParameter {
            name: "x".to_string()
        }
    );
}

#[test]
fn test_invalid_assignment_target() {
    let err = parse_error("1 + 2 = 3", &GrammarConfig::default());
    assert_eq!(err.kind, ParseErrorKind::InvalidAssignmentTarget);
}

#[test]
fn test_unclosed_delimiters() {
    let err = parse_error("(1 + 2", &GrammarConfig::default());
    assert_eq!(err.kind, ParseErrorKind::UnclosedDelimiter { delimiter: '(' });
    assert_eq!(err.position(), 0);
    assert_eq!(err.expected(), Some("`)`"));

    let err = parse_error("max(1, 2", &GrammarConfig::default());
    assert_eq!(err.kind, ParseErrorKind::UnclosedDelimiter { delimiter: '(' });
    assert_eq!(err.position(), 3);

    let err = parse_error("[1, 2", &GrammarConfig::default());
    assert_eq!(err.kind, ParseErrorKind::UnclosedDelimiter { delimiter: '[' });
}

#[test]
fn test_unexpected_tokens() {
    let err = parse_error("1 +", &GrammarConfig::default());
    assert_eq!(
        err.kind,
        ParseErrorKind::UnexpectedEnd {
            expected: "an expression".to_string()
        }
    );
    assert_eq!(err.position(), 3);

    let err = parse_error("1 2", &GrammarConfig::default());
    assert_eq!(err.position(), 2);
    assert_eq!(err.expected(), Some("an operator or end of input"));

    let err = parse_error("a ? b", &GrammarConfig::default());
    assert_eq!(err.expected(), Some("`:`"));

    let err = parse_error("a.1", &GrammarConfig::default());
    assert_eq!(err.expected(), Some("a member name"));

    let err = parse_error("()", &GrammarConfig::default());
    assert_eq!(err.position(), 1);
}

#[test]
fn test_empty_input() {
    let err = parse_error("", &GrammarConfig::default());
    assert_eq!(err.position(), 0);
    let err = parse_error("   ", &GrammarConfig::default());
    assert_eq!(err.position(), 3);
}

#[test]
fn test_nesting_limit() {
    let config = GrammarConfig {
        max_depth: 16,
        ..GrammarConfig::default()
    };
    let source = format!("{}1{}", "(".repeat(64), ")".repeat(64));
    let err = parse_error(&source, &config);
    assert_eq!(err.kind, ParseErrorKind::MaxDepthExceeded { max_depth: 16 });
    assert!(err.position() <= source.len());

    let deep_unary = "-".repeat(10_000) + "1";
    let err = parse_error(&deep_unary, &GrammarConfig::default());
    assert!(matches!(err.kind, ParseErrorKind::MaxDepthExceeded { .. }));
}

/// Inputs whose tree would nest once per repetition, whatever the operator.
fn deep_chains() -> Vec<(&'static str, String)> {
    vec![
        ("parens", format!("{}1{}", "(".repeat(50_000), ")".repeat(50_000))),
        ("unary", "-".repeat(50_000) + "1"),
        ("assignment", "a=".repeat(50_000) + "1"),
        ("conditional", "1?2:".repeat(200_000) + "3"),
        ("then branch", "1?".repeat(50_000) + "1" + &":1".repeat(50_000)),
        ("additive", "1+".repeat(50_000) + "1"),
        ("power", "2^".repeat(50_000) + "1"),
        ("member", "a".to_string() + &".b".repeat(50_000)),
        ("call", "f".to_string() + &"()".repeat(50_000)),
        ("index", "a".to_string() + &"[0]".repeat(50_000)),
        ("fndef", "f(x)=".repeat(50_000) + "1"),
        ("array", "[".repeat(50_000) + &"]".repeat(50_000)),
    ]
}

#[test]
fn test_nesting_limit_covers_every_chain() {
    for (shape, source) in deep_chains() {
        let err = parse_error(&source, &with_fndef());
        assert_eq!(
            err.kind,
            ParseErrorKind::MaxDepthExceeded { max_depth: 256 },
            "{shape}"
        );
        assert!(err.position() <= source.len(), "{shape}");
    }
}

#[test]
fn test_nesting_limit_on_small_thread() {
    let handle = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(|| {
            for (shape, source) in deep_chains() {
                let result = parse(&source, &with_fndef());
                assert!(
                    matches!(
                        result,
                        Err(Error::Parse(ref e)) if matches!(e.kind, ParseErrorKind::MaxDepthExceeded { .. })
                    ),
                    "{shape}"
                );
            }
            // Right up to the limit still parses on the small stack.
            let source = "1+".repeat(200) + "1";
            assert!(parse(&source, &GrammarConfig::default()).is_ok());
        })
        .unwrap();
    handle.join().unwrap();
}

#[test]
fn test_moderate_chains_parse() {
    let config = with_fndef();
    assert!(parse("a = b = c = 1", &config).is_ok());
    assert!(parse(&("1?2:".repeat(100) + "3"), &config).is_ok());
    assert!(parse(&("1 + ".repeat(200) + "1"), &config).is_ok());
    assert!(parse(&("a".to_string() + &".b".repeat(200)), &config).is_ok());

    let tight = GrammarConfig {
        max_depth: 8,
        ..GrammarConfig::default()
    };
    assert!(parse("1 + 2 + 3", &tight).is_ok());
    let err = parse_error(&("1 + ".repeat(20) + "1"), &tight);
    assert_eq!(err.kind, ParseErrorKind::MaxDepthExceeded { max_depth: 8 });
}

#[test]
fn test_lex_errors_surface_through_parse() {
    match parse("1 + @", &GrammarConfig::default()) {
        Err(Error::Lex(e)) => assert_eq!(e.position(), 4),
        other => panic!("expected lex error, got {other:?}"),
    }
}

#[test]
fn test_error_positions_stay_in_bounds() {
    let inputs = [
        "(", ")", "[", "]", "a.", "a..b", "f(,)", "1 ? : 2", "= 1", "a[", "a[1", ";", "1;",
        "x = ", "not", "f(x) =", "[1,]", "((((", "a b c", "?:",
    ];
    for source in inputs {
        match parse(source, &with_fndef()) {
            Err(Error::Parse(e)) => assert!(
                e.position() <= source.len(),
                "position {} out of bounds for {source:?}",
                e.position()
            ),
            Err(Error::Lex(e)) => assert!(e.position() <= source.len()),
            other => panic!("expected failure for {source:?}, got {other:?}"),
        }
    }
}
