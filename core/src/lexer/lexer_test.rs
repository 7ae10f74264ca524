use super::*;
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap_or_else(|e| panic!("tokenizing {source:?} failed: {e}"))
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

fn lex_error(source: &str) -> LexError {
    match tokenize(source) {
        Ok(tokens) => panic!("expected lex error for {source:?}, got {tokens:?}"),
        Err(e) => e,
    }
}

#[test]
fn test_numbers() {
    assert_eq!(
        kinds("1 2.5 3e2 4.5E-1 0xff"),
        vec![
            TokenKind::Number(1.0),
            TokenKind::Number(2.5),
            TokenKind::Number(300.0),
            TokenKind::Number(0.45),
            TokenKind::Number(255.0),
        ]
    );
}

#[test]
fn test_strings_and_escapes() {
    assert_eq!(
        kinds(r#""a\"b" 'it\'s' "A\n""#),
        vec![
            TokenKind::Str("a\"b".to_string()),
            TokenKind::Str("it's".to_string()),
            TokenKind::Str("A\n".to_string()),
        ]
    );
}

#[test]
fn test_identifiers_and_keywords() {
    assert_eq!(
        kinds("foo _bar $baz and android in not true"),
        vec![
            TokenKind::Ident("foo".to_string()),
            TokenKind::Ident("_bar".to_string()),
            TokenKind::Ident("$baz".to_string()),
            TokenKind::And,
            TokenKind::Ident("android".to_string()),
            TokenKind::In,
            TokenKind::Not,
            TokenKind::True,
        ]
    );
}

#[test]
fn test_operators_prefer_longest_match() {
    assert_eq!(
        kinds("a<=b==c!=d||e>=f=g!h"),
        vec![
            TokenKind::Ident("a".to_string()),
            TokenKind::Le,
            TokenKind::Ident("b".to_string()),
            TokenKind::EqEq,
            TokenKind::Ident("c".to_string()),
            TokenKind::NotEq,
            TokenKind::Ident("d".to_string()),
            TokenKind::PipePipe,
            TokenKind::Ident("e".to_string()),
            TokenKind::Ge,
            TokenKind::Ident("f".to_string()),
            TokenKind::Assign,
            TokenKind::Ident("g".to_string()),
            TokenKind::Bang,
            TokenKind::Ident("h".to_string()),
        ]
    );
}

#[test]
fn test_spans_and_text() {
    let tokens = tokenize("  foo.bar(12)").unwrap();
    let described: Vec<(&str, usize, TokenCategory)> = tokens
        .iter()
        .map(|t| (t.text, t.position(), t.category()))
        .collect();
    assert_eq!(
        described,
        vec![
            ("foo", 2, TokenCategory::Identifier),
            (".", 5, TokenCategory::Punctuation),
            ("bar", 6, TokenCategory::Identifier),
            ("(", 9, TokenCategory::Punctuation),
            ("12", 10, TokenCategory::Number),
            (")", 12, TokenCategory::Punctuation),
        ]
    );
}

#[test]
fn test_whitespace_is_insignificant() {
    assert_eq!(kinds("1+2"), kinds(" 1 \n+\t2 "));
    assert_eq!(kinds(""), vec![]);
}

#[test]
fn test_unexpected_character() {
    let err = lex_error("1 + #");
    assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter);
    assert_eq!(err.position(), 4);
    assert_eq!(err.text, "#");
}

#[test]
fn test_unterminated_string() {
    let err = lex_error("concat(\"abc");
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.position(), 7);

    assert_eq!(lex_error("'abc").kind, LexErrorKind::UnterminatedString);
}

#[test]
fn test_unterminated_number() {
    assert_eq!(lex_error("1e").kind, LexErrorKind::UnterminatedNumber);
    assert_eq!(lex_error("2.5e+").kind, LexErrorKind::UnterminatedNumber);
    assert_eq!(lex_error("3. + 1").kind, LexErrorKind::UnterminatedNumber);
}

#[test]
fn test_invalid_escape() {
    let err = lex_error(r#"x + "bad \q escape""#);
    assert_eq!(err.kind, LexErrorKind::InvalidEscape);
    assert_eq!(err.position(), 4);
}

#[test]
fn test_tokenize_is_restartable() {
    let source = "a.b(1, 'x')";
    assert_eq!(tokenize(source).unwrap(), tokenize(source).unwrap());
}
