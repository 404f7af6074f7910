use csvlex::{tokenize, CompiledPattern, Lexer, PatternTable, TokenKind, Tokenizer};

fn pairs(input: &str) -> Vec<(TokenKind, &str)> {
    tokenize(input)
        .unwrap()
        .into_iter()
        .map(|t| (t.kind(), t.text().unwrap()))
        .collect()
}

#[test]
fn test_empty_input() {
    let mut lexer = Lexer::new("");
    assert!(lexer.is_eof());
    assert!(lexer.step().unwrap().is_none());
    assert!(lexer.step().unwrap().is_none());
    assert!(tokenize("").unwrap().is_empty());
}

#[test]
fn test_lex_all_mixed_fields() {
    assert_eq!(
        pairs("One,Two\n\"Three\",\"Four\""),
        vec![
            (TokenKind::PlainField, "One"),
            (TokenKind::FieldSeparator, ","),
            (TokenKind::PlainField, "Two"),
            (TokenKind::LineSeparator, "\n"),
            (TokenKind::QuotedField, "\"Three\""),
            (TokenKind::FieldSeparator, ","),
            (TokenKind::QuotedField, "\"Four\""),
        ]
    );
}

#[test]
fn test_lone_quote_fails_at_zero() {
    let err = tokenize("\"").unwrap_err();
    assert_eq!(err.offset(), 0);
    assert_eq!(err.remaining(), b"\"");
}

#[test]
fn test_lex_all_discards_partial_tokens() {
    let err = Lexer::new("a,b\nc,\"d").lex_all().unwrap_err();
    assert_eq!(err.offset(), 6);
    assert_eq!(err.pos().line, 1);
    assert_eq!(err.remaining(), b"\"d");
}

#[test]
fn test_single_plain_field() {
    let mut lexer = Lexer::new("One");
    let token = lexer.step().unwrap().unwrap();
    assert_eq!(token.kind(), TokenKind::PlainField);
    assert_eq!(token.value(), b"One");
    assert!(lexer.step().unwrap().is_none());
    assert!(lexer.is_eof());
}

#[test]
fn test_empty_fields_are_just_separators() {
    assert_eq!(
        pairs(",,\r\n"),
        vec![
            (TokenKind::FieldSeparator, ","),
            (TokenKind::FieldSeparator, ","),
            (TokenKind::LineSeparator, "\r\n"),
        ]
    );
}

#[test]
fn test_tokens_borrow_input() {
    let input = String::from("x,\"y\"");
    let tokens = tokenize(&input).unwrap();
    let base = input.as_ptr() as usize;
    for token in &tokens {
        let offset = token.value().as_ptr() as usize - base;
        assert_eq!(offset, token.span().start.source);
        assert_eq!(&input.as_bytes()[token.span().range()], token.value());
    }
}

#[test]
fn test_custom_table_compiles_like_builtin() {
    let custom = PatternTable::builder()
        .rule(r#"[^",\r\n]+"#, TokenKind::PlainField)
        .rule(r#""[^"\\]*(?:\\.[^"\\]*)*""#, TokenKind::QuotedField)
        .rule(",", TokenKind::FieldSeparator)
        .rule(r"\r\n?|\n", TokenKind::LineSeparator)
        .finish();
    assert_eq!(custom, PatternTable::default());
    let pattern = custom.compile().unwrap();
    assert_eq!(pattern.as_str(), CompiledPattern::csv().as_str());
}
