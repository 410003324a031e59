#[cfg(test)]
use super::*;

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input)
        .expect("Failed to tokenize")
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_full_ker_example() {
    let input = r#"
# server settings
server {
    host = "localhost"
    port = 8080
    tags = [ "a", "b", "c" ]
}
"#;

    let expected_tokens = vec![
        TokenKind::Ident("server".into()),
        TokenKind::LBrace,
        TokenKind::Ident("host".into()),
        TokenKind::Equals,
        TokenKind::String("localhost".into()),
        TokenKind::Ident("port".into()),
        TokenKind::Equals,
        TokenKind::Number(Number::Int(8080)),
        TokenKind::Ident("tags".into()),
        TokenKind::Equals,
        TokenKind::LBracket,
        TokenKind::String("a".into()),
        TokenKind::Comma,
        TokenKind::String("b".into()),
        TokenKind::Comma,
        TokenKind::String("c".into()),
        TokenKind::RBracket,
        TokenKind::RBrace,
        TokenKind::Eof,
    ];

    assert_eq!(kinds(input), expected_tokens);
}

#[test]
fn test_positions_are_one_based() {
    let tokens = tokenize("a = 1\n  b = \"x\"").unwrap();
    let positions: Vec<(usize, usize)> = tokens.iter().map(|t| (t.line, t.column)).collect();
    assert_eq!(
        positions,
        vec![(1, 1), (1, 3), (1, 5), (2, 3), (2, 5), (2, 7), (2, 10)]
    );
}

#[test]
fn test_comments_are_discarded() {
    let input = "# full line\nport = 8080 # trailing\n// slash line\nhost = \"h\" // trailing too\n";
    assert_eq!(
        kinds(input),
        vec![
            TokenKind::Ident("port".into()),
            TokenKind::Equals,
            TokenKind::Number(Number::Int(8080)),
            TokenKind::Ident("host".into()),
            TokenKind::Equals,
            TokenKind::String("h".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_hash_inside_string_is_not_a_comment() {
    assert_eq!(
        kinds(r#"url = "http://x/#frag""#),
        vec![
            TokenKind::Ident("url".into()),
            TokenKind::Equals,
            TokenKind::String("http://x/#frag".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_keywords_are_retagged() {
    assert_eq!(
        kinds("true false null True False None truthy"),
        vec![
            TokenKind::Bool(true),
            TokenKind::Bool(false),
            TokenKind::Null,
            TokenKind::Bool(true),
            TokenKind::Bool(false),
            TokenKind::Null,
            TokenKind::Ident("truthy".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_keywords_ignore_case() {
    assert_eq!(
        kinds("TRUE fAlSe NULL Null None none NONE"),
        vec![
            TokenKind::Bool(true),
            TokenKind::Bool(false),
            TokenKind::Null,
            TokenKind::Null,
            TokenKind::Null,
            TokenKind::Ident("none".into()),
            TokenKind::Ident("NONE".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_numbers() {
    assert_eq!(
        kinds("0 -12 +7 3.25 -0.5 1e3 2.5E-2"),
        vec![
            TokenKind::Number(Number::Int(0)),
            TokenKind::Number(Number::Int(-12)),
            TokenKind::Number(Number::Int(7)),
            TokenKind::Number(Number::Float(3.25)),
            TokenKind::Number(Number::Float(-0.5)),
            TokenKind::Number(Number::Float(1000.0)),
            TokenKind::Number(Number::Float(0.025)),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_huge_integer_becomes_float() {
    assert_eq!(
        kinds("99999999999999999999"),
        vec![TokenKind::Number(Number::Float(1e20)), TokenKind::Eof]
    );
}

#[test]
fn test_out_of_range_numbers_are_rejected() {
    let huge = "9".repeat(400);
    for input in ["1e400", "-1e400", huge.as_str()] {
        match tokenize(&format!("x = {}", input)) {
            Err(KerError::InvalidNumber { literal, line, column, hint, .. }) => {
                assert_eq!(literal, input);
                assert_eq!((line, column), (1, 5));
                assert_eq!(hint.as_deref(), Some("Number is out of range"));
            }
            other => panic!("Expected InvalidNumber for {input:?}, got {other:?}"),
        }
    }

    // Underflow is still a finite number.
    assert_eq!(
        kinds("1e-400"),
        vec![TokenKind::Number(Number::Float(0.0)), TokenKind::Eof]
    );
}

#[test]
fn test_invalid_numbers() {
    for input in ["1.2.3", "1.", "01", "1e", "12abc", "-1.x"] {
        match tokenize(input) {
            Err(KerError::InvalidNumber { line, column, .. }) => {
                assert_eq!((line, column), (1, 1), "input {input:?}");
            }
            other => panic!("Expected InvalidNumber for {input:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_two_decimal_points_reports_whole_literal() {
    match tokenize("x = 1.2.3") {
        Err(KerError::InvalidNumber { literal, column, .. }) => {
            assert_eq!(literal, "1.2.3");
            assert_eq!(column, 5);
        }
        other => panic!("Expected InvalidNumber, got {other:?}"),
    }
}

#[test]
fn test_string_escapes() {
    assert_eq!(
        kinds(r#""a\"b\\c\nd\te\u263A\/""#),
        vec![TokenKind::String("a\"b\\c\nd\te\u{263A}/".into()), TokenKind::Eof]
    );
}

#[test]
fn test_surrogate_pair_escape() {
    assert_eq!(
        kinds(r#""\uD83D\uDE00""#),
        vec![TokenKind::String("\u{1F600}".into()), TokenKind::Eof]
    );
}

#[test]
fn test_unknown_escape_kept_verbatim() {
    assert_eq!(
        kinds(r#""C:\q""#),
        vec![TokenKind::String("C:\\q".into()), TokenKind::Eof]
    );
}

#[test]
fn test_multiline_string() {
    let tokens = tokenize("s = \"one\ntwo\"\nnext = 1").unwrap();
    assert_eq!(tokens[2].kind, TokenKind::String("one\ntwo".into()));
    assert_eq!((tokens[3].line, tokens[3].column), (3, 1));
}

#[test]
fn test_bad_unicode_escape() {
    match tokenize(r#""\u12G4""#) {
        Err(KerError::InvalidEscape { sequence, .. }) => assert_eq!(sequence, "\\u12"),
        other => panic!("Expected InvalidEscape, got {other:?}"),
    }
    assert!(matches!(tokenize(r#""\uD83D""#), Err(KerError::InvalidEscape { .. })));
}

#[test]
fn test_unterminated_string_error() {
    let result = tokenize("name = \"unterminated");
    assert_eq!(
        result,
        Err(KerError::UnterminatedString {
            line: 1,
            column: 8,
            hint: Some("String literal not closed".into()),
            code: Some(102),
        })
    );
}

#[test]
fn test_trailing_backslash_is_unterminated() {
    assert!(matches!(tokenize("\"abc\\"), Err(KerError::UnterminatedString { .. })));
}

#[test]
fn test_unexpected_character() {
    match tokenize("a = 1\nb = @") {
        Err(KerError::UnexpectedCharacter { character, line, column, .. }) => {
            assert_eq!(character, '@');
            assert_eq!((line, column), (2, 5));
        }
        other => panic!("Expected UnexpectedCharacter, got {other:?}"),
    }
}

#[test]
fn test_lone_sign_and_slash_are_unexpected() {
    assert!(matches!(tokenize("-"), Err(KerError::UnexpectedCharacter { character: '-', .. })));
    assert!(matches!(tokenize("/ x"), Err(KerError::UnexpectedCharacter { character: '/', .. })));
}

#[test]
fn test_empty_input_yields_single_eof() {
    let tokens = tokenize("").unwrap();
    assert_eq!(tokens, vec![Token::new(TokenKind::Eof, 1, 1)]);

    let tokens = tokenize("   # only a comment\n").unwrap();
    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is_eof());
}

#[test]
fn test_iterator_stops_after_eof() {
    let lexer = Lexer::new("a = 1");
    let collected: Vec<_> = lexer.collect();
    assert_eq!(collected.len(), 4);
    assert!(collected.last().unwrap().as_ref().unwrap().is_eof());
}
