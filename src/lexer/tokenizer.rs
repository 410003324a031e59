use super::*;
use super::scanner::{bump, peek_second, skip_whitespace_and_comments};

pub(super) fn next_token(lexer: &mut Lexer) -> Result<Token, KerError> {
    skip_whitespace_and_comments(lexer);

    let (line, column) = (lexer.line, lexer.column);

    let kind = match lexer.peek {
        None => TokenKind::Eof,
        Some('{') => tokenize_symbol(lexer, TokenKind::LBrace),
        Some('}') => tokenize_symbol(lexer, TokenKind::RBrace),
        Some('[') => tokenize_symbol(lexer, TokenKind::LBracket),
        Some(']') => tokenize_symbol(lexer, TokenKind::RBracket),
        Some('=') => tokenize_symbol(lexer, TokenKind::Equals),
        Some(':') => tokenize_symbol(lexer, TokenKind::Colon),
        Some(',') => tokenize_symbol(lexer, TokenKind::Comma),
        Some('"') => tokenize_string(lexer, line, column)?,
        Some(c) if c.is_ascii_digit() => tokenize_number(lexer, line, column)?,
        Some(c @ ('-' | '+')) => {
            if peek_second(lexer).is_some_and(|n| n.is_ascii_digit()) {
                tokenize_number(lexer, line, column)?
            } else {
                return Err(unexpected_char(c, line, column));
            }
        }
        Some(c) if c.is_alphabetic() || c == '_' => tokenize_identifier_or_keyword(lexer),
        Some(ch) => return Err(unexpected_char(ch, line, column)),
    };

    Ok(Token::new(kind, line, column))
}

fn tokenize_symbol(lexer: &mut Lexer, kind: TokenKind) -> TokenKind {
    bump(lexer);
    kind
}

fn tokenize_string(lexer: &mut Lexer, line: usize, column: usize) -> Result<TokenKind, KerError> {
    bump(lexer); // opening quote
    let mut content = String::new();

    loop {
        let (esc_line, esc_column) = (lexer.line, lexer.column);
        match bump(lexer) {
            None => return Err(unterminated(line, column)),
            Some('"') => break,
            Some('\\') => match bump(lexer) {
                None => return Err(unterminated(line, column)),
                Some('n') => content.push('\n'),
                Some('t') => content.push('\t'),
                Some('r') => content.push('\r'),
                Some('b') => content.push('\u{8}'),
                Some('f') => content.push('\u{c}'),
                Some('"') => content.push('"'),
                Some('\\') => content.push('\\'),
                Some('/') => content.push('/'),
                Some('u') => content.push(tokenize_unicode_escape(lexer, esc_line, esc_column)?),
                // Unknown escapes are kept verbatim.
                Some(other) => {
                    content.push('\\');
                    content.push(other);
                }
            },
            Some(ch) => content.push(ch),
        }
    }

    Ok(TokenKind::String(content))
}

/// Decode the `XXXX` after `\u`, pairing UTF-16 surrogates when a low
/// surrogate escape follows a high one.
fn tokenize_unicode_escape(lexer: &mut Lexer, line: usize, column: usize) -> Result<char, KerError> {
    let high = read_hex4(lexer, line, column)?;

    let code_point = if (0xD800..=0xDBFF).contains(&high) {
        if lexer.peek != Some('\\') || peek_second(lexer) != Some('u') {
            return Err(invalid_escape(format!("\\u{:04X}", high), line, column, "Unpaired high surrogate"));
        }
        bump(lexer);
        bump(lexer);
        let low = read_hex4(lexer, line, column)?;
        if !(0xDC00..=0xDFFF).contains(&low) {
            return Err(invalid_escape(
                format!("\\u{:04X}\\u{:04X}", high, low),
                line,
                column,
                "Expected a low surrogate after a high surrogate",
            ));
        }
        0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
    } else {
        high
    };

    char::from_u32(code_point).ok_or_else(|| {
        invalid_escape(format!("\\u{:04X}", code_point), line, column, "Not a valid unicode scalar value")
    })
}

fn read_hex4(lexer: &mut Lexer, line: usize, column: usize) -> Result<u32, KerError> {
    let mut digits = String::new();
    for _ in 0..4 {
        match lexer.peek {
            Some(c) if c.is_ascii_hexdigit() => {
                digits.push(c);
                bump(lexer);
            }
            _ => {
                return Err(invalid_escape(
                    format!("\\u{}", digits),
                    line,
                    column,
                    "Unicode escapes need exactly four hex digits",
                ));
            }
        }
    }
    u32::from_str_radix(&digits, 16)
        .map_err(|_| invalid_escape(format!("\\u{}", digits), line, column, "Invalid hex digits"))
}

fn tokenize_number(lexer: &mut Lexer, line: usize, column: usize) -> Result<TokenKind, KerError> {
    let mut literal = String::new();
    let mut is_float = false;

    if let Some(sign @ ('-' | '+')) = lexer.peek {
        literal.push(sign);
        bump(lexer);
    }

    let int_start = literal.len();
    read_digits(lexer, &mut literal);
    let int_digits = &literal[int_start..];
    if int_digits.len() > 1 && int_digits.starts_with('0') {
        consume_trailing(lexer, &mut literal);
        return Err(invalid_number(literal, line, column, "Leading zeros are not allowed"));
    }

    if lexer.peek == Some('.') {
        literal.push('.');
        bump(lexer);
        if read_digits(lexer, &mut literal) == 0 {
            consume_trailing(lexer, &mut literal);
            return Err(invalid_number(literal, line, column, "Expected digits after the decimal point"));
        }
        is_float = true;
    }

    if let Some(e @ ('e' | 'E')) = lexer.peek {
        literal.push(e);
        bump(lexer);
        if let Some(sign @ ('-' | '+')) = lexer.peek {
            literal.push(sign);
            bump(lexer);
        }
        if read_digits(lexer, &mut literal) == 0 {
            consume_trailing(lexer, &mut literal);
            return Err(invalid_number(literal, line, column, "Expected digits in the exponent"));
        }
        is_float = true;
    }

    match lexer.peek {
        Some('.') => {
            consume_trailing(lexer, &mut literal);
            return Err(invalid_number(literal, line, column, "A number can have only one decimal point"));
        }
        Some(c) if c.is_alphanumeric() || c == '_' => {
            consume_trailing(lexer, &mut literal);
            return Err(invalid_number(literal, line, column, "Separate numbers from identifiers with whitespace"));
        }
        _ => {}
    }

    if !is_float {
        if let Ok(i) = literal.parse::<i64>() {
            return Ok(TokenKind::Number(Number::Int(i)));
        }
    }

    // Integers beyond i64 fall back to floating point.
    let value = match literal.parse::<f64>() {
        Ok(f) => f,
        Err(_) => return Err(invalid_number(literal, line, column, "Not a valid number")),
    };
    if !value.is_finite() {
        return Err(invalid_number(literal, line, column, "Number is out of range"));
    }
    Ok(TokenKind::Number(Number::Float(value)))
}

fn read_digits(lexer: &mut Lexer, out: &mut String) -> usize {
    let mut count = 0;
    while let Some(ch) = lexer.peek {
        if ch.is_ascii_digit() {
            out.push(ch);
            bump(lexer);
            count += 1;
        } else {
            break;
        }
    }
    count
}

/// Pull the rest of a malformed literal into `out` so the error shows all of it.
fn consume_trailing(lexer: &mut Lexer, out: &mut String) {
    while let Some(ch) = lexer.peek {
        if ch.is_alphanumeric() || ch == '.' || ch == '_' {
            out.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }
}

fn tokenize_identifier_or_keyword(lexer: &mut Lexer) -> TokenKind {
    let mut ident = String::new();

    while let Some(ch) = lexer.peek {
        if ch.is_alphanumeric() || ch == '_' {
            ident.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }

    if ident == "None" {
        return TokenKind::Null;
    }

    // Literal keywords match in any case.
    match ident.to_ascii_lowercase().as_str() {
        "true" => TokenKind::Bool(true),
        "false" => TokenKind::Bool(false),
        "null" => TokenKind::Null,
        _ => TokenKind::Ident(ident),
    }
}

fn unexpected_char(character: char, line: usize, column: usize) -> KerError {
    KerError::UnexpectedCharacter {
        character,
        line,
        column,
        hint: Some("Unexpected character in input".into()),
        code: Some(101),
    }
}

fn unterminated(line: usize, column: usize) -> KerError {
    KerError::UnterminatedString {
        line,
        column,
        hint: Some("String literal not closed".into()),
        code: Some(102),
    }
}

fn invalid_number(literal: String, line: usize, column: usize, hint: &str) -> KerError {
    KerError::InvalidNumber {
        literal,
        line,
        column,
        hint: Some(hint.into()),
        code: Some(103),
    }
}

fn invalid_escape(sequence: String, line: usize, column: usize, hint: &str) -> KerError {
    KerError::InvalidEscape {
        sequence,
        line,
        column,
        hint: Some(hint.into()),
        code: Some(104),
    }
}
