use super::*;

pub(super) fn parse_value(parser: &mut Parser) -> Result<Value, KerError> {
    match parser.peek().kind {
        TokenKind::LBracket => return parse_array_value(parser),
        TokenKind::LBrace => return parse_block_value(parser),
        _ => {}
    }

    let token = parser.bump();
    match token.kind {
        TokenKind::String(s) => Ok(Value::String(s)),
        TokenKind::Number(n) => Ok(Value::Number(n)),
        TokenKind::Bool(b) => Ok(Value::Bool(b)),
        TokenKind::Null => Ok(Value::Null),
        _ => Err(unexpected_token(
            &token,
            "a value",
            Some("Values are strings, numbers, true/false, null, [arrays] or {blocks}".into()),
        )),
    }
}

fn parse_block_value(parser: &mut Parser) -> Result<Value, KerError> {
    let open = parser.bump(); // consume {
    parser.enter(&open)?;
    let block = document::parse_block_body(parser, Some((open.line, open.column)))?;
    parser.leave();
    Ok(Value::Block(block))
}

fn parse_array_value(parser: &mut Parser) -> Result<Value, KerError> {
    let open = parser.bump(); // consume [
    parser.enter(&open)?;
    let mut arr = Vec::new();

    loop {
        if parser.peek().kind == TokenKind::RBracket {
            parser.bump();
            break;
        }

        arr.push(parse_value(parser)?);

        // Commas separate elements; one trailing comma is fine.
        match parser.peek().kind {
            TokenKind::Comma => {
                parser.bump();
            }
            TokenKind::RBracket => {
                parser.bump();
                break;
            }
            _ => {
                return Err(unexpected_token(
                    parser.peek(),
                    "',' or ']'",
                    Some(format!("Array opened at {}:{}", open.line, open.column)),
                ));
            }
        }
    }

    parser.leave();
    Ok(Value::Array(arr))
}
