use super::*;
use crate::ast::Block;

pub(super) fn parse_document(parser: &mut Parser) -> Result<Document, KerError> {
    let entries = parse_block_body(parser, None)?;
    tracing::debug!(entries = entries.len(), "parsed document");
    Ok(Document::new(entries))
}

/// Parse entries until the block ends.
///
/// `open` is the position of the `{` for a braced block, which is then closed
/// by `}`. The root block has no braces and ends at `Eof`.
pub(super) fn parse_block_body(
    parser: &mut Parser,
    open: Option<(usize, usize)>,
) -> Result<Block, KerError> {
    let mut block = Block::new();

    loop {
        match parser.peek().kind {
            TokenKind::Eof if open.is_none() => break,
            TokenKind::RBrace if open.is_some() => {
                parser.bump();
                break;
            }
            TokenKind::Ident(_) | TokenKind::String(_) => {
                let (line, column) = (parser.peek().line, parser.peek().column);
                let (key, value) = parse_entry(parser)?;
                if block.contains_key(&key) {
                    return Err(KerError::DuplicateKey {
                        key,
                        line,
                        column,
                        hint: Some("Each key may appear only once per block".into()),
                        code: Some(203),
                    });
                }
                block.insert(key, value);

                // Entries need no separator, but a comma is tolerated.
                if parser.peek().kind == TokenKind::Comma {
                    parser.bump();
                }
            }
            _ => {
                return Err(match open {
                    Some((line, column)) => unexpected_token(
                        parser.peek(),
                        "a key or '}'",
                        Some(format!("Block opened at {}:{}", line, column)),
                    ),
                    None => unexpected_token(parser.peek(), "a key or end of input", None),
                });
            }
        }
    }

    tracing::trace!(keys = block.len(), nested = open.is_some(), "parsed block");
    Ok(block)
}

/// `key = value`, `key { ... }` or `key: { ... }`.
fn parse_entry(parser: &mut Parser) -> Result<(String, Value), KerError> {
    let key_token = parser.bump();
    let key = match key_token.kind {
        TokenKind::Ident(k) | TokenKind::String(k) => k,
        _ => return Err(unexpected_token(&key_token, "a key", None)),
    };

    let value = match parser.peek().kind {
        TokenKind::Equals => {
            parser.bump();
            value::parse_value(parser)?
        }
        TokenKind::Colon => {
            parser.bump();
            if parser.peek().kind != TokenKind::LBrace {
                return Err(expected_token(parser.peek(), "{"));
            }
            value::parse_value(parser)?
        }
        TokenKind::LBrace => value::parse_value(parser)?,
        _ => return Err(expected_token(parser.peek(), "=")),
    };

    Ok((key, value))
}

fn expected_token(found: &Token, expected: &str) -> KerError {
    KerError::ExpectedToken {
        expected: expected.to_string(),
        found: found.kind.to_string(),
        line: found.line,
        column: found.column,
        hint: Some("Entries are written `key = value` or `key { ... }`".into()),
        code: Some(202),
    }
}
