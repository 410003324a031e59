// Author: KeiraOMG0
// License: GPL-3.0-or-later

use crate::KerError;
use crate::ast::{Document, Value};
use crate::lexer::{Token, TokenKind, tokenize};

mod document;
mod value;

/// Default limit on blocks and arrays nested below the root.
///
/// Counting the root object, this stays under serde_json's recursion limit
/// (at most 127 open brackets), so every parsed document can be read back
/// from its own JSON.
pub const MAX_NESTING_DEPTH: usize = 126;

/// Recursive-descent parser over a fully lexed token stream.
///
/// The stream always ends in exactly one `Eof` token, and the cursor never
/// moves past it, so lookahead never has to deal with running out of input.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl Parser {
    pub fn new(input: &str) -> Result<Self, KerError> {
        Ok(Self::from_tokens(tokenize(input)?))
    }

    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        let needs_eof = tokens.last().is_none_or(|t| !t.is_eof());
        if needs_eof {
            let (line, column) = tokens.last().map_or((1, 1), |t| (t.line, t.column));
            tokens.push(Token::new(TokenKind::Eof, line, column));
        }
        Self {
            tokens,
            pos: 0,
            depth: 0,
            max_depth: MAX_NESTING_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub(crate) fn bump(&mut self) -> Token {
        let curr = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        curr
    }

    /// Track one level of block/array nesting opened by `open`.
    pub(crate) fn enter(&mut self, open: &Token) -> Result<(), KerError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(KerError::NestingTooDeep {
                limit: self.max_depth,
                line: open.line,
                column: open.column,
                hint: Some("Flatten the structure or split it into several keys".into()),
                code: Some(204),
            });
        }
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn parse_document(&mut self) -> Result<Document, KerError> {
        document::parse_document(self)
    }

    /// Parse a single value, e.g. the right-hand side of an entry.
    pub fn parse_value(&mut self) -> Result<Value, KerError> {
        let value = value::parse_value(self)?;
        if !self.peek().is_eof() {
            return Err(unexpected_token(self.peek(), "end of input", None));
        }
        Ok(value)
    }
}

pub(crate) fn unexpected_token(token: &Token, expected: &str, hint: Option<String>) -> KerError {
    KerError::UnexpectedToken {
        expected: expected.to_string(),
        found: token.kind.to_string(),
        line: token.line,
        column: token.column,
        hint,
        code: Some(201),
    }
}

/// Parse `.ker` source text into a [`Document`].
pub fn parse_document(source: &str) -> Result<Document, KerError> {
    Parser::new(source)?.parse_document()
}

/// Parse a standalone `.ker` value such as `[1, 2]` or `{ a = 1 }`.
pub fn parse_value(source: &str) -> Result<Value, KerError> {
    Parser::new(source)?.parse_value()
}
