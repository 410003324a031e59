// Author: KeiraOMG0
// License: GPL-3.0-or-later

use std::fmt;
use std::str::Chars;

use crate::KerError;
use crate::ast::Number;

mod scanner;
mod tokenizer;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // --- literals ---
    Ident(String),
    String(String),
    Number(Number),
    Bool(bool),
    Null,

    // --- structure ---
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Equals,
    Colon,
    Comma,

    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(name) => write!(f, "identifier '{}'", name),
            TokenKind::String(s) => write!(f, "string {:?}", s),
            TokenKind::Number(n) => write!(f, "number {}", n),
            TokenKind::Bool(b) => write!(f, "boolean {}", b),
            TokenKind::Null => f.write_str("null"),
            TokenKind::LBrace => f.write_str("'{'"),
            TokenKind::RBrace => f.write_str("'}'"),
            TokenKind::LBracket => f.write_str("'['"),
            TokenKind::RBracket => f.write_str("']'"),
            TokenKind::Equals => f.write_str("'='"),
            TokenKind::Colon => f.write_str("':'"),
            TokenKind::Comma => f.write_str("','"),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}

/// A classified lexical unit with the 1-based position of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize, column: usize) -> Self {
        Self { kind, line, column }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

pub struct Lexer<'a> {
    input: Chars<'a>,
    peek: Option<char>,
    line: usize,
    column: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer {
            input: input.chars(),
            peek: None,
            line: 1,
            column: 1,
            finished: false,
        };
        lexer.peek = lexer.input.next();
        lexer
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Produce the next token. Once the input is exhausted this keeps
    /// returning `Eof` at the end position.
    pub fn next_token(&mut self) -> Result<Token, KerError> {
        let token = tokenizer::next_token(self)?;
        if token.is_eof() {
            self.finished = true;
        }
        Ok(token)
    }

    /// Lex the remaining input into a vector ending in exactly one `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, KerError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is_eof();
            tokens.push(token);
            if done {
                break;
            }
        }
        tracing::trace!(count = tokens.len(), "tokenized input");
        Ok(tokens)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, KerError>;

    /// Yields every token including the final `Eof`, then stops. Stops after
    /// the first error as well.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        if result.is_err() {
            self.finished = true;
        }
        Some(result)
    }
}

/// Convert `.ker` source text into an ordered token sequence.
pub fn tokenize(source: &str) -> Result<Vec<Token>, KerError> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests;
