// Author: KeiraOMG0
// License: GPL-3.0-or-later

use thiserror::Error;

/// The main error type for KER lexing, parsing and conversion.
///
/// Every variant that originates in source text carries a 1-based `line` and
/// `column`. `hint` is a short human suggestion and `code` a stable numeric id
/// (1xx lexer, 2xx parser, 3xx files and lookups, 4xx conversion).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KerError {
    /// Raised for characters outside the grammar's alphabet.
    #[error("[KER] Unexpected character '{character}' at {line}:{column}{}", suffix(.hint, .code))]
    UnexpectedCharacter {
        character: char,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a string literal is not closed before end of input.
    #[error("[KER] Unterminated string starting at {line}:{column}{}", suffix(.hint, .code))]
    UnterminatedString {
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[KER] Invalid number '{literal}' at {line}:{column}{}", suffix(.hint, .code))]
    InvalidNumber {
        literal: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[KER] Invalid escape sequence '{sequence}' at {line}:{column}{}", suffix(.hint, .code))]
    InvalidEscape {
        sequence: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[KER] Unexpected token {found} at {line}:{column}, expected {expected}{}", suffix(.hint, .code))]
    UnexpectedToken {
        expected: String,
        found: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[KER] Expected '{expected}' at {line}:{column}, found {found}{}", suffix(.hint, .code))]
    ExpectedToken {
        expected: String,
        found: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a key appears twice in the same block.
    #[error("[KER] Duplicate key '{key}' at {line}:{column}{}", suffix(.hint, .code))]
    DuplicateKey {
        key: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[KER] Nesting deeper than {limit} levels at {line}:{column}{}", suffix(.hint, .code))]
    NestingTooDeep {
        limit: usize,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[KER] File Error '{path}': {message}{}", suffix(.hint, .code))]
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[KER] Path '{path}' not found{}", suffix(.hint, .code))]
    PathNotFound {
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a JSON document cannot be mapped onto the KER value set.
    #[error("[KER] Conversion Error at {line}:{column}: {message}{}", suffix(.hint, .code))]
    ConversionError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[KER] Type Error: {message}{}", suffix(.hint, .code))]
    TypeError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

fn suffix(hint: &Option<String>, code: &Option<u32>) -> String {
    let mut out = String::new();
    if let Some(h) = hint {
        out.push_str(" Hint: ");
        out.push_str(h);
    }
    if let Some(c) = code {
        out.push_str(&format!(" Code: {}", c));
    }
    out
}

impl KerError {
    /// Source position of the error, when it came from KER or JSON text.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            KerError::UnexpectedCharacter { line, column, .. }
            | KerError::UnterminatedString { line, column, .. }
            | KerError::InvalidNumber { line, column, .. }
            | KerError::InvalidEscape { line, column, .. }
            | KerError::UnexpectedToken { line, column, .. }
            | KerError::ExpectedToken { line, column, .. }
            | KerError::DuplicateKey { line, column, .. }
            | KerError::NestingTooDeep { line, column, .. }
            | KerError::ConversionError { line, column, .. } => {
                if *line == 0 { None } else { Some((*line, *column)) }
            }
            KerError::FileError { .. } | KerError::PathNotFound { .. } | KerError::TypeError { .. } => None,
        }
    }

    pub fn code(&self) -> Option<u32> {
        match self {
            KerError::UnexpectedCharacter { code, .. }
            | KerError::UnterminatedString { code, .. }
            | KerError::InvalidNumber { code, .. }
            | KerError::InvalidEscape { code, .. }
            | KerError::UnexpectedToken { code, .. }
            | KerError::ExpectedToken { code, .. }
            | KerError::DuplicateKey { code, .. }
            | KerError::NestingTooDeep { code, .. }
            | KerError::FileError { code, .. }
            | KerError::PathNotFound { code, .. }
            | KerError::ConversionError { code, .. }
            | KerError::TypeError { code, .. } => *code,
        }
    }

    /// Helper for file-related errors when loading or writing documents.
    pub fn file_error(message: String, path: String) -> Self {
        KerError::FileError {
            message,
            path,
            hint: Some("Check file path and permissions".into()),
            code: Some(301),
        }
    }

    pub(crate) fn type_error(message: String, hint: Option<String>) -> Self {
        KerError::TypeError { message, hint, code: Some(402) }
    }
}
