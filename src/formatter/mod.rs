// Author: KeiraOMG0
// License: GPL-3.0-or-later

//! Canonical `.ker` output.
//!
//! The formatter looks only at the AST, so comments and the original
//! spelling of literals are gone after a parse/format round trip. For a given
//! AST and options the output is always byte-identical.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{Block, Document, Value};

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// Words the lexer turns into literals, in any letter case; keys spelled
/// like these must be quoted. `None` is reserved only in that exact spelling.
const RESERVED: [&str; 3] = ["true", "false", "null"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Arrays of at most this many scalars are written on one line.
    pub inline_array_limit: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            inline_array_limit: 5,
        }
    }
}

impl FormatOptions {
    pub fn with_indent(indent: usize) -> Self {
        Self {
            indent,
            ..Self::default()
        }
    }
}

/// Format a document with the default options.
pub fn format_document(doc: &Document) -> String {
    format_document_with(doc, &FormatOptions::default())
}

pub fn format_document_with(doc: &Document, options: &FormatOptions) -> String {
    let mut writer = Writer::new(options);
    for (key, value) in &doc.entries {
        writer.write_entry(key, value, 0);
    }
    writer.out
}

/// Format a standalone value, e.g. `[1, 2]` or a braced block. No trailing newline.
pub fn format_value(value: &Value, options: &FormatOptions) -> String {
    let mut writer = Writer::new(options);
    match value {
        Value::Block(block) => writer.write_block(None, block, 0, ""),
        Value::Array(items) => writer.write_array(None, items, 0, ""),
        scalar => writer.line(0, &format_scalar(scalar)),
    }
    writer.out.pop();
    writer.out
}

/// Bare identifier when it lexes back as the same key, otherwise a quoted string.
pub fn format_key(key: &str) -> String {
    if IDENTIFIER.is_match(key) && !is_reserved(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

fn is_reserved(key: &str) -> bool {
    key == "None" || RESERVED.iter().any(|word| key.eq_ignore_ascii_case(word))
}

fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => quote(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        // Containers are laid out by `Writer`.
        Value::Array(_) | Value::Block(_) => String::new(),
    }
}

/// JSON string syntax, which the lexer reads back unchanged.
fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

struct Writer<'o> {
    out: String,
    options: &'o FormatOptions,
}

impl<'o> Writer<'o> {
    fn new(options: &'o FormatOptions) -> Self {
        Self {
            out: String::new(),
            options,
        }
    }

    fn line(&mut self, level: usize, text: &str) {
        self.out
            .extend(std::iter::repeat_n(' ', level * self.options.indent));
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn write_entry(&mut self, key: &str, value: &Value, level: usize) {
        match value {
            Value::Block(block) => self.write_block(Some(key), block, level, ""),
            Value::Array(items) => self.write_array(Some(key), items, level, ""),
            scalar => {
                let text = format!("{} = {}", format_key(key), format_scalar(scalar));
                self.line(level, &text);
            }
        }
    }

    fn write_element(&mut self, value: &Value, level: usize) {
        match value {
            Value::Block(block) => self.write_block(None, block, level, ","),
            Value::Array(items) => self.write_array(None, items, level, ","),
            scalar => {
                let text = format!("{},", format_scalar(scalar));
                self.line(level, &text);
            }
        }
    }

    /// `key { ... }` for entries, bare `{ ... }` for array elements.
    fn write_block(&mut self, key: Option<&str>, block: &Block, level: usize, suffix: &str) {
        let opener = match key {
            Some(k) => format!("{} {{", format_key(k)),
            None => "{".to_string(),
        };

        if block.is_empty() {
            self.line(level, &format!("{}}}{}", opener, suffix));
            return;
        }

        self.line(level, &opener);
        for (k, v) in block {
            self.write_entry(k, v, level + 1);
        }
        self.line(level, &format!("}}{}", suffix));
    }

    fn write_array(&mut self, key: Option<&str>, items: &[Value], level: usize, suffix: &str) {
        let prefix = key.map(|k| format!("{} = ", format_key(k))).unwrap_or_default();

        if self.is_inline(items) {
            let parts: Vec<String> = items.iter().map(format_scalar).collect();
            let text = format!("{}[{}]{}", prefix, parts.join(", "), suffix);
            self.line(level, &text);
            return;
        }

        self.line(level, &format!("{}[", prefix));
        for item in items {
            self.write_element(item, level + 1);
        }
        self.line(level, &format!("]{}", suffix));
    }

    fn is_inline(&self, items: &[Value]) -> bool {
        items.len() <= self.options.inline_array_limit && items.iter().all(Value::is_scalar)
    }
}
