// Author: KeiraOMG0
// License: GPL-3.0-or-later

//! Structural mapping between KER values and JSON.
//!
//! - Blocks ↔ objects (key order preserved via `serde_json`'s `preserve_order`)
//! - Arrays ↔ arrays
//! - Strings, booleans and null map 1:1
//! - `Number::Int` ↔ integral JSON numbers that fit in `i64`, everything
//!   else ↔ `Number::Float`
//!
//! Non-finite floats have no JSON spelling and export as `null`.

use serde_json::json;

use crate::KerError;
use crate::ast::{Block, Document, Number, Value};
use crate::parser::MAX_NESTING_DEPTH;

mod pretty;
mod serde_impl;

pub use pretty::to_json_string;

/// Convert a single KER value to JSON.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::String(s) => json!(s),
        Value::Number(Number::Int(i)) => json!(i),
        Value::Number(Number::Float(f)) => json!(f),
        Value::Bool(b) => json!(b),
        Value::Null => serde_json::Value::Null,
        Value::Array(arr) => serde_json::Value::Array(arr.iter().map(value_to_json).collect()),
        Value::Block(block) => serde_json::Value::Object(
            block
                .iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect(),
        ),
    }
}

/// Convert a whole document to a JSON object.
pub fn to_json_value(doc: &Document) -> serde_json::Value {
    serde_json::Value::Object(
        doc.entries
            .iter()
            .map(|(k, v)| (k.clone(), value_to_json(v)))
            .collect(),
    )
}

/// Convert a JSON value into a KER value.
///
/// Fails only when the JSON nests deeper than the parser would accept.
pub fn value_from_json(json: &serde_json::Value) -> Result<Value, KerError> {
    value_from_json_at(json, 0)
}

fn value_from_json_at(json: &serde_json::Value, depth: usize) -> Result<Value, KerError> {
    Ok(match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => Value::Number(number_from_json(n)),
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(arr) => {
            let depth = descend(depth)?;
            let mut items = Vec::with_capacity(arr.len());
            for item in arr {
                items.push(value_from_json_at(item, depth)?);
            }
            Value::Array(items)
        }
        serde_json::Value::Object(map) => {
            let depth = descend(depth)?;
            let mut block = Block::with_capacity(map.len());
            for (k, v) in map {
                block.insert(k.clone(), value_from_json_at(v, depth)?);
            }
            Value::Block(block)
        }
    })
}

fn descend(depth: usize) -> Result<usize, KerError> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(KerError::NestingTooDeep {
            limit: MAX_NESTING_DEPTH,
            line: 0,
            column: 0,
            hint: Some("JSON input nests too deeply to be represented".into()),
            code: Some(204),
        });
    }
    Ok(depth + 1)
}

/// Convert a JSON object into a document. Any other top-level JSON value is
/// a `ConversionError`.
pub fn from_json_value(json: &serde_json::Value) -> Result<Document, KerError> {
    let serde_json::Value::Object(map) = json else {
        return Err(KerError::ConversionError {
            message: format!(
                "top-level JSON value must be an object, found {}",
                json_type_name(json)
            ),
            line: 0,
            column: 0,
            hint: Some("Wrap the value in an object, e.g. {\"value\": ...}".into()),
            code: Some(401),
        });
    };

    let mut entries = Block::with_capacity(map.len());
    for (k, v) in map {
        entries.insert(k.clone(), value_from_json_at(v, 0)?);
    }
    Ok(Document::new(entries))
}

/// Parse JSON text straight into a document.
///
/// Unlike going through `serde_json::Value`, repeated object keys are seen
/// here and rejected with `DuplicateKey`, the same as in `.ker` source.
pub fn from_json_str(text: &str) -> Result<Document, KerError> {
    serde_json::from_str::<Document>(text).map_err(serde_impl::into_ker_error)
}

fn number_from_json(n: &serde_json::Number) -> Number {
    match n.as_i64() {
        Some(i) => Number::Int(i),
        None => Number::Float(n.as_f64().unwrap_or(f64::NAN)),
    }
}

fn json_type_name(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
