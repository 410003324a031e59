// Author: KeiraOMG0
// License: GPL-3.0-or-later

use std::fmt;

use indexmap::IndexMap;

/// Ordered key/value mapping. Keys are unique and keep insertion order.
pub type Block = IndexMap<String, Value>;

/// A numeric literal. Integers and fractional numbers are kept apart so that
/// `8080` never turns into `8080.0` on the way through JSON and back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Number::Int(i) => Some(i),
            Number::Float(_) => None,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Int(_))
    }
}

/// Canonical rendering: integers in plain decimal, floats through the
/// shortest round-trip form, with `.0` appended when there is no fraction.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(x) => {
                if x.is_finite() && x.fract() == 0.0 {
                    write!(f, "{:.1}", x)
                } else {
                    write!(f, "{}", x)
                }
            }
        }
    }
}

impl From<i64> for Number {
    fn from(i: i64) -> Self {
        Number::Int(i)
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number::Float(f)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Number(Number),
    Bool(bool),
    Null,
    Array(Vec<Value>),
    Block(Block),
}

impl Value {
    pub fn as_block(&self) -> Option<&Block> {
        if let Value::Block(items) = self {
            Some(items)
        } else {
            None
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        if let Value::Array(items) = self {
            Some(items)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    /// True for the four scalar variants.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Array(_) | Value::Block(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Null => "null",
            Value::Array(_) => "array",
            Value::Block(_) => "block",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(Number::Int(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(Number::Float(f))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Block> for Value {
    fn from(block: Block) -> Self {
        Value::Block(block)
    }
}

/// The result of parsing a whole `.ker` source: the unnamed root block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub entries: Block,
}

impl Document {
    pub fn new(entries: Block) -> Self {
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// View the document as a `Value::Block`.
    pub fn to_value(&self) -> Value {
        Value::Block(self.entries.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Block(self.entries)
    }
}

impl From<Block> for Document {
    fn from(entries: Block) -> Self {
        Document { entries }
    }
}
