use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::KerError;
use crate::ast::{Block, Document, Number, Value};

const DUPLICATE_KEY: &str = "duplicate key ";

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Number(Number::Int(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Null => serializer.serialize_unit(),
            Value::Array(items) => items.serialize(serializer),
            Value::Block(block) => block.serialize(serializer),
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E>(self, i: i64) -> Result<Value, E> {
        Ok(Value::Number(Number::Int(i)))
    }

    fn visit_u64<E>(self, u: u64) -> Result<Value, E> {
        Ok(Value::Number(match i64::try_from(u) {
            Ok(i) => Number::Int(i),
            Err(_) => Number::Float(u as f64),
        }))
    }

    fn visit_f64<E>(self, f: f64) -> Result<Value, E> {
        Ok(Value::Number(Number::Float(f)))
    }

    fn visit_str<E>(self, s: &str) -> Result<Value, E> {
        Ok(Value::String(s.to_owned()))
    }

    fn visit_string<E>(self, s: String) -> Result<Value, E> {
        Ok(Value::String(s))
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut block = Block::new();
        while let Some(key) = map.next_key::<String>()? {
            if block.contains_key(&key) {
                // The key is JSON-quoted so it can be read back unambiguously.
                let quoted = serde_json::Value::String(key).to_string();
                return Err(de::Error::custom(format!("{}{}", DUPLICATE_KEY, quoted)));
            }
            let value = map.next_value()?;
            block.insert(key, value);
        }
        Ok(Value::Block(block))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Document, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Block(entries) => Ok(Document::new(entries)),
            other => Err(de::Error::custom(format!(
                "top-level JSON value must be an object, found {}",
                other.type_name()
            ))),
        }
    }
}

/// Map a `serde_json` failure onto the KER error taxonomy.
pub(super) fn into_ker_error(err: serde_json::Error) -> KerError {
    let (line, column) = (err.line(), err.column());
    let text = err.to_string();
    let message = match text.rsplit_once(" at line ") {
        Some((message, _)) if line > 0 => message.to_string(),
        _ => text,
    };

    if let Some(quoted) = message.strip_prefix(DUPLICATE_KEY) {
        let key = serde_json::Deserializer::from_str(quoted)
            .into_iter::<String>()
            .next()
            .and_then(Result::ok);
        if let Some(key) = key {
            return KerError::DuplicateKey {
                key,
                line,
                column,
                hint: Some("Each key may appear only once per object".into()),
                code: Some(203),
            };
        }
    }

    KerError::ConversionError {
        message,
        line,
        column,
        hint: Some("Check that the input is well-formed JSON".into()),
        code: Some(401),
    }
}
