// Author: KeiraOMG0
// License: GPL-3.0-or-later

use std::collections::HashMap;

use crate::ast::Number;
use crate::{KerError, Value};

impl TryFrom<Value> for String {
    type Error = KerError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(KerError::type_error(
                format!("Expected string, got {}", other.type_name()),
                Some("Use a quoted string value in your config".into()),
            )),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = KerError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(b),
            Value::String(ref s) if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false") => {
                Err(KerError::type_error(
                    format!("Expected boolean, got string \"{}\"", s),
                    Some("Write true or false without quotes".into()),
                ))
            }
            other => Err(KerError::type_error(
                format!("Expected boolean, got {}", other.type_name()),
                None,
            )),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = KerError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(n) => Ok(n.as_f64()),
            other => Err(expected_number(&other)),
        }
    }
}

impl TryFrom<Value> for f32 {
    type Error = KerError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        f64::try_from(value).map(|f| f as f32)
    }
}

/// Integral targets accept `Int` values in range and `Float` values with no
/// fractional part.
macro_rules! impl_try_from_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TryFrom<Value> for $ty {
                type Error = KerError;

                fn try_from(value: Value) -> Result<Self, Self::Error> {
                    let n = match value {
                        Value::Number(n) => n,
                        other => return Err(expected_number(&other)),
                    };

                    // `MAX as f64` rounds up for 64-bit targets, so the upper
                    // bound is the exclusive power of two.
                    let signed = <$ty>::MIN != 0;
                    let upper = 2f64.powi((<$ty>::BITS - u32::from(signed)) as i32);
                    let converted = match n {
                        Number::Int(i) => <$ty>::try_from(i).ok(),
                        Number::Float(f) if f.fract() == 0.0
                            && f >= <$ty>::MIN as f64
                            && f < upper => Some(f as $ty),
                        Number::Float(_) => None,
                    };

                    converted.ok_or_else(|| KerError::type_error(
                        format!("Number {} is not a valid {}", n, stringify!($ty)),
                        Some(format!(
                            "Use a whole number between {} and {}",
                            <$ty>::MIN,
                            <$ty>::MAX
                        )),
                    ))
                }
            }
        )*
    };
}

impl_try_from_integer!(i32, i64, u8, u16, u32, u64, usize);

impl<T> TryFrom<Value> for Vec<T>
where
    T: TryFrom<Value, Error = KerError>,
{
    type Error = KerError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(arr) => arr.into_iter().map(T::try_from).collect(),
            other => Err(KerError::type_error(
                format!("Expected array, got {}", other.type_name()),
                Some("Use an array [...] in your config".into()),
            )),
        }
    }
}

impl TryFrom<Value> for HashMap<String, Value> {
    type Error = KerError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Block(block) => Ok(block.into_iter().collect()),
            other => Err(expected_block(&other)),
        }
    }
}

impl TryFrom<Value> for HashMap<String, String> {
    type Error = KerError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Block(block) => block
                .into_iter()
                .map(|(k, v)| Ok::<_, KerError>((k, String::try_from(v)?)))
                .collect(),
            other => Err(expected_block(&other)),
        }
    }
}

fn expected_number(value: &Value) -> KerError {
    KerError::type_error(
        format!("Expected number, got {}", value.type_name()),
        Some("Use a number value in your config".into()),
    )
}

fn expected_block(value: &Value) -> KerError {
    KerError::type_error(
        format!("Expected block, got {}", value.type_name()),
        Some("Use a block { ... } in your config".into()),
    )
}
