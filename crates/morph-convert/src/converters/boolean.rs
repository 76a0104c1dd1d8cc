//! Boolean converter

use crate::converter::TypeConverter;
use crate::error::ConversionError;
use crate::type_tag::TypeTag;
use crate::value::Value;
use num_traits::{One, Zero};

/// Converts to `bool`
///
/// Numeric sources must be exactly one or zero. Text accepts
/// `true/yes/y/1` and `false/no/n/0`, ignoring case; characters accept
/// `y/1` and `n/0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolConverter;

impl TypeConverter for BoolConverter {
    type Output = bool;

    fn convert(&self, value: &Value) -> Result<bool, ConversionError> {
        let flag = match value {
            Value::Bool(b) => Some(*b),
            Value::I8(v) => unit(*v == 1, *v == 0),
            Value::I16(v) => unit(*v == 1, *v == 0),
            Value::I32(v) => unit(*v == 1, *v == 0),
            Value::I64(v) => unit(*v == 1, *v == 0),
            Value::BigInt(v) => unit(v.is_one(), v.is_zero()),
            Value::F32(v) => unit(*v == 1.0, *v == 0.0),
            Value::F64(v) => unit(*v == 1.0, *v == 0.0),
            Value::Decimal(v) => unit(v.is_one(), v.is_zero()),
            Value::String(s) => match s.to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "1" => Some(true),
                "false" | "no" | "n" | "0" => Some(false),
                _ => None,
            },
            Value::Char(c) => match c.to_ascii_lowercase() {
                'y' | '1' => Some(true),
                'n' | '0' => Some(false),
                _ => None,
            },
            Value::Uuid(_) | Value::List(_) | Value::Object(_) => {
                return Err(ConversionError::unsupported(value, &TypeTag::Bool));
            }
        };

        flag.ok_or_else(|| {
            ConversionError::invalid(value, &TypeTag::Bool, format!("'{value}' is not a boolean"))
        })
    }
}

fn unit(one: bool, zero: bool) -> Option<bool> {
    if one {
        Some(true)
    } else if zero {
        Some(false)
    } else {
        None
    }
}
