//! Character and string converters

use super::numeric;
use crate::converter::TypeConverter;
use crate::error::ConversionError;
use crate::type_tag::TypeTag;
use crate::value::Value;
use num_traits::ToPrimitive;

/// Converts to `char`
///
/// Numbers are read as Unicode scalar values; text must hold exactly one
/// character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharConverter;

impl TypeConverter for CharConverter {
    type Output = char;

    fn convert(&self, value: &Value) -> Result<char, ConversionError> {
        let target = TypeTag::Char;
        match value {
            Value::Char(c) => Ok(*c),
            Value::Bool(b) => Ok(if *b { '1' } else { '0' }),
            Value::String(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(ConversionError::invalid(
                        value,
                        &target,
                        format!("'{s}' is not a single character"),
                    )),
                }
            }
            Value::Uuid(_) | Value::List(_) | Value::Object(_) => {
                Err(ConversionError::unsupported(value, &target))
            }
            _ => {
                let code = numeric::integral(value, &target)?
                    .to_u32()
                    .ok_or_else(|| ConversionError::overflow(value, &target))?;
                if code > u32::from(char::MAX) {
                    return Err(ConversionError::overflow(value, &target));
                }
                char::from_u32(code).ok_or_else(|| {
                    ConversionError::invalid(value, &target, format!("{code:#x} is a surrogate"))
                })
            }
        }
    }
}

/// Converts to `String`
///
/// Every value converts through its default textual representation,
/// except booleans, which render as `True`/`False` at any list depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringConverter;

impl TypeConverter for StringConverter {
    type Output = String;

    fn convert(&self, value: &Value) -> Result<String, ConversionError> {
        let mut text = String::new();
        write_text(value, &mut text);
        Ok(text)
    }
}

fn write_text(value: &Value, out: &mut String) {
    match value {
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::String(s) => out.push_str(s),
        Value::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_text(item, out);
            }
            out.push(']');
        }
        other => out.push_str(&other.to_string()),
    }
}
