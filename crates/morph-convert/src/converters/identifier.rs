//! Identifier converter

use crate::converter::TypeConverter;
use crate::error::ConversionError;
use crate::type_tag::TypeTag;
use crate::value::Value;
use uuid::Uuid;

/// Converts to [`Uuid`]
///
/// Accepts identifiers unchanged and parses canonical text; the parser's
/// message becomes the error reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UuidConverter;

impl TypeConverter for UuidConverter {
    type Output = Uuid;

    fn convert(&self, value: &Value) -> Result<Uuid, ConversionError> {
        match value {
            Value::Uuid(id) => Ok(*id),
            Value::String(s) => Uuid::parse_str(s)
                .map_err(|e| ConversionError::invalid(value, &TypeTag::Uuid, e.to_string())),
            other => Err(ConversionError::unsupported(other, &TypeTag::Uuid)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConversionErrorKind;

    #[test]
    fn parses_canonical_text() {
        let text = "079861fc-97f2-4af5-a47b-ece5a433e623";
        let id = UuidConverter.convert(&Value::from(text)).unwrap();
        assert_eq!(id.to_string(), text);
        assert_eq!(UuidConverter.convert(&Value::Uuid(id)), Ok(id));
    }

    #[test]
    fn rejects_other_kinds() {
        assert_eq!(
            UuidConverter.convert(&Value::from("not-a-uuid")).unwrap_err().kind(),
            ConversionErrorKind::InvalidValue
        );
        assert_eq!(
            UuidConverter.convert(&Value::I64(1)).unwrap_err().kind(),
            ConversionErrorKind::Unsupported
        );
    }
}
