//! Pass-through and placeholder converters used by binding contexts

use crate::converter::TypeConverter;
use crate::error::ConversionError;
use crate::type_tag::TypeTag;
use crate::value::Value;

/// Passes values through when source and target declare the same type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdenticalConverter;

impl TypeConverter for IdenticalConverter {
    type Output = Value;

    #[inline]
    fn convert(&self, value: &Value) -> Result<Value, ConversionError> {
        Ok(value.clone())
    }
}

/// Passes caller-supplied values through unchanged
///
/// Installed by explicit value and attribute overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerbatimConverter;

impl TypeConverter for VerbatimConverter {
    type Output = Value;

    #[inline]
    fn convert(&self, value: &Value) -> Result<Value, ConversionError> {
        Ok(value.clone())
    }
}

/// Stands in for a converter the registry does not provide
///
/// Only fails when invoked, so a parameter that ends up null, omitted or
/// overridden never trips it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotImplementedConverter {
    target: TypeTag,
}

impl NotImplementedConverter {
    /// Placeholder for the given target type
    #[inline]
    #[must_use]
    pub fn new(target: TypeTag) -> Self {
        Self { target }
    }

    /// Target type with no converter
    #[inline]
    #[must_use]
    pub fn target(&self) -> &TypeTag {
        &self.target
    }
}

impl TypeConverter for NotImplementedConverter {
    type Output = Value;

    fn convert(&self, value: &Value) -> Result<Value, ConversionError> {
        Err(ConversionError::unsupported_because(
            value,
            &self.target,
            "type converter not implemented",
        ))
    }
}
