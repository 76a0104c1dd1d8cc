//! Per-parameter binding contexts
//!
//! Every construction parameter of a target gets exactly one
//! [`BindingContext`]. Seeding fills it conventionally; overrides replace
//! its value and/or converter; compilation resolves it.

use crate::error::ProjectionError;
use morph_convert::{SharedConverter, TypeTag, Value};

/// How a binding got its current value and converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingOrigin {
    /// Seeded from a same-named source attribute
    Conventional,
    /// Replaced by an explicit override
    Unconventional,
}

/// Outcome of resolving a binding
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Pass this argument (`None` is an explicit null)
    Bound(String, Option<Value>),
    /// Omit the argument so the target's default applies
    Omitted,
}

/// Value replacement carried by an override
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ValueUpdate {
    /// Keep the current value
    #[default]
    Unchanged,
    /// Replace the value (`None` sets null)
    SetTo(Option<Value>),
}

/// Binding state of one construction parameter
#[derive(Debug, Clone)]
pub struct BindingContext {
    parameter_name: String,
    declared: TypeTag,
    is_nullable: bool,
    is_optional: bool,
    value: Option<Value>,
    converter: SharedConverter,
    origin: BindingOrigin,
    value_overridden: bool,
}

impl BindingContext {
    /// Create a conventional, required binding with no value
    pub fn new(parameter_name: impl Into<String>, declared: TypeTag, converter: SharedConverter) -> Self {
        Self {
            parameter_name: parameter_name.into(),
            declared,
            is_nullable: false,
            is_optional: false,
            value: None,
            converter,
            origin: BindingOrigin::Conventional,
            value_overridden: false,
        }
    }

    /// With nullability
    #[inline]
    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.is_nullable = nullable;
        self
    }

    /// With optionality
    #[inline]
    #[must_use]
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.is_optional = optional;
        self
    }

    /// With a value
    #[inline]
    #[must_use]
    pub fn with_value(mut self, value: Option<Value>) -> Self {
        self.value = value;
        self
    }

    /// Parameter name
    #[inline]
    #[must_use]
    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    /// Declared parameter type
    #[inline]
    #[must_use]
    pub fn declared(&self) -> &TypeTag {
        &self.declared
    }

    /// Whether the parameter accepts null
    #[inline]
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.is_nullable
    }

    /// Whether the parameter has a default
    #[inline]
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.is_optional
    }

    /// Current value (`None` is null)
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Converter applied on resolution
    #[inline]
    #[must_use]
    pub fn converter(&self) -> &SharedConverter {
        &self.converter
    }

    /// How the binding got its current state
    #[inline]
    #[must_use]
    pub fn origin(&self) -> BindingOrigin {
        self.origin
    }

    /// Whether an override replaced the seeded value
    #[inline]
    #[must_use]
    pub fn is_value_overridden(&self) -> bool {
        self.value_overridden
    }

    /// Apply an override; `None` keeps the current converter
    pub fn apply(&mut self, update: ValueUpdate, converter: Option<SharedConverter>) {
        if let ValueUpdate::SetTo(value) = update {
            self.value = value;
            self.value_overridden = true;
        }
        if let Some(converter) = converter {
            self.converter = converter;
        }
        self.origin = BindingOrigin::Unconventional;
    }

    /// Resolve to the argument passed to the constructor
    ///
    /// A present value is always converted. A null set by an override is
    /// passed as null when the parameter is nullable. Any other null is
    /// omitted when the parameter is optional, passed as null when it is
    /// nullable, and an error otherwise. Optionality is checked before
    /// nullability.
    ///
    /// # Errors
    /// - [`ProjectionError::ConversionFailed`] if the converter rejects the value
    /// - [`ProjectionError::MissingRequiredValue`] if a required parameter is null
    pub fn resolve(&self) -> Result<Resolution, ProjectionError> {
        match &self.value {
            Some(value) => {
                let converted = self.converter.convert_value(value).map_err(|source| {
                    ProjectionError::ConversionFailed {
                        parameter: self.parameter_name.clone(),
                        from: value.type_name().into_owned(),
                        to: self.declared.to_string(),
                        source,
                    }
                })?;
                Ok(Resolution::Bound(self.parameter_name.clone(), Some(converted)))
            }
            None if self.value_overridden && self.is_nullable => {
                Ok(Resolution::Bound(self.parameter_name.clone(), None))
            }
            None if self.is_optional => Ok(Resolution::Omitted),
            None if self.is_nullable => Ok(Resolution::Bound(self.parameter_name.clone(), None)),
            None => Err(ProjectionError::missing(self.parameter_name.clone())),
        }
    }
}
