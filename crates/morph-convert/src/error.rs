//! Error types for morph-convert
//!
//! Provides error handling for:
//! - Value conversion failures (overflow, precision, malformed input)
//! - Converter registry lookups
//! - Exact typed extraction from a [`Value`]

use crate::type_tag::TypeTag;
use crate::value::Value;

/// Value conversion error
///
/// Every variant carries the runtime type name of the input (`from`) and
/// the name of the requested target type (`to`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Value does not fit the target's representable range
    #[error("numeric overflow converting {from} to {to}")]
    NumericOverflow {
        /// Source type name
        from: String,
        /// Target type name
        to: String,
    },

    /// Value has a fractional component the target cannot hold
    #[error("loss of precision converting {from} to {to}")]
    LossOfPrecision {
        /// Source type name
        from: String,
        /// Target type name
        to: String,
    },

    /// Value is of a handled kind but its content is unacceptable
    #[error("invalid value converting {from} to {to}: {reason}")]
    InvalidValue {
        /// Source type name
        from: String,
        /// Target type name
        to: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The converter does not handle the value's kind
    #[error("unsupported conversion from {from} to {to}: {reason}")]
    Unsupported {
        /// Source type name
        from: String,
        /// Target type name
        to: String,
        /// Why the conversion is unsupported
        reason: String,
    },
}

/// Discriminant of [`ConversionError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionErrorKind {
    /// See [`ConversionError::NumericOverflow`]
    NumericOverflow,
    /// See [`ConversionError::LossOfPrecision`]
    LossOfPrecision,
    /// See [`ConversionError::InvalidValue`]
    InvalidValue,
    /// See [`ConversionError::Unsupported`]
    Unsupported,
}

impl ConversionError {
    /// Create an overflow error
    #[inline]
    #[must_use]
    pub fn overflow(value: &Value, to: &TypeTag) -> Self {
        Self::NumericOverflow {
            from: value.type_name().into_owned(),
            to: to.to_string(),
        }
    }

    /// Create a precision-loss error
    #[inline]
    #[must_use]
    pub fn precision(value: &Value, to: &TypeTag) -> Self {
        Self::LossOfPrecision {
            from: value.type_name().into_owned(),
            to: to.to_string(),
        }
    }

    /// Create an invalid-value error
    #[inline]
    pub fn invalid(value: &Value, to: &TypeTag, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            from: value.type_name().into_owned(),
            to: to.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an unsupported-kind error
    #[inline]
    #[must_use]
    pub fn unsupported(value: &Value, to: &TypeTag) -> Self {
        Self::Unsupported {
            from: value.type_name().into_owned(),
            to: to.to_string(),
            reason: format!("cannot convert a value of type '{}'", value.type_name()),
        }
    }

    /// Create an unsupported-kind error with an explicit reason
    #[inline]
    pub fn unsupported_because(value: &Value, to: &TypeTag, reason: impl Into<String>) -> Self {
        Self::Unsupported {
            from: value.type_name().into_owned(),
            to: to.to_string(),
            reason: reason.into(),
        }
    }

    /// Error discriminant
    #[must_use]
    pub fn kind(&self) -> ConversionErrorKind {
        match self {
            Self::NumericOverflow { .. } => ConversionErrorKind::NumericOverflow,
            Self::LossOfPrecision { .. } => ConversionErrorKind::LossOfPrecision,
            Self::InvalidValue { .. } => ConversionErrorKind::InvalidValue,
            Self::Unsupported { .. } => ConversionErrorKind::Unsupported,
        }
    }

    /// Source type name
    #[must_use]
    pub fn source_type(&self) -> &str {
        match self {
            Self::NumericOverflow { from, .. }
            | Self::LossOfPrecision { from, .. }
            | Self::InvalidValue { from, .. }
            | Self::Unsupported { from, .. } => from,
        }
    }

    /// Target type name
    #[must_use]
    pub fn target_type(&self) -> &str {
        match self {
            Self::NumericOverflow { to, .. }
            | Self::LossOfPrecision { to, .. }
            | Self::InvalidValue { to, .. }
            | Self::Unsupported { to, .. } => to,
        }
    }

    /// Check if the error is a range or precision failure
    #[inline]
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::NumericOverflow { .. } | Self::LossOfPrecision { .. }
        )
    }
}

/// Converter registry errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// No factory registered for the tag
    #[error("no type converter registered for type '{tag}'")]
    NotRegistered {
        /// The requested tag
        tag: TypeTag,
    },
}

/// Exact extraction from a [`Value`] failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected a value of type '{expected}', found '{found}'")]
pub struct ValueMismatch {
    /// Requested type
    pub expected: TypeTag,
    /// Runtime type name of the value found
    pub found: String,
}

impl ValueMismatch {
    /// Create a mismatch for the given value
    #[inline]
    #[must_use]
    pub fn new(expected: TypeTag, found: &Value) -> Self {
        Self {
            expected,
            found: found.type_name().into_owned(),
        }
    }
}
