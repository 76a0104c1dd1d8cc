//! Error types for morph-core
//!
//! Provides error handling for:
//! - Unresolvable bindings (missing required values)
//! - Conversion failures, with the offending parameter attached
//! - Construction failures raised by target constructors
//! - Builder misconfiguration (unnamed or unknown parameters)

use morph_convert::{ConversionError, RegistryError, TypeTag};

/// Main projection error type
///
/// The only error surfaced to callers of a projection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProjectionError {
    /// A required parameter resolved to null
    #[error("cannot project 'null' to the non-optional and non-nullable parameter '{parameter}'")]
    MissingRequiredValue {
        /// Parameter name
        parameter: String,
    },

    /// The parameter's converter rejected its value
    #[error("cannot convert parameter '{parameter}' from {from} to {to}: {source}")]
    ConversionFailed {
        /// Parameter name
        parameter: String,
        /// Runtime type of the value
        from: String,
        /// Declared type of the parameter
        to: String,
        /// Underlying conversion failure
        #[source]
        source: ConversionError,
    },

    /// The target constructor failed
    #[error("failed to construct '{target}': {source}")]
    ConstructionFailed {
        /// Target shape name
        target: String,
        /// Underlying construction failure
        #[source]
        source: ConstructError,
    },

    /// The projection was configured incorrectly
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Discriminant of [`ProjectionError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectionErrorKind {
    /// See [`ProjectionError::MissingRequiredValue`]
    MissingRequiredValue,
    /// See [`ProjectionError::ConversionFailed`]
    ConversionFailed,
    /// See [`ProjectionError::ConstructionFailed`]
    ConstructionFailed,
    /// See [`ProjectionError::Configuration`]
    Configuration,
}

impl ProjectionError {
    /// Error discriminant
    #[must_use]
    pub fn kind(&self) -> ProjectionErrorKind {
        match self {
            Self::MissingRequiredValue { .. } => ProjectionErrorKind::MissingRequiredValue,
            Self::ConversionFailed { .. } => ProjectionErrorKind::ConversionFailed,
            Self::ConstructionFailed { .. } => ProjectionErrorKind::ConstructionFailed,
            Self::Configuration(_) => ProjectionErrorKind::Configuration,
        }
    }

    /// Name of the offending parameter, when one is known
    #[must_use]
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredValue { parameter } | Self::ConversionFailed { parameter, .. } => {
                Some(parameter)
            }
            Self::ConstructionFailed { source, .. } => source.parameter(),
            Self::Configuration(ConfigurationError::UnknownParameter { name, .. }) => Some(name),
            Self::Configuration(_) => None,
        }
    }

    /// Underlying conversion failure, if any
    #[inline]
    #[must_use]
    pub fn conversion(&self) -> Option<&ConversionError> {
        match self {
            Self::ConversionFailed { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Create a missing-value error
    #[inline]
    pub fn missing(parameter: impl Into<String>) -> Self {
        Self::MissingRequiredValue {
            parameter: parameter.into(),
        }
    }
}

impl From<RegistryError> for ProjectionError {
    fn from(err: RegistryError) -> Self {
        Self::Configuration(ConfigurationError::Registry(err))
    }
}

/// Builder configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// A construction parameter has no name
    #[error("cannot map unnamed parameter at position {position} of '{target}'")]
    UnnamedParameter {
        /// Target shape name
        target: String,
        /// Zero-based parameter position
        position: usize,
    },

    /// Override names a parameter the target does not declare
    #[error("unknown construction parameter '{name}' of '{target}'")]
    UnknownParameter {
        /// Target shape name
        target: String,
        /// Requested parameter name
        name: String,
    },

    /// Override reads an attribute the source does not have
    #[error("source '{shape}' has no attribute '{name}'")]
    UnknownSourceAttribute {
        /// Source shape name
        shape: String,
        /// Requested attribute name
        name: String,
    },

    /// Converter lookup failed
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors raised by target constructors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConstructError {
    /// No argument was supplied for a parameter without a default
    #[error("missing argument for parameter '{parameter}'")]
    MissingArgument {
        /// Parameter name
        parameter: String,
    },

    /// Null was supplied for a non-nullable parameter
    #[error("null argument for non-nullable parameter '{parameter}'")]
    NullArgument {
        /// Parameter name
        parameter: String,
    },

    /// The argument holds a different type than the parameter
    #[error("argument '{parameter}' has type '{found}', expected '{expected}'")]
    TypeMismatch {
        /// Parameter name
        parameter: String,
        /// Declared parameter type
        expected: TypeTag,
        /// Runtime type of the argument
        found: String,
    },

    /// The constructor rejected the arguments
    #[error("invalid arguments: {0}")]
    Invalid(String),

    /// A nested projection failed
    #[error(transparent)]
    Projection(Box<ProjectionError>),
}

impl ConstructError {
    /// Create an invalid-arguments error
    #[inline]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid(reason.into())
    }

    /// Name of the offending parameter, when one is known
    #[must_use]
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Self::MissingArgument { parameter }
            | Self::NullArgument { parameter }
            | Self::TypeMismatch { parameter, .. } => Some(parameter),
            Self::Projection(inner) => inner.parameter(),
            Self::Invalid(_) => None,
        }
    }
}

impl From<ProjectionError> for ConstructError {
    fn from(err: ProjectionError) -> Self {
        Self::Projection(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_value_names_parameter() {
        let err = ProjectionError::missing("a");
        assert_eq!(
            err.to_string(),
            "cannot project 'null' to the non-optional and non-nullable parameter 'a'"
        );
        assert_eq!(err.kind(), ProjectionErrorKind::MissingRequiredValue);
        assert_eq!(err.parameter(), Some("a"));
    }

    #[test]
    fn registry_errors_are_configuration_errors() {
        let err = ProjectionError::from(RegistryError::NotRegistered { tag: TypeTag::I8 });
        assert_eq!(err.kind(), ProjectionErrorKind::Configuration);
        assert_eq!(err.parameter(), None);
        assert_eq!(err.to_string(), "no type converter registered for type 'i8'");
    }

    #[test]
    fn construction_errors_expose_parameter() {
        let err = ProjectionError::ConstructionFailed {
            target: "Target".into(),
            source: ConstructError::NullArgument {
                parameter: "posts".into(),
            },
        };
        assert_eq!(err.parameter(), Some("posts"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn nested_projection_errors_convert() {
        let nested: ConstructError = ProjectionError::missing("b").into();
        assert_eq!(nested.parameter(), Some("b"));
        assert_eq!(nested.to_string(), ProjectionError::missing("b").to_string());
    }
}
