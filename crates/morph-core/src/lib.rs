//! morph core - object projection
//!
//! Converts an instance of a source shape into a new instance of a target
//! shape:
//! - Target parameters are matched to same-named source attributes
//! - Values are type-converted where declared types differ
//! - Callers override any parameter with a literal, a computed value, another
//!   source attribute, or a custom converter
//! - Null handling follows the parameter's optional and nullable flags
//!
//! # Core Concepts
//!
//! - [`Projectable`]: Source shapes expose their attributes by name
//! - [`Constructible`] / [`TargetDescriptor`]: Target parameters and constructor
//! - [`BindingContext`]: Per-parameter value, converter and null rules
//! - [`ProjectionBuilder`]: Conventional seeding, overrides, compilation
//! - [`Projection`] / [`Projector`]: End-to-end projection
//! - [`Record`] / [`RecordShape`]: Dynamic shapes
//!
//! # Example
//!
//! ```rust,ignore
//! use morph_core::prelude::*;
//!
//! let target: Target = project_with(&source, |builder| {
//!     builder
//!         .bind_with(Target::FULL_NAME, |s: &Source| format!("{} {}", s.first_name, s.last_name))?
//!         .bind_with(Target::DESCRIPTION, |s: &Source| {
//!             s.description.clone().unwrap_or_else(|| "No description".into())
//!         })?;
//!     Ok(())
//! })?;
//! ```

#![warn(unreachable_pub)]

pub mod arguments;
pub mod binding;
pub mod builder;
pub mod config;
pub mod error;
pub mod projector;
pub mod record;
pub mod shape;

// Re-exports for convenience
pub use arguments::Arguments;
pub use binding::{BindingContext, BindingOrigin, Resolution, ValueUpdate};
pub use builder::ProjectionBuilder;
pub use config::{ProjectionConfig, RegistryPreset};
pub use error::{ConfigurationError, ConstructError, ProjectionError, ProjectionErrorKind};
pub use projector::{project, project_with, Projection, Projector};
pub use record::{Record, RecordShape};
pub use shape::{
    Attribute, Constructible, Constructor, Parameter, ParameterKey, Projectable, Property,
    TargetDescriptor, TypedKey,
};

pub use morph_convert;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for defining shapes and running projections
    pub use crate::{
        project, project_with, Arguments, Attribute, ConstructError, Constructible, Parameter,
        Projectable, Projection, ProjectionBuilder, ProjectionError, Projector, Property,
        TargetDescriptor,
    };
    pub use morph_convert::{
        converter_fn, ConversionError, TypeConverter, TypeConverterRegistry, TypeTag, Typed,
        Value,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
