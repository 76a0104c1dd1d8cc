//! morph value conversion
//!
//! Values, declared-type tags and checked converters for object projection.
//!
//! # Core Concepts
//!
//! - [`Value`]: Closed set of runtime value kinds (null is `Option::None`)
//! - [`TypeTag`]: Declared-type identity used to match attributes and parameters
//! - [`TypeConverter`]: Converts one value to one target type, failing on loss
//! - [`TypeConverterRegistry`]: Target type to converter factory mapping
//! - [`ConversionError`]: Overflow, precision, invalid and unsupported failures
//!
//! # Example
//!
//! ```rust,ignore
//! use morph_convert::{TypeConverterRegistry, TypeTag, Value};
//!
//! let registry = TypeConverterRegistry::with_defaults();
//! let to_i8 = registry.get(&TypeTag::I8)?;
//!
//! assert_eq!(to_i8.convert_value(&Value::I32(127))?, Value::I8(127));
//! assert!(to_i8.convert_value(&Value::I32(300)).is_err());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod converter;
pub mod converters;
mod error;
mod registry;
mod type_tag;
mod value;

// Re-exports
pub use converter::{converter_fn, share, DynConverter, FnConverter, SharedConverter, TypeConverter};
pub use converters::{
    BigIntConverter, BoolConverter, CharConverter, DecimalConverter, F32Converter, F64Converter,
    I16Converter, I32Converter, I64Converter, I8Converter, IdenticalConverter,
    NotImplementedConverter, StringConverter, UuidConverter, VerbatimConverter,
};
pub use error::{ConversionError, ConversionErrorKind, RegistryError, ValueMismatch};
pub use registry::{ConverterFactory, TypeConverterRegistry};
pub use type_tag::{TypeTag, Typed};
pub use value::{FromValue, ObjectData, ObjectValue, Value};

// Numeric and identifier types carried by `Value`
pub use bigdecimal::BigDecimal;
pub use num_bigint::BigInt;
pub use uuid::Uuid;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
