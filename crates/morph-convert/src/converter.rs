//! Type converter abstraction
//!
//! A [`TypeConverter`] turns a single [`Value`] into one target type. Typed
//! converters are erased to [`SharedConverter`] where the registry and the
//! binding contexts need a uniform shape.

use crate::error::ConversionError;
use crate::value::Value;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Converts a value to one target type
///
/// Implementations are pure: the input is borrowed immutably and a failed
/// conversion reports a [`ConversionError`] rather than panicking.
///
/// # Example
///
/// ```rust,ignore
/// use morph_convert::{I8Converter, TypeConverter, Value};
///
/// assert_eq!(I8Converter.convert(&Value::I32(127))?, 127i8);
/// assert!(I8Converter.convert(&Value::I32(300)).is_err());
/// ```
pub trait TypeConverter: Send + Sync {
    /// Converted type
    type Output: Into<Value>;

    /// Convert the value
    ///
    /// # Errors
    /// Returns [`ConversionError`] if the value's kind is unsupported or its
    /// content cannot be represented by [`Self::Output`]
    fn convert(&self, value: &Value) -> Result<Self::Output, ConversionError>;
}

/// Object-safe, value-to-value view of a [`TypeConverter`]
pub trait DynConverter: Send + Sync {
    /// Convert and re-wrap the result
    ///
    /// # Errors
    /// Propagates the underlying converter's error
    fn convert_value(&self, value: &Value) -> Result<Value, ConversionError>;

    /// Name of the concrete converter, for diagnostics
    fn describe(&self) -> &'static str;
}

impl<C: TypeConverter> DynConverter for C {
    fn convert_value(&self, value: &Value) -> Result<Value, ConversionError> {
        self.convert(value).map(Into::into)
    }

    fn describe(&self) -> &'static str {
        std::any::type_name::<C>()
    }
}

impl fmt::Debug for dyn DynConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Type-erased, shareable converter
pub type SharedConverter = Arc<dyn DynConverter>;

/// Erase a typed converter
#[inline]
pub fn share<C: TypeConverter + 'static>(converter: C) -> SharedConverter {
    Arc::new(converter)
}

/// Converter backed by a closure
///
/// Created with [`converter_fn`].
pub struct FnConverter<F, T> {
    f: F,
    _output: PhantomData<fn() -> T>,
}

impl<F, T> TypeConverter for FnConverter<F, T>
where
    F: Fn(&Value) -> Result<T, ConversionError> + Send + Sync,
    T: Into<Value>,
{
    type Output = T;

    fn convert(&self, value: &Value) -> Result<T, ConversionError> {
        (self.f)(value)
    }
}

impl<F, T> fmt::Debug for FnConverter<F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnConverter").finish_non_exhaustive()
    }
}

/// Build an ad-hoc converter from a closure
///
/// ```rust,ignore
/// let hex = converter_fn(|value: &Value| match value {
///     Value::String(s) => i64::from_str_radix(s, 16)
///         .map_err(|e| ConversionError::invalid(value, &TypeTag::I64, e.to_string())),
///     other => Err(ConversionError::unsupported(other, &TypeTag::I64)),
/// });
/// ```
#[inline]
pub fn converter_fn<F, T>(f: F) -> FnConverter<F, T>
where
    F: Fn(&Value) -> Result<T, ConversionError> + Send + Sync,
    T: Into<Value>,
{
    FnConverter {
        f,
        _output: PhantomData,
    }
}
