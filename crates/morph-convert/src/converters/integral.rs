//! Integral converters: fixed-width and arbitrary-precision

use super::numeric;
use crate::converter::TypeConverter;
use crate::error::ConversionError;
use crate::type_tag::TypeTag;
use crate::value::Value;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

macro_rules! fixed_integral_converter {
    ($(#[$meta:meta])* $name:ident => $ty:ty, $tag:ident, $narrow:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl TypeConverter for $name {
            type Output = $ty;

            fn convert(&self, value: &Value) -> Result<$ty, ConversionError> {
                let target = TypeTag::$tag;
                numeric::integral(value, &target)?
                    .$narrow()
                    .ok_or_else(|| ConversionError::overflow(value, &target))
            }
        }
    };
}

fixed_integral_converter! {
    /// Converts to `i8`, range-checked
    I8Converter => i8, I8, to_i8
}

fixed_integral_converter! {
    /// Converts to `i16`, range-checked
    I16Converter => i16, I16, to_i16
}

fixed_integral_converter! {
    /// Converts to `i32`, range-checked
    I32Converter => i32, I32, to_i32
}

fixed_integral_converter! {
    /// Converts to `i64`, range-checked
    I64Converter => i64, I64, to_i64
}

/// Converts to an arbitrary-precision integer
///
/// Never overflows; fractional inputs must still be integral-valued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BigIntConverter;

impl TypeConverter for BigIntConverter {
    type Output = BigInt;

    fn convert(&self, value: &Value) -> Result<BigInt, ConversionError> {
        numeric::integral(value, &TypeTag::BigInt)
    }
}
