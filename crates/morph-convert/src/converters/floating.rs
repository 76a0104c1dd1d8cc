//! Floating-point and decimal converters

use super::numeric;
use crate::converter::TypeConverter;
use crate::error::ConversionError;
use crate::type_tag::TypeTag;
use crate::value::Value;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use std::str::FromStr;

/// Converts to `f32`
///
/// `f64` inputs must fit the `f32` range and survive the narrowing exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct F32Converter;

impl TypeConverter for F32Converter {
    type Output = f32;

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn convert(&self, value: &Value) -> Result<f32, ConversionError> {
        let target = TypeTag::F32;
        match value {
            Value::F32(v) => Ok(*v),
            Value::I8(v) => Ok(f32::from(*v)),
            Value::I16(v) => Ok(f32::from(*v)),
            Value::I32(v) => Ok(*v as f32),
            Value::I64(v) => Ok(*v as f32),
            Value::Char(c) => Ok(u32::from(*c) as f32),
            Value::String(s) => s
                .parse::<f32>()
                .map_err(|e| ConversionError::invalid(value, &target, format!("'{s}': {e}"))),
            Value::F64(v) => {
                let narrowed = *v as f32;
                if v.is_finite() && narrowed.is_infinite() {
                    Err(ConversionError::overflow(value, &target))
                } else if v.is_finite() && f64::from(narrowed) != *v {
                    Err(ConversionError::precision(value, &target))
                } else {
                    Ok(narrowed)
                }
            }
            _ => {
                let wide = numeric::floating(value, &target)?;
                let narrowed = wide as f32;
                if narrowed.is_infinite() {
                    Err(ConversionError::overflow(value, &target))
                } else {
                    Ok(narrowed)
                }
            }
        }
    }
}

/// Converts to `f64`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct F64Converter;

impl TypeConverter for F64Converter {
    type Output = f64;

    fn convert(&self, value: &Value) -> Result<f64, ConversionError> {
        numeric::floating(value, &TypeTag::F64)
    }
}

/// Converts to an arbitrary-precision decimal
///
/// Floats go through their own shortest round-trip text, so both `0.1f32`
/// and `0.1f64` become exactly `0.1`. Parsed text is normalized (trailing zeros stripped).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecimalConverter;

impl TypeConverter for DecimalConverter {
    type Output = BigDecimal;

    fn convert(&self, value: &Value) -> Result<BigDecimal, ConversionError> {
        let target = TypeTag::Decimal;
        match value {
            Value::Bool(b) => Ok(BigDecimal::from(u8::from(*b))),
            Value::I8(v) => Ok(BigDecimal::from(*v)),
            Value::I16(v) => Ok(BigDecimal::from(*v)),
            Value::I32(v) => Ok(BigDecimal::from(*v)),
            Value::I64(v) => Ok(BigDecimal::from(*v)),
            Value::BigInt(v) => Ok(BigDecimal::new(v.clone(), 0)),
            Value::F32(v) => numeric::float_decimal(v.is_finite(), &v.to_string(), value, &target),
            Value::F64(v) => numeric::float_decimal(v.is_finite(), &v.to_string(), value, &target),
            Value::Decimal(v) => Ok(v.clone()),
            Value::Char(c) => Ok(BigDecimal::new(BigInt::from(u32::from(*c)), 0)),
            Value::String(s) => BigDecimal::from_str(s)
                .map(|d| d.normalized())
                .map_err(|e| ConversionError::invalid(value, &target, format!("'{s}': {e}"))),
            Value::Uuid(_) | Value::List(_) | Value::Object(_) => {
                Err(ConversionError::unsupported(value, &target))
            }
        }
    }
}
