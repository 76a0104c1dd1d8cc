//! Shared numeric readings
//!
//! Integral targets read every acceptable source as a [`BigInt`] first and
//! range-check afterwards, so the precision check always precedes the
//! overflow check.

use crate::error::ConversionError;
use crate::type_tag::TypeTag;
use crate::value::Value;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive, Zero};
use std::str::FromStr;

/// Read any integral-compatible value as an arbitrary-precision integer
pub(super) fn integral(value: &Value, to: &TypeTag) -> Result<BigInt, ConversionError> {
    match value {
        Value::Bool(b) => Ok(BigInt::from(u8::from(*b))),
        Value::I8(v) => Ok(BigInt::from(*v)),
        Value::I16(v) => Ok(BigInt::from(*v)),
        Value::I32(v) => Ok(BigInt::from(*v)),
        Value::I64(v) => Ok(BigInt::from(*v)),
        Value::BigInt(v) => Ok(v.clone()),
        Value::F32(v) => float_integral(f64::from(*v), value, to),
        Value::F64(v) => float_integral(*v, value, to),
        Value::Decimal(v) => decimal_integral(v, value, to),
        Value::Char(c) => Ok(BigInt::from(u32::from(*c))),
        Value::String(s) => BigInt::from_str(s)
            .map_err(|e| ConversionError::invalid(value, to, format!("'{s}': {e}"))),
        Value::Uuid(_) | Value::List(_) | Value::Object(_) => {
            Err(ConversionError::unsupported(value, to))
        }
    }
}

fn float_integral(v: f64, value: &Value, to: &TypeTag) -> Result<BigInt, ConversionError> {
    if v.is_nan() {
        return Err(ConversionError::invalid(value, to, "NaN has no integral value"));
    }
    if v.is_infinite() {
        return Err(ConversionError::overflow(value, to));
    }
    if v.fract() != 0.0 {
        return Err(ConversionError::precision(value, to));
    }
    BigInt::from_f64(v).ok_or_else(|| ConversionError::overflow(value, to))
}

/// Decimal exponent at which every fixed-width integral target overflows
const FIXED_WIDTH_OVERFLOW_EXPONENT: i64 = 19;

fn decimal_integral(
    v: &BigDecimal,
    value: &Value,
    to: &TypeTag,
) -> Result<BigInt, ConversionError> {
    // Exponents are bounded here; expanding one costs time and memory in its size
    let (unscaled, scale) = v.as_bigint_and_exponent();
    if unscaled.is_zero() {
        return Ok(BigInt::zero());
    }
    if scale > 0 && scale.unsigned_abs() >= unscaled.bits() {
        return Err(ConversionError::precision(value, to));
    }
    if scale <= -FIXED_WIDTH_OVERFLOW_EXPONENT && *to != TypeTag::BigInt {
        return Err(ConversionError::overflow(value, to));
    }
    if !v.is_integer() {
        return Err(ConversionError::precision(value, to));
    }
    let (digits, scale) = v.with_scale(0).as_bigint_and_exponent();
    debug_assert_eq!(scale, 0);
    Ok(digits)
}

/// Read any numeric-compatible value as a finite `f64`
///
/// Fixed-width integers round to the nearest representable value.
/// Arbitrary-precision inputs beyond the `f64` range overflow.
#[allow(clippy::cast_precision_loss)]
pub(super) fn floating(value: &Value, to: &TypeTag) -> Result<f64, ConversionError> {
    match value {
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::I8(v) => Ok(f64::from(*v)),
        Value::I16(v) => Ok(f64::from(*v)),
        Value::I32(v) => Ok(f64::from(*v)),
        Value::I64(v) => Ok(*v as f64),
        Value::BigInt(v) => finite(v.to_f64(), value, to),
        Value::F32(v) => Ok(f64::from(*v)),
        Value::F64(v) => Ok(*v),
        Value::Decimal(v) => finite(v.to_f64(), value, to),
        Value::Char(c) => Ok(f64::from(u32::from(*c))),
        Value::String(s) => s
            .parse::<f64>()
            .map_err(|e| ConversionError::invalid(value, to, format!("'{s}': {e}"))),
        Value::Uuid(_) | Value::List(_) | Value::Object(_) => {
            Err(ConversionError::unsupported(value, to))
        }
    }
}

fn finite(v: Option<f64>, value: &Value, to: &TypeTag) -> Result<f64, ConversionError> {
    match v {
        Some(f) if f.is_finite() => Ok(f),
        _ => Err(ConversionError::overflow(value, to)),
    }
}

/// Decimal reading of a float from its shortest round-trip text
pub(super) fn float_decimal(
    finite: bool,
    text: &str,
    value: &Value,
    to: &TypeTag,
) -> Result<BigDecimal, ConversionError> {
    if !finite {
        return Err(ConversionError::invalid(
            value,
            to,
            format!("{text} has no decimal representation"),
        ));
    }
    BigDecimal::from_str(text).map_err(|e| ConversionError::invalid(value, to, e.to_string()))
}
