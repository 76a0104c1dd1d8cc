//! Range and precision laws of the built-in numeric converters

use morph_convert::{
    BigInt, BigIntConverter, ConversionErrorKind, DecimalConverter, F64Converter, I16Converter,
    I32Converter, I64Converter, I8Converter, StringConverter, TypeConverter, Value,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_i8_accepts_exactly_its_range(v in any::<i32>()) {
        let result = I8Converter.convert(&Value::I32(v));
        match i8::try_from(v) {
            Ok(expected) => prop_assert_eq!(result, Ok(expected)),
            Err(_) => prop_assert_eq!(result.unwrap_err().kind(), ConversionErrorKind::NumericOverflow),
        }
    }

    #[test]
    fn prop_i16_accepts_exactly_its_range(v in any::<i64>()) {
        let result = I16Converter.convert(&Value::I64(v));
        match i16::try_from(v) {
            Ok(expected) => prop_assert_eq!(result, Ok(expected)),
            Err(_) => prop_assert_eq!(result.unwrap_err().kind(), ConversionErrorKind::NumericOverflow),
        }
    }

    #[test]
    fn prop_widening_is_lossless(v in any::<i32>()) {
        prop_assert_eq!(I64Converter.convert(&Value::I32(v)), Ok(i64::from(v)));
        prop_assert_eq!(BigIntConverter.convert(&Value::I32(v)), Ok(BigInt::from(v)));
        prop_assert_eq!(F64Converter.convert(&Value::I32(v)), Ok(f64::from(v)));
    }

    #[test]
    fn prop_integral_floats_convert(v in -1_000_000i32..1_000_000) {
        prop_assert_eq!(I32Converter.convert(&Value::F64(f64::from(v))), Ok(v));
    }

    #[test]
    fn prop_fractional_floats_lose_precision(whole in -1_000_000i32..1_000_000, frac in 0.01f64..0.99) {
        let value = Value::F64(f64::from(whole) + frac.copysign(f64::from(whole)));
        let err = I64Converter.convert(&value).unwrap_err();
        prop_assert_eq!(err.kind(), ConversionErrorKind::LossOfPrecision);
    }

    #[test]
    fn prop_integral_text_round_trips(v in any::<i64>()) {
        let text = StringConverter.convert(&Value::I64(v)).unwrap();
        prop_assert_eq!(I64Converter.convert(&Value::String(text)), Ok(v));
    }

    #[test]
    fn prop_decimal_of_integer_converts_back(v in any::<i64>()) {
        let decimal = DecimalConverter.convert(&Value::I64(v)).unwrap();
        prop_assert_eq!(I64Converter.convert(&Value::Decimal(decimal)), Ok(v));
    }
}

#[test]
fn boundary_values() {
    assert_eq!(I8Converter.convert(&Value::I32(127)), Ok(127));
    assert_eq!(
        I8Converter.convert(&Value::I32(300)).unwrap_err().kind(),
        ConversionErrorKind::NumericOverflow
    );
    assert_eq!(I32Converter.convert(&Value::F64(2.0)), Ok(2));
    assert_eq!(
        I32Converter.convert(&Value::F64(1.5)).unwrap_err().kind(),
        ConversionErrorKind::LossOfPrecision
    );
}
