//! Built-in converters
//!
//! One converter per scalar target type, plus the pass-through and
//! placeholder converters binding contexts install on their own.
//!
//! | Converter          | Output       |
//! |--------------------|--------------|
//! | [`BoolConverter`]    | `bool`       |
//! | [`I8Converter`] .. [`I64Converter`] | `i8` .. `i64` |
//! | [`BigIntConverter`]  | `BigInt`     |
//! | [`F32Converter`], [`F64Converter`] | `f32`, `f64` |
//! | [`DecimalConverter`] | `BigDecimal` |
//! | [`CharConverter`]    | `char`       |
//! | [`StringConverter`]  | `String`     |
//! | [`UuidConverter`]    | `Uuid`       |

mod boolean;
mod floating;
mod identifier;
mod identity;
mod integral;
mod numeric;
mod text;

pub use boolean::BoolConverter;
pub use floating::{DecimalConverter, F32Converter, F64Converter};
pub use identifier::UuidConverter;
pub use identity::{IdenticalConverter, NotImplementedConverter, VerbatimConverter};
pub use integral::{BigIntConverter, I16Converter, I32Converter, I64Converter, I8Converter};
pub use text::{CharConverter, StringConverter};
