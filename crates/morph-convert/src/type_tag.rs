//! Declared-type identity
//!
//! Provides [`TypeTag`], the value compared when deciding whether a source
//! attribute and a target parameter share a type, and the key under which
//! converters are registered.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use std::borrow::Cow;
use std::fmt;
use uuid::Uuid;

/// Declared type of an attribute or construction parameter
///
/// Nullability is not part of the tag: `Option<i32>` and `i32` both declare
/// [`TypeTag::I32`]. Whether a parameter accepts null is a flag on the
/// parameter itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    /// `bool`
    Bool,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// Arbitrary-precision integer
    BigInt,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// Arbitrary-precision decimal
    Decimal,
    /// `char`
    Char,
    /// `String`
    String,
    /// Universally-unique identifier
    Uuid,
    /// Homogeneous list of the given element type
    List(Box<TypeTag>),
    /// Any other type, identified by name
    Named(Cow<'static, str>),
}

impl TypeTag {
    /// Tag for an arbitrary Rust type, identified by its type name
    ///
    /// Used for nested shapes and whole collections carried as
    /// [`Value::Object`](crate::Value::Object).
    #[inline]
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        Self::Named(Cow::Borrowed(std::any::type_name::<T>()))
    }

    /// Tag for a named type
    #[inline]
    #[must_use]
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Named(name.into())
    }

    /// List tag with the given element type
    #[inline]
    #[must_use]
    pub fn list_of(element: TypeTag) -> Self {
        Self::List(Box::new(element))
    }

    /// Check if this is one of the built-in scalar tags
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::List(_) | Self::Named(_))
    }

    /// Check if this tag denotes a numeric type
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::I8
                | Self::I16
                | Self::I32
                | Self::I64
                | Self::BigInt
                | Self::F32
                | Self::F64
                | Self::Decimal
        )
    }

    /// Human-readable type name
    #[must_use]
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Bool => Cow::Borrowed("bool"),
            Self::I8 => Cow::Borrowed("i8"),
            Self::I16 => Cow::Borrowed("i16"),
            Self::I32 => Cow::Borrowed("i32"),
            Self::I64 => Cow::Borrowed("i64"),
            Self::BigInt => Cow::Borrowed("BigInt"),
            Self::F32 => Cow::Borrowed("f32"),
            Self::F64 => Cow::Borrowed("f64"),
            Self::Decimal => Cow::Borrowed("BigDecimal"),
            Self::Char => Cow::Borrowed("char"),
            Self::String => Cow::Borrowed("String"),
            Self::Uuid => Cow::Borrowed("Uuid"),
            Self::List(element) => Cow::Owned(format!("List<{}>", element.name())),
            Self::Named(name) => Cow::Borrowed(name.as_ref()),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Rust types with a known [`TypeTag`]
///
/// Implemented for every built-in scalar, for `Vec<T>` and for `Option<T>`
/// (which shares `T`'s tag). Shape authors implement it for their own types
/// when they want a stable tag; [`TypeTag::of`] covers the rest.
pub trait Typed {
    /// Declared type tag
    fn type_tag() -> TypeTag;
}

macro_rules! impl_typed {
    ($($ty:ty => $tag:ident),* $(,)?) => {
        $(
            impl Typed for $ty {
                #[inline]
                fn type_tag() -> TypeTag {
                    TypeTag::$tag
                }
            }
        )*
    };
}

impl_typed! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    BigInt => BigInt,
    f32 => F32,
    f64 => F64,
    BigDecimal => Decimal,
    char => Char,
    String => String,
    Uuid => Uuid,
}

impl Typed for &str {
    #[inline]
    fn type_tag() -> TypeTag {
        TypeTag::String
    }
}

impl<T: Typed> Typed for Vec<T> {
    fn type_tag() -> TypeTag {
        TypeTag::list_of(T::type_tag())
    }
}

impl<T: Typed> Typed for Option<T> {
    fn type_tag() -> TypeTag {
        T::type_tag()
    }
}
