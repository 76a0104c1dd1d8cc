//! Runtime values
//!
//! [`Value`] is the closed set of value kinds a projection can carry from a
//! source attribute to a target parameter. Null is never a `Value`: absent
//! readings are `Option<Value>::None` throughout the workspace.

use crate::error::ValueMismatch;
use crate::type_tag::{TypeTag, Typed};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// A projected value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean
    Bool(bool),
    /// 8-bit signed integer
    I8(i8),
    /// 16-bit signed integer
    I16(i16),
    /// 32-bit signed integer
    I32(i32),
    /// 64-bit signed integer
    I64(i64),
    /// Arbitrary-precision integer
    BigInt(BigInt),
    /// Single-precision float
    F32(f32),
    /// Double-precision float
    F64(f64),
    /// Arbitrary-precision decimal
    Decimal(BigDecimal),
    /// Unicode scalar value
    Char(char),
    /// UTF-8 text
    String(String),
    /// Universally-unique identifier
    Uuid(Uuid),
    /// Ordered list of values
    List(Vec<Value>),
    /// Opaque Rust value (nested shape, whole collection, ...)
    Object(ObjectValue),
}

impl Value {
    /// Wrap an arbitrary Rust value
    #[inline]
    #[must_use]
    pub fn object<T>(value: T) -> Self
    where
        T: Any + Send + Sync + fmt::Debug + PartialEq,
    {
        Self::Object(ObjectValue::new(value))
    }

    /// Runtime type name, used in diagnostics
    #[must_use]
    pub fn type_name(&self) -> Cow<'static, str> {
        match self {
            Self::Bool(_) => Cow::Borrowed("bool"),
            Self::I8(_) => Cow::Borrowed("i8"),
            Self::I16(_) => Cow::Borrowed("i16"),
            Self::I32(_) => Cow::Borrowed("i32"),
            Self::I64(_) => Cow::Borrowed("i64"),
            Self::BigInt(_) => Cow::Borrowed("BigInt"),
            Self::F32(_) => Cow::Borrowed("f32"),
            Self::F64(_) => Cow::Borrowed("f64"),
            Self::Decimal(_) => Cow::Borrowed("BigDecimal"),
            Self::Char(_) => Cow::Borrowed("char"),
            Self::String(_) => Cow::Borrowed("String"),
            Self::Uuid(_) => Cow::Borrowed("Uuid"),
            Self::List(_) => Cow::Borrowed("List"),
            Self::Object(object) => Cow::Borrowed(object.type_name()),
        }
    }

    /// Check if this value is numeric
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::I8(_)
                | Self::I16(_)
                | Self::I32(_)
                | Self::I64(_)
                | Self::BigInt(_)
                | Self::F32(_)
                | Self::F64(_)
                | Self::Decimal(_)
        )
    }

    /// Check if this value is an instance of the declared type
    ///
    /// Lists conform when every element does; objects conform to the
    /// [`TypeTag::Named`] tag of their Rust type.
    #[must_use]
    pub fn conforms_to(&self, tag: &TypeTag) -> bool {
        match (self, tag) {
            (Self::Bool(_), TypeTag::Bool)
            | (Self::I8(_), TypeTag::I8)
            | (Self::I16(_), TypeTag::I16)
            | (Self::I32(_), TypeTag::I32)
            | (Self::I64(_), TypeTag::I64)
            | (Self::BigInt(_), TypeTag::BigInt)
            | (Self::F32(_), TypeTag::F32)
            | (Self::F64(_), TypeTag::F64)
            | (Self::Decimal(_), TypeTag::Decimal)
            | (Self::Char(_), TypeTag::Char)
            | (Self::String(_), TypeTag::String)
            | (Self::Uuid(_), TypeTag::Uuid) => true,
            (Self::List(items), TypeTag::List(element)) => {
                items.iter().all(|item| item.conforms_to(element))
            }
            (Self::Object(object), TypeTag::Named(name)) => object.type_name() == name.as_ref(),
            _ => false,
        }
    }

    /// Borrow the text of a `String` value
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the wrapped object if it is a `T`
    #[inline]
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Object(object) => object.downcast_ref(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::BigInt(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
            Self::Uuid(v) => write!(f, "{v}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Object(object) => write!(f, "{object:?}"),
        }
    }
}

/// Object-safe view of an opaque value
pub trait ObjectData: Any + Send + Sync + fmt::Debug {
    /// Upcast for downcasting
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + Send + Sync + fmt::Debug> ObjectData for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Shared, comparable wrapper around an arbitrary Rust value
///
/// Cloning is cheap (reference-counted). Equality delegates to the wrapped
/// type's `PartialEq`; objects of different types are never equal.
#[derive(Clone)]
pub struct ObjectValue {
    type_name: &'static str,
    data: Arc<dyn ObjectData>,
    eq: fn(&dyn Any, &dyn Any) -> bool,
}

impl ObjectValue {
    /// Wrap a value
    #[must_use]
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Send + Sync + fmt::Debug + PartialEq,
    {
        Self {
            type_name: std::any::type_name::<T>(),
            data: Arc::new(value),
            eq: object_eq::<T>,
        }
    }

    /// Type name of the wrapped value
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Declared tag of the wrapped value (see [`TypeTag::of`])
    #[inline]
    #[must_use]
    pub fn type_tag(&self) -> TypeTag {
        TypeTag::Named(Cow::Borrowed(self.type_name))
    }

    /// Borrow the wrapped value if it is a `T`
    #[inline]
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.data().as_any().downcast_ref()
    }

    /// Check if the wrapped value is a `T`
    #[inline]
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.data().as_any().is::<T>()
    }

    // Deref explicitly: `Arc<dyn ObjectData>` is itself `ObjectData`.
    fn data(&self) -> &dyn ObjectData {
        &*self.data
    }
}

fn object_eq<T: PartialEq + 'static>(a: &dyn Any, b: &dyn Any) -> bool {
    match (a.downcast_ref::<T>(), b.downcast_ref::<T>()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

impl PartialEq for ObjectValue {
    fn eq(&self, other: &Self) -> bool {
        (self.eq)(self.data().as_any(), other.data().as_any())
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.data(), f)
    }
}

macro_rules! impl_scalar_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }

            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self, ValueMismatch> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(ValueMismatch::new(<$ty>::type_tag(), &other)),
                    }
                }
            }
        )*
    };
}

impl_scalar_value! {
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

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<ObjectValue> for Value {
    #[inline]
    fn from(value: ObjectValue) -> Self {
        Value::Object(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

/// Typed extraction from a [`Value`]
///
/// Extraction is exact: an `i64` is only read from [`Value::I64`]. Type
/// conversion is the converters' job and happens before construction.
pub trait FromValue: Typed + Sized {
    /// Extract `Self` from the value
    ///
    /// # Errors
    /// Returns [`ValueMismatch`] if the value holds a different kind
    fn from_value(value: Value) -> Result<Self, ValueMismatch>;
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(ValueMismatch::new(Self::type_tag(), &other)),
        }
    }
}
