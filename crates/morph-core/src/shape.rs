//! Source and target shape descriptions
//!
//! Shapes describe themselves explicitly: sources implement [`Projectable`]
//! to expose their attributes by name, targets implement [`Constructible`]
//! to hand out a [`TargetDescriptor`] listing their construction parameters
//! and how to build an instance from compiled [`Arguments`].

use crate::arguments::Arguments;
use crate::error::ConstructError;
use morph_convert::{TypeTag, Typed, Value};
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Current reading of a source attribute
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Declared type of the attribute
    pub declared: TypeTag,
    /// Current value (`None` is null)
    pub value: Option<Value>,
}

impl Attribute {
    /// Create attribute
    #[inline]
    #[must_use]
    pub fn new(declared: TypeTag, value: Option<Value>) -> Self {
        Self { declared, value }
    }

    /// Non-null scalar attribute
    #[inline]
    pub fn of<T: Typed + Into<Value>>(value: T) -> Self {
        Self::new(T::type_tag(), Some(value.into()))
    }

    /// Nullable scalar attribute
    #[inline]
    pub fn nullable<T: Typed + Into<Value>>(value: Option<T>) -> Self {
        Self::new(T::type_tag(), value.map(Into::into))
    }

    /// Attribute holding an arbitrary Rust value (nested shape, collection)
    #[inline]
    pub fn object<T>(value: &T) -> Self
    where
        T: Any + Send + Sync + fmt::Debug + PartialEq + Clone,
    {
        Self::new(TypeTag::of::<T>(), Some(Value::object(value.clone())))
    }

    /// Nullable attribute holding an arbitrary Rust value
    #[inline]
    pub fn nullable_object<T>(value: Option<&T>) -> Self
    where
        T: Any + Send + Sync + fmt::Debug + PartialEq + Clone,
    {
        Self::new(TypeTag::of::<T>(), value.map(|v| Value::object(v.clone())))
    }
}

/// Source side of a projection
///
/// # Example
///
/// ```rust,ignore
/// impl Projectable for Person {
///     fn attribute(&self, name: &str) -> Option<Attribute> {
///         match name {
///             "id" => Some(Attribute::of(self.id.clone())),
///             "age" => Some(Attribute::nullable(self.age)),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Projectable {
    /// Read the named attribute, or `None` if the shape has no such attribute
    fn attribute(&self, name: &str) -> Option<Attribute>;

    /// Shape name, used in diagnostics
    fn shape_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }
}

/// Construction parameter of a target shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name; positional-only parameters have none
    pub name: Option<String>,
    /// Declared type
    pub declared: TypeTag,
    /// Whether the parameter accepts null
    pub nullable: bool,
    /// Whether the parameter has a default the target applies itself
    pub optional: bool,
}

impl Parameter {
    /// Required, non-nullable parameter
    #[inline]
    pub fn required(name: impl Into<String>, declared: TypeTag) -> Self {
        Self {
            name: Some(name.into()),
            declared,
            nullable: false,
            optional: false,
        }
    }

    /// Nullable parameter without a default
    #[inline]
    pub fn nullable(name: impl Into<String>, declared: TypeTag) -> Self {
        Self::required(name, declared).with_nullable(true)
    }

    /// Parameter with a default
    #[inline]
    pub fn optional(name: impl Into<String>, declared: TypeTag) -> Self {
        Self::required(name, declared).with_optional(true)
    }

    /// Parameter without a name
    #[inline]
    #[must_use]
    pub fn positional(declared: TypeTag) -> Self {
        Self {
            name: None,
            declared,
            nullable: false,
            optional: false,
        }
    }

    /// With nullability
    #[inline]
    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// With optionality
    #[inline]
    #[must_use]
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }
}

/// Constructor capability of a target shape
pub type Constructor<R> = Arc<dyn Fn(Arguments) -> Result<R, ConstructError> + Send + Sync>;

/// Everything needed to build an `R` by projection
///
/// Cloning is cheap; the constructor is shared.
pub struct TargetDescriptor<R> {
    name: Cow<'static, str>,
    parameters: Vec<Parameter>,
    constructor: Constructor<R>,
}

impl<R> TargetDescriptor<R> {
    /// Create a descriptor with no parameters
    pub fn new<F>(name: impl Into<Cow<'static, str>>, constructor: F) -> Self
    where
        F: Fn(Arguments) -> Result<R, ConstructError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            constructor: Arc::new(constructor),
        }
    }

    /// Append a construction parameter
    #[inline]
    #[must_use]
    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Append several construction parameters
    #[must_use]
    pub fn parameters_from(mut self, parameters: impl IntoIterator<Item = Parameter>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    /// Target shape name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Construction parameters, in declaration order
    #[inline]
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Find a parameter by name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.name.as_deref() == Some(name))
    }

    /// Invoke the constructor
    ///
    /// # Errors
    /// Returns whatever [`ConstructError`] the constructor raises
    #[inline]
    pub fn construct(&self, arguments: Arguments) -> Result<R, ConstructError> {
        (self.constructor)(arguments)
    }
}

impl<R> Clone for TargetDescriptor<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            parameters: self.parameters.clone(),
            constructor: Arc::clone(&self.constructor),
        }
    }
}

impl<R> fmt::Debug for TargetDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetDescriptor")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// Target side of a projection
pub trait Constructible: Sized {
    /// Describe how to construct `Self`
    fn descriptor() -> TargetDescriptor<Self>;
}

/// Typed handle naming a construction parameter of `R` with type `T`
///
/// Declared by the shape's author as associated constants:
///
/// ```rust,ignore
/// impl Target {
///     pub const FULL_NAME: Property<Target, String> = Property::new("full_name");
/// }
/// ```
pub struct Property<R, T> {
    name: &'static str,
    _shape: PhantomData<fn() -> (R, T)>,
}

impl<R, T> Property<R, T> {
    /// Create handle
    #[inline]
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _shape: PhantomData,
        }
    }

    /// Parameter name
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<R, T> Clone for Property<R, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, T> Copy for Property<R, T> {}

impl<R, T> fmt::Debug for Property<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&self.name).finish()
    }
}

/// Anything that names a parameter of `R`, or an attribute of a source `R`
///
/// Plain names key any shape. A [`Property`] keys only the shape it was
/// declared on.
pub trait ParameterKey<R: ?Sized> {
    /// The referenced name
    fn key(&self) -> &str;
}

/// A [`ParameterKey`] accepting values of type `V`
///
/// Plain names accept any value. A `Property<R, T>` accepts only `T`, so
/// binding a mistyped value through a property does not compile:
///
/// ```compile_fail
/// use morph_core::morph_convert::{TypeConverterRegistry, TypeTag};
/// use morph_core::{Arguments, Parameter, ProjectionBuilder, Property, Record, TargetDescriptor};
///
/// struct Point {
///     x: i32,
/// }
///
/// const X: Property<Point, i32> = Property::new("x");
///
/// let descriptor = TargetDescriptor::new("Point", |mut args: Arguments| {
///     Ok(Point { x: args.take("x")? })
/// })
/// .parameter(Parameter::required("x", TypeTag::I32));
/// let registry = TypeConverterRegistry::with_defaults();
/// let source = Record::new("Source");
/// let mut builder = ProjectionBuilder::new(&source, &descriptor, &registry).unwrap();
/// builder.bind_value(X, "seven").unwrap();
/// ```
pub trait TypedKey<R: ?Sized, V>: ParameterKey<R> {}

impl<R: ?Sized> ParameterKey<R> for &str {
    fn key(&self) -> &str {
        self
    }
}

impl<R: ?Sized> ParameterKey<R> for String {
    fn key(&self) -> &str {
        self
    }
}

impl<R: ?Sized> ParameterKey<R> for &String {
    fn key(&self) -> &str {
        self
    }
}

impl<R, T> ParameterKey<R> for Property<R, T> {
    fn key(&self) -> &str {
        self.name
    }
}

impl<R: ?Sized, V> TypedKey<R, V> for &str {}

impl<R: ?Sized, V> TypedKey<R, V> for String {}

impl<R: ?Sized, V> TypedKey<R, V> for &String {}

impl<R, T> TypedKey<R, T> for Property<R, T> {}
