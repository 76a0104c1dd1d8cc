//! Testing utilities for the morph workspace
//!
//! Source and target fixture shapes covering identical, compatible,
//! incompatible, optional and nested parameters, plus a richer
//! `Source`/`Target` pair for projector tests.

#![allow(missing_docs)]

use chrono::NaiveDate;
use morph_convert::{BigInt, ConversionError, TypeConverter, TypeTag, Value};
use morph_core::{
    Arguments, Attribute, Constructible, Parameter, Projectable, Property, TargetDescriptor,
};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct NullableSource {
    pub a: Option<i32>,
}

impl Projectable for NullableSource {
    fn attribute(&self, name: &str) -> Option<Attribute> {
        match name {
            "a" => Some(Attribute::nullable(self.a)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NonNullableSource {
    pub a: i32,
}

impl NonNullableSource {
    pub const A: Property<NonNullableSource, i32> = Property::new("a");
}

impl Projectable for NonNullableSource {
    fn attribute(&self, name: &str) -> Option<Attribute> {
        match name {
            "a" => Some(Attribute::of(self.a)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncompatibleMultiArgSource {
    pub value: i32,
    pub power: i32,
}

impl Projectable for IncompatibleMultiArgSource {
    fn attribute(&self, name: &str) -> Option<Attribute> {
        match name {
            "value" => Some(Attribute::of(self.value)),
            "power" => Some(Attribute::of(self.power)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncompatibleSingleArgSource {
    pub value: Uuid,
}

impl Projectable for IncompatibleSingleArgSource {
    fn attribute(&self, name: &str) -> Option<Attribute> {
        match name {
            "value" => Some(Attribute::of(self.value)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Child {
    pub a: i32,
    pub b: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParentSource {
    pub a: Child,
}

impl Projectable for ParentSource {
    fn attribute(&self, name: &str) -> Option<Attribute> {
        match name {
            "a" => Some(Attribute::object(&self.a)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct NullableTarget {
    pub a: Option<i32>,
}

impl Constructible for NullableTarget {
    fn descriptor() -> TargetDescriptor<Self> {
        TargetDescriptor::new("NullableTarget", |mut args: Arguments| {
            Ok(Self {
                a: args.take_nullable("a")?,
            })
        })
        .parameter(Parameter::nullable("a", TypeTag::I32))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NonNullableTarget {
    pub a: i32,
}

impl Constructible for NonNullableTarget {
    fn descriptor() -> TargetDescriptor<Self> {
        TargetDescriptor::new("NonNullableTarget", |mut args: Arguments| {
            Ok(Self { a: args.take("a")? })
        })
        .parameter(Parameter::required("a", TypeTag::I32))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnmatchedNameTarget {
    pub b: i32,
}

impl UnmatchedNameTarget {
    pub const B: Property<UnmatchedNameTarget, i32> = Property::new("b");
}

impl Constructible for UnmatchedNameTarget {
    fn descriptor() -> TargetDescriptor<Self> {
        TargetDescriptor::new("UnmatchedNameTarget", |mut args: Arguments| {
            Ok(Self { b: args.take("b")? })
        })
        .parameter(Parameter::required("b", TypeTag::I32))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NullableOptionalTarget {
    pub a: Option<i32>,
}

impl Constructible for NullableOptionalTarget {
    fn descriptor() -> TargetDescriptor<Self> {
        TargetDescriptor::new("NullableOptionalTarget", |mut args: Arguments| {
            Ok(Self {
                a: args.take_nullable_or("a", Some(123))?,
            })
        })
        .parameter(Parameter::optional("a", TypeTag::I32).with_nullable(true))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NonNullableOptionalTarget {
    pub a: i32,
}

impl Constructible for NonNullableOptionalTarget {
    fn descriptor() -> TargetDescriptor<Self> {
        TargetDescriptor::new("NonNullableOptionalTarget", |mut args: Arguments| {
            Ok(Self {
                a: args.take_or("a", 123)?,
            })
        })
        .parameter(Parameter::optional("a", TypeTag::I32))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompatibleNullableTarget {
    pub a: Option<i64>,
}

impl Constructible for CompatibleNullableTarget {
    fn descriptor() -> TargetDescriptor<Self> {
        TargetDescriptor::new("CompatibleNullableTarget", |mut args: Arguments| {
            Ok(Self {
                a: args.take_nullable("a")?,
            })
        })
        .parameter(Parameter::nullable("a", TypeTag::I64))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompatibleNonNullableTarget {
    pub a: i64,
}

impl Constructible for CompatibleNonNullableTarget {
    fn descriptor() -> TargetDescriptor<Self> {
        TargetDescriptor::new("CompatibleNonNullableTarget", |mut args: Arguments| {
            Ok(Self { a: args.take("a")? })
        })
        .parameter(Parameter::required("a", TypeTag::I64))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompatibleNullableOptionalTarget {
    pub a: Option<i64>,
}

impl Constructible for CompatibleNullableOptionalTarget {
    fn descriptor() -> TargetDescriptor<Self> {
        TargetDescriptor::new("CompatibleNullableOptionalTarget", |mut args: Arguments| {
            Ok(Self {
                a: args.take_nullable_or("a", Some(123))?,
            })
        })
        .parameter(Parameter::optional("a", TypeTag::I64).with_nullable(true))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompatibleNonNullableOptionalTarget {
    pub a: i64,
}

impl Constructible for CompatibleNonNullableOptionalTarget {
    fn descriptor() -> TargetDescriptor<Self> {
        TargetDescriptor::new("CompatibleNonNullableOptionalTarget", |mut args: Arguments| {
            Ok(Self {
                a: args.take_or("a", 123)?,
            })
        })
        .parameter(Parameter::optional("a", TypeTag::I64))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncompatibleSingleArgTarget {
    pub value: BigInt,
}

impl IncompatibleSingleArgTarget {
    pub const VALUE: Property<IncompatibleSingleArgTarget, BigInt> = Property::new("value");
}

impl Constructible for IncompatibleSingleArgTarget {
    fn descriptor() -> TargetDescriptor<Self> {
        TargetDescriptor::new("IncompatibleSingleArgTarget", |mut args: Arguments| {
            Ok(Self {
                value: args.take("value")?,
            })
        })
        .parameter(Parameter::required("value", TypeTag::BigInt))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParentTarget {
    pub a: Child,
}

impl Constructible for ParentTarget {
    fn descriptor() -> TargetDescriptor<Self> {
        TargetDescriptor::new("ParentTarget", |mut args: Arguments| {
            Ok(Self {
                a: args.take_object("a")?,
            })
        })
        .parameter(Parameter::required("a", TypeTag::of::<Child>()))
    }
}

// ---------------------------------------------------------------------------
// Converters
// ---------------------------------------------------------------------------

/// Reads a UUID's 128 bits as an unsigned integer
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidToBigIntConverter;

impl TypeConverter for UuidToBigIntConverter {
    type Output = BigInt;

    fn convert(&self, value: &Value) -> Result<BigInt, ConversionError> {
        match value {
            Value::Uuid(uuid) => Ok(BigInt::from(uuid.as_u128())),
            other => Err(ConversionError::unsupported(other, &TypeTag::BigInt)),
        }
    }
}

// ---------------------------------------------------------------------------
// Source / Target pair for projector tests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub title: String,
    pub text: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub description: Option<String>,
    pub posts: Vec<Post>,
}

impl Projectable for Source {
    fn attribute(&self, name: &str) -> Option<Attribute> {
        match name {
            "id" => Some(Attribute::of(self.id.clone())),
            "first_name" => Some(Attribute::of(self.first_name.clone())),
            "last_name" => Some(Attribute::of(self.last_name.clone())),
            "description" => Some(Attribute::nullable(self.description.clone())),
            "posts" => Some(Attribute::object(&self.posts)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub id: Uuid,
    pub full_name: String,
    pub description: String,
    pub post_count: i32,
    pub posts: Vec<Post>,
    pub reference: i64,
}

impl Target {
    pub const ID: Property<Target, Uuid> = Property::new("id");
    pub const FULL_NAME: Property<Target, String> = Property::new("full_name");
    pub const DESCRIPTION: Property<Target, String> = Property::new("description");
    pub const POST_COUNT: Property<Target, i32> = Property::new("post_count");
    pub const POSTS: Property<Target, Vec<Post>> = Property::new("posts");
    pub const REFERENCE: Property<Target, i64> = Property::new("reference");
}

impl Constructible for Target {
    fn descriptor() -> TargetDescriptor<Self> {
        TargetDescriptor::new("Target", |mut args: Arguments| {
            Ok(Self {
                id: args.take("id")?,
                full_name: args.take("full_name")?,
                description: args.take("description")?,
                post_count: args.take("post_count")?,
                posts: args.take_object("posts")?,
                reference: args.take_or("reference", i64::MAX)?,
            })
        })
        .parameters_from([
            Parameter::required("id", TypeTag::Uuid),
            Parameter::required("full_name", TypeTag::String),
            Parameter::required("description", TypeTag::String),
            Parameter::required("post_count", TypeTag::I32),
            Parameter::required("posts", TypeTag::of::<Vec<Post>>()),
            Parameter::optional("reference", TypeTag::I64),
        ])
    }
}

pub const SOURCE_ID: &str = "079861fc-97f2-4af5-a47b-ece5a433e623";

pub fn post(title: &str, text: &str) -> Post {
    Post {
        title: title.to_string(),
        text: text.to_string(),
        date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
    }
}

pub fn create_source(description: Option<&str>) -> Source {
    Source {
        id: SOURCE_ID.to_string(),
        first_name: "John".to_string(),
        last_name: "Smith".to_string(),
        description: description.map(ToString::to_string),
        posts: vec![
            post("First post", "Hello, world!"),
            post("Second post", "Goodbye, world!"),
        ],
    }
}

pub fn expected_target(description: &str) -> Target {
    let source = create_source(None);
    Target {
        id: Uuid::parse_str(SOURCE_ID).unwrap(),
        full_name: "John Smith".to_string(),
        description: description.to_string(),
        post_count: 2,
        posts: source.posts,
        reference: i64::MAX,
    }
}
