//! Dynamic, schema-less shapes
//!
//! A [`Record`] is a named bag of typed attributes that can be projected
//! from like any other source. A [`RecordShape`] describes the parameters
//! of a record target and yields its [`TargetDescriptor`].

use crate::arguments::Arguments;
use crate::error::ConstructError;
use crate::shape::{Attribute, Parameter, Projectable, TargetDescriptor};
use indexmap::IndexMap;
use morph_convert::{TypeTag, Value};
use std::borrow::Cow;

/// In-memory record of named attributes
///
/// Equality ignores attribute order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    shape: String,
    attributes: IndexMap<String, Attribute>,
}

impl Record {
    /// Create empty record of the named shape
    #[inline]
    pub fn new(shape: impl Into<String>) -> Self {
        Self {
            shape: shape.into(),
            attributes: IndexMap::new(),
        }
    }

    /// With an attribute
    #[inline]
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.set(name, attribute);
        self
    }

    /// Set an attribute, replacing any previous one
    pub fn set(&mut self, name: impl Into<String>, attribute: Attribute) {
        self.attributes.insert(name.into(), attribute);
    }

    /// Borrow an attribute
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Borrow an attribute's value (`None` if absent or null)
    #[inline]
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).and_then(|a| a.value.as_ref())
    }

    /// Shape name
    #[inline]
    #[must_use]
    pub fn shape(&self) -> &str {
        &self.shape
    }

    /// Attribute names, in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Get number of attributes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Check if the record has no attributes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl Projectable for Record {
    fn attribute(&self, name: &str) -> Option<Attribute> {
        self.attributes.get(name).cloned()
    }

    fn shape_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.shape)
    }
}

/// Parameter list of a record target
///
/// # Example
///
/// ```rust,ignore
/// let shape = RecordShape::new("Dto")
///     .required("id", TypeTag::Uuid)
///     .nullable("description", TypeTag::String)
///     .optional("reference", TypeTag::I64, Some(Value::I64(i64::MAX)));
///
/// let dto: Record = Projection::with_descriptor(shape.descriptor()).project(&source)?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RecordShape {
    name: String,
    parameters: Vec<(Parameter, Option<Value>)>,
}

impl RecordShape {
    /// Create shape with no parameters
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    /// With a required, non-nullable parameter
    #[must_use]
    pub fn required(self, name: impl Into<String>, declared: TypeTag) -> Self {
        self.push(Parameter::required(name, declared), None)
    }

    /// With a nullable parameter without default
    #[must_use]
    pub fn nullable(self, name: impl Into<String>, declared: TypeTag) -> Self {
        self.push(Parameter::nullable(name, declared), None)
    }

    /// With an optional parameter; a `None` default makes it nullable too
    #[must_use]
    pub fn optional(self, name: impl Into<String>, declared: TypeTag, default: Option<Value>) -> Self {
        let parameter = Parameter::optional(name, declared).with_nullable(default.is_none());
        self.push(parameter, default)
    }

    /// With an unnamed parameter (cannot be projected onto)
    #[must_use]
    pub fn positional(self, declared: TypeTag) -> Self {
        self.push(Parameter::positional(declared), None)
    }

    fn push(mut self, parameter: Parameter, default: Option<Value>) -> Self {
        self.parameters.push((parameter, default));
        self
    }

    /// Shape name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Descriptor constructing [`Record`]s of this shape
    ///
    /// The constructor type-checks every argument against its declared tag
    /// and fills omitted optional parameters with their defaults.
    #[must_use]
    pub fn descriptor(&self) -> TargetDescriptor<Record> {
        let shape = self.clone();
        TargetDescriptor::new(self.name.clone(), move |arguments| shape.construct(&arguments))
            .parameters_from(self.parameters.iter().map(|(p, _)| p.clone()))
    }

    fn construct(&self, arguments: &Arguments) -> Result<Record, ConstructError> {
        let mut record = Record::new(self.name.clone());
        for (parameter, default) in &self.parameters {
            let Some(name) = parameter.name.as_deref() else {
                continue;
            };
            let value = match arguments.get(name) {
                None if parameter.optional => default.clone(),
                None => {
                    return Err(ConstructError::MissingArgument {
                        parameter: name.to_owned(),
                    })
                }
                Some(None) if parameter.nullable => None,
                Some(None) => {
                    return Err(ConstructError::NullArgument {
                        parameter: name.to_owned(),
                    })
                }
                Some(Some(value)) if value.conforms_to(&parameter.declared) => Some(value.clone()),
                Some(Some(value)) => {
                    return Err(ConstructError::TypeMismatch {
                        parameter: name.to_owned(),
                        expected: parameter.declared.clone(),
                        found: value.type_name().into_owned(),
                    })
                }
            };
            record.set(name, Attribute::new(parameter.declared.clone(), value));
        }
        Ok(record)
    }
}
