//! Compiled named arguments
//!
//! [`Arguments`] is what a [`TargetDescriptor`](crate::TargetDescriptor)'s
//! constructor receives. A key mapped to `None` is an explicit null; a
//! missing key means the parameter was omitted and its default applies.

use crate::error::ConstructError;
use indexmap::IndexMap;
use morph_convert::{FromValue, TypeTag, Value, ValueMismatch};
use std::any::Any;

/// Named-argument map handed to target constructors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: IndexMap<String, Option<Value>>,
}

impl Arguments {
    /// Create empty argument map
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an argument (`None` is an explicit null)
    pub fn insert(&mut self, name: impl Into<String>, value: Option<Value>) {
        self.values.insert(name.into(), value);
    }

    /// Check if an argument (possibly null) was supplied
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Borrow an argument: outer `None` is omitted, inner `None` is null
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Option<&Value>> {
        self.values.get(name).map(Option::as_ref)
    }

    /// Supplied argument names, in resolution order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Get number of supplied arguments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no arguments were supplied
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Take a required, non-null argument
    ///
    /// # Errors
    /// Fails if the argument is omitted, null, or of another type
    pub fn take<T: FromValue>(&mut self, name: &str) -> Result<T, ConstructError> {
        match self.values.shift_remove(name) {
            None => Err(ConstructError::MissingArgument {
                parameter: name.to_owned(),
            }),
            Some(None) => Err(ConstructError::NullArgument {
                parameter: name.to_owned(),
            }),
            Some(Some(value)) => extract(name, value),
        }
    }

    /// Take a required, nullable argument
    ///
    /// # Errors
    /// Fails if the argument is omitted or of another type
    pub fn take_nullable<T: FromValue>(&mut self, name: &str) -> Result<Option<T>, ConstructError> {
        match self.values.shift_remove(name) {
            None => Err(ConstructError::MissingArgument {
                parameter: name.to_owned(),
            }),
            Some(value) => value.map(|v| extract(name, v)).transpose(),
        }
    }

    /// Take a non-null argument, falling back to `default` when omitted
    ///
    /// # Errors
    /// Fails if the argument is null or of another type
    pub fn take_or<T: FromValue>(&mut self, name: &str, default: T) -> Result<T, ConstructError> {
        if self.contains(name) {
            self.take(name)
        } else {
            Ok(default)
        }
    }

    /// Take a nullable argument, falling back to `default` when omitted
    ///
    /// # Errors
    /// Fails if the argument is of another type
    pub fn take_nullable_or<T: FromValue>(
        &mut self,
        name: &str,
        default: Option<T>,
    ) -> Result<Option<T>, ConstructError> {
        if self.contains(name) {
            self.take_nullable(name)
        } else {
            Ok(default)
        }
    }

    /// Take a required, non-null argument wrapping an arbitrary Rust value
    ///
    /// # Errors
    /// Fails if the argument is omitted, null, or wraps another type
    pub fn take_object<T: Any + Clone>(&mut self, name: &str) -> Result<T, ConstructError> {
        match self.values.shift_remove(name) {
            None => Err(ConstructError::MissingArgument {
                parameter: name.to_owned(),
            }),
            Some(None) => Err(ConstructError::NullArgument {
                parameter: name.to_owned(),
            }),
            Some(Some(value)) => extract_object(name, &value),
        }
    }

    /// Take a nullable argument wrapping an arbitrary Rust value
    ///
    /// # Errors
    /// Fails if the argument is omitted or wraps another type
    pub fn take_nullable_object<T: Any + Clone>(
        &mut self,
        name: &str,
    ) -> Result<Option<T>, ConstructError> {
        match self.values.shift_remove(name) {
            None => Err(ConstructError::MissingArgument {
                parameter: name.to_owned(),
            }),
            Some(value) => value.map(|v| extract_object(name, &v)).transpose(),
        }
    }

    /// Consume into the underlying ordered map
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> IndexMap<String, Option<Value>> {
        self.values
    }
}

fn extract<T: FromValue>(name: &str, value: Value) -> Result<T, ConstructError> {
    T::from_value(value).map_err(|ValueMismatch { expected, found }| ConstructError::TypeMismatch {
        parameter: name.to_owned(),
        expected,
        found,
    })
}

fn extract_object<T: Any + Clone>(name: &str, value: &Value) -> Result<T, ConstructError> {
    value
        .downcast_ref::<T>()
        .cloned()
        .ok_or_else(|| ConstructError::TypeMismatch {
            parameter: name.to_owned(),
            expected: TypeTag::of::<T>(),
            found: value.type_name().into_owned(),
        })
}

impl IntoIterator for Arguments {
    type Item = (String, Option<Value>);
    type IntoIter = indexmap::map::IntoIter<String, Option<Value>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl FromIterator<(String, Option<Value>)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (String, Option<Value>)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
