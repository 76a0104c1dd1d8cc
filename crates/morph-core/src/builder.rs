//! Projection builder
//!
//! Seeds one [`BindingContext`] per target parameter by naming convention,
//! lets the caller override individual bindings, and compiles the result
//! into [`Arguments`].

use crate::arguments::Arguments;
use crate::binding::{BindingContext, Resolution, ValueUpdate};
use crate::error::{ConfigurationError, ProjectionError};
use crate::shape::{Attribute, ParameterKey, Projectable, TargetDescriptor, TypedKey};
use morph_convert::{
    share, IdenticalConverter, NotImplementedConverter, SharedConverter, TypeConverter,
    TypeConverterRegistry, TypeTag, Value, VerbatimConverter,
};
use std::collections::BTreeMap;

/// Builds the argument map for one projection
///
/// Created fresh for every projection and consumed by [`compile`](Self::compile).
///
/// # Example
///
/// ```rust,ignore
/// let mut builder = ProjectionBuilder::new(&source, &descriptor, &registry)?;
/// builder
///     .bind_with("full_name", |s: &Source| format!("{} {}", s.first_name, s.last_name))?
///     .bind_attribute("b", "a")?;
/// let arguments = builder.compile()?;
/// ```
pub struct ProjectionBuilder<'a, S: ?Sized, R> {
    subject: &'a S,
    target: &'a TargetDescriptor<R>,
    registry: &'a TypeConverterRegistry,
    contexts: BTreeMap<String, BindingContext>,
}

impl<'a, S: Projectable + ?Sized, R> ProjectionBuilder<'a, S, R> {
    /// Create builder with conventional bindings for every target parameter
    ///
    /// # Errors
    /// Returns [`ConfigurationError::UnnamedParameter`] if the target has a
    /// parameter without a name
    pub fn new(
        subject: &'a S,
        target: &'a TargetDescriptor<R>,
        registry: &'a TypeConverterRegistry,
    ) -> Result<Self, ProjectionError> {
        Self::seeded(subject, target, registry, true)
    }

    pub(crate) fn seeded(
        subject: &'a S,
        target: &'a TargetDescriptor<R>,
        registry: &'a TypeConverterRegistry,
        log_bindings: bool,
    ) -> Result<Self, ProjectionError> {
        let mut contexts = BTreeMap::new();

        for (position, parameter) in target.parameters().iter().enumerate() {
            let name = parameter.name.clone().ok_or_else(|| {
                ProjectionError::from(ConfigurationError::UnnamedParameter {
                    target: target.name().to_owned(),
                    position,
                })
            })?;

            let (value, converter) = match subject.attribute(&name) {
                Some(Attribute { declared, value }) if declared == parameter.declared => {
                    (value, share(IdenticalConverter))
                }
                Some(Attribute { value, .. }) => {
                    (value, conventional_converter(registry, &name, &parameter.declared))
                }
                None => (None, conventional_converter(registry, &name, &parameter.declared)),
            };

            if log_bindings {
                tracing::trace!(
                    "Seeded binding {}.{} ({}) with {}",
                    target.name(),
                    name,
                    parameter.declared,
                    converter.describe()
                );
            }

            let context = BindingContext::new(name.clone(), parameter.declared.clone(), converter)
                .with_nullable(parameter.nullable)
                .with_optional(parameter.optional)
                .with_value(value);
            contexts.insert(name, context);
        }

        Ok(Self {
            subject,
            target,
            registry,
            contexts,
        })
    }

    /// Bind a literal value, passed through unconverted
    ///
    /// A [`Property`](crate::Property) key only accepts values of its
    /// declared type.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::UnknownParameter`] for an unknown key
    pub fn bind_value<K, V>(&mut self, key: K, value: V) -> Result<&mut Self, ProjectionError>
    where
        K: TypedKey<R, V>,
        V: Into<Value>,
    {
        self.apply(key, ValueUpdate::SetTo(Some(value.into())), Some(share(VerbatimConverter)))
    }

    /// Bind an explicit null
    ///
    /// A nullable parameter receives null even when it has a default. A
    /// non-nullable parameter falls back to its default, or fails as missing.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::UnknownParameter`] for an unknown key
    pub fn bind_null<K: ParameterKey<R>>(&mut self, key: K) -> Result<&mut Self, ProjectionError> {
        self.apply(key, ValueUpdate::SetTo(None), Some(share(VerbatimConverter)))
    }

    /// Bind a value computed from the subject, evaluated immediately
    ///
    /// # Errors
    /// Returns [`ConfigurationError::UnknownParameter`] for an unknown key
    pub fn bind_with<K, F, V>(&mut self, key: K, action: F) -> Result<&mut Self, ProjectionError>
    where
        K: TypedKey<R, V>,
        F: FnOnce(&S) -> V,
        V: Into<Value>,
    {
        let value = action(self.subject).into();
        self.apply(key, ValueUpdate::SetTo(Some(value)), Some(share(VerbatimConverter)))
    }

    /// Bind a possibly-null value computed from the subject
    ///
    /// `None` behaves like [`bind_null`](Self::bind_null).
    ///
    /// # Errors
    /// Returns [`ConfigurationError::UnknownParameter`] for an unknown key
    pub fn bind_optional_with<K, F, V>(
        &mut self,
        key: K,
        action: F,
    ) -> Result<&mut Self, ProjectionError>
    where
        K: TypedKey<R, Option<V>>,
        F: FnOnce(&S) -> Option<V>,
        V: Into<Value>,
    {
        let value = action(self.subject).map(Into::into);
        self.apply(key, ValueUpdate::SetTo(value), Some(share(VerbatimConverter)))
    }

    /// Bind the current reading of a (possibly differently named) source attribute
    ///
    /// A null reading behaves like [`bind_null`](Self::bind_null).
    ///
    /// # Errors
    /// - [`ConfigurationError::UnknownSourceAttribute`] if the subject lacks the attribute
    /// - [`ConfigurationError::UnknownParameter`] for an unknown key
    pub fn bind_attribute<K, A>(&mut self, key: K, attribute: A) -> Result<&mut Self, ProjectionError>
    where
        K: ParameterKey<R>,
        A: ParameterKey<S>,
    {
        let name = attribute.key();
        let Some(Attribute { value, .. }) = self.subject.attribute(name) else {
            return Err(ConfigurationError::UnknownSourceAttribute {
                shape: self.subject.shape_name().into_owned(),
                name: name.to_owned(),
            }
            .into());
        };
        self.apply(key, ValueUpdate::SetTo(value), Some(share(VerbatimConverter)))
    }

    /// Replace only the converter, keeping the conventional value
    ///
    /// # Errors
    /// Returns [`ConfigurationError::UnknownParameter`] for an unknown key
    pub fn bind_converter<K, C>(&mut self, key: K, converter: C) -> Result<&mut Self, ProjectionError>
    where
        K: TypedKey<R, C::Output>,
        C: TypeConverter + 'static,
    {
        self.apply(key, ValueUpdate::Unchanged, Some(share(converter)))
    }

    /// Replace only the converter with a shared instance
    ///
    /// # Errors
    /// Returns [`ConfigurationError::UnknownParameter`] for an unknown key
    pub fn bind_shared_converter<K: ParameterKey<R>>(
        &mut self,
        key: K,
        converter: SharedConverter,
    ) -> Result<&mut Self, ProjectionError> {
        self.apply(key, ValueUpdate::Unchanged, Some(converter))
    }

    fn apply<K: ParameterKey<R>>(
        &mut self,
        key: K,
        update: ValueUpdate,
        converter: Option<SharedConverter>,
    ) -> Result<&mut Self, ProjectionError> {
        let name = key.key();
        let Some(context) = self.contexts.get_mut(name) else {
            return Err(ConfigurationError::UnknownParameter {
                target: self.target.name().to_owned(),
                name: name.to_owned(),
            }
            .into());
        };
        tracing::debug!("Overriding binding {}.{}", self.target.name(), name);
        context.apply(update, converter);
        Ok(self)
    }

    /// Resolve every binding, in parameter-name order
    ///
    /// # Errors
    /// Returns the first [`ProjectionError`] raised by a binding; no partial
    /// argument map is produced
    pub fn compile(self) -> Result<Arguments, ProjectionError> {
        let mut arguments = Arguments::new();
        for context in self.contexts.values() {
            match context.resolve()? {
                Resolution::Bound(name, value) => arguments.insert(name, value),
                Resolution::Omitted => {
                    tracing::trace!(
                        "Omitting {}.{}; target default applies",
                        self.target.name(),
                        context.parameter_name()
                    );
                }
            }
        }
        Ok(arguments)
    }

    /// The source instance
    #[inline]
    #[must_use]
    pub fn subject(&self) -> &'a S {
        self.subject
    }

    /// The target descriptor
    #[inline]
    #[must_use]
    pub fn target(&self) -> &'a TargetDescriptor<R> {
        self.target
    }

    /// The converter registry used for seeding
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &'a TypeConverterRegistry {
        self.registry
    }

    /// Binding for the named parameter
    #[inline]
    #[must_use]
    pub fn context(&self, name: &str) -> Option<&BindingContext> {
        self.contexts.get(name)
    }

    /// All bindings, keyed by parameter name
    #[inline]
    #[must_use]
    pub fn contexts(&self) -> &BTreeMap<String, BindingContext> {
        &self.contexts
    }
}

fn conventional_converter(
    registry: &TypeConverterRegistry,
    parameter: &str,
    declared: &TypeTag,
) -> SharedConverter {
    registry.get_or_none(declared).unwrap_or_else(|| {
        tracing::debug!(
            "No type converter registered for {}; parameter '{}' can only be bound explicitly",
            declared,
            parameter
        );
        share(NotImplementedConverter::new(declared.clone()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::BindingOrigin;
    use crate::record::{Record, RecordShape};
    use crate::error::ProjectionErrorKind;

    fn source() -> Record {
        Record::new("Source")
            .with("a", Attribute::of(1i32))
            .with("b", Attribute::of(2i64))
            .with("n", Attribute::nullable::<i32>(None))
    }

    fn target() -> TargetDescriptor<Record> {
        RecordShape::new("Target")
            .required("a", TypeTag::I32)
            .required("b", TypeTag::I8)
            .nullable("n", TypeTag::I32)
            .optional("missing", TypeTag::I32, Some(Value::I32(9)))
            .descriptor()
    }

    #[test]
    fn seeds_one_context_per_parameter() {
        let (source, target, registry) = (source(), target(), TypeConverterRegistry::with_defaults());
        let builder = ProjectionBuilder::new(&source, &target, &registry).unwrap();

        let names: Vec<_> = builder.contexts().keys().map(String::as_str).collect();
        assert_eq!(names, ["a", "b", "missing", "n"]);

        let a = builder.context("a").unwrap();
        assert_eq!(a.value(), Some(&Value::I32(1)));
        assert!(a.converter().describe().contains("IdenticalConverter"));

        let b = builder.context("b").unwrap();
        assert!(b.converter().describe().contains("I8Converter"));
        assert_eq!(b.origin(), BindingOrigin::Conventional);

        assert_eq!(builder.context("missing").unwrap().value(), None);
    }

    #[test]
    fn compile_converts_and_omits() {
        let (source, target, registry) = (source(), target(), TypeConverterRegistry::with_defaults());
        let arguments = ProjectionBuilder::new(&source, &target, &registry)
            .unwrap()
            .compile()
            .unwrap();

        assert_eq!(arguments.get("b"), Some(Some(&Value::I8(2))));
        assert_eq!(arguments.get("n"), Some(None));
        assert!(!arguments.contains("missing"));
    }

    #[test]
    fn unregistered_types_fall_back_to_not_implemented() {
        let (source, target, registry) = (source(), target(), TypeConverterRegistry::empty());
        let builder = ProjectionBuilder::new(&source, &target, &registry).unwrap();
        assert!(builder
            .context("b")
            .unwrap()
            .converter()
            .describe()
            .contains("NotImplementedConverter"));

        let err = builder.compile().unwrap_err();
        assert_eq!(err.kind(), ProjectionErrorKind::ConversionFailed);
        assert_eq!(err.parameter(), Some("b"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let (source, target, registry) = (source(), target(), TypeConverterRegistry::with_defaults());
        let mut builder = ProjectionBuilder::new(&source, &target, &registry).unwrap();

        let err = builder.bind_value("zzz", 1i32).err().unwrap();
        assert_eq!(
            err,
            ProjectionError::Configuration(ConfigurationError::UnknownParameter {
                target: "Target".into(),
                name: "zzz".into(),
            })
        );

        let err = builder.bind_attribute("a", "zzz").err().unwrap();
        assert!(matches!(
            err,
            ProjectionError::Configuration(ConfigurationError::UnknownSourceAttribute { .. })
        ));
    }

    #[test]
    fn converter_override_keeps_value() {
        let (source, target, registry) = (source(), target(), TypeConverterRegistry::with_defaults());
        let mut builder = ProjectionBuilder::new(&source, &target, &registry).unwrap();
        builder
            .bind_converter("b", morph_convert::converter_fn(|_: &Value| Ok(Value::I8(-1))))
            .unwrap();

        let context = builder.context("b").unwrap();
        assert_eq!(context.value(), Some(&Value::I64(2)));
        assert_eq!(context.origin(), BindingOrigin::Unconventional);
        assert_eq!(builder.compile().unwrap().get("b"), Some(Some(&Value::I8(-1))));
    }

    #[test]
    fn last_override_wins() {
        let (source, target, registry) = (source(), target(), TypeConverterRegistry::with_defaults());
        let mut builder = ProjectionBuilder::new(&source, &target, &registry).unwrap();
        builder
            .bind_value("a", 10i32)
            .unwrap()
            .bind_with("a", |s: &Record| s.value("a").cloned().unwrap_or(Value::I32(0)))
            .unwrap()
            .bind_optional_with("n", |_: &Record| Some(7i32))
            .unwrap();

        let arguments = builder.compile().unwrap();
        assert_eq!(arguments.get("a"), Some(Some(&Value::I32(1))));
        assert_eq!(arguments.get("n"), Some(Some(&Value::I32(7))));
    }

    #[test]
    fn unnamed_parameters_cannot_be_seeded() {
        let target = RecordShape::new("Positional")
            .required("a", TypeTag::I32)
            .positional(TypeTag::I32)
            .descriptor();
        let (source, registry) = (source(), TypeConverterRegistry::with_defaults());

        let err = ProjectionBuilder::new(&source, &target, &registry).err().unwrap();
        assert_eq!(
            err,
            ProjectionError::Configuration(ConfigurationError::UnnamedParameter {
                target: "Positional".into(),
                position: 1,
            })
        );
    }
}
