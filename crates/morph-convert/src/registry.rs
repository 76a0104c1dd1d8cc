//! Type converter registry
//!
//! Provides [`TypeConverterRegistry`], the mapping from target [`TypeTag`]
//! to converter factory consulted when seeding conventional bindings.

use crate::converter::{SharedConverter, TypeConverter};
use crate::converters::{
    BigIntConverter, BoolConverter, CharConverter, DecimalConverter, F32Converter, F64Converter,
    I16Converter, I32Converter, I64Converter, I8Converter, StringConverter, UuidConverter,
};
use crate::error::RegistryError;
use crate::type_tag::{TypeTag, Typed};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Factory producing a fresh converter instance
pub type ConverterFactory = Arc<dyn Fn() -> SharedConverter + Send + Sync>;

static DEFAULT_REGISTRY: Lazy<TypeConverterRegistry> = Lazy::new(TypeConverterRegistry::with_defaults);

/// Registry of converter factories keyed by target type
///
/// Registries are configured up front and only read afterwards. Cloning is
/// cheap (factories are shared) and registering an already-present tag
/// replaces the earlier factory.
///
/// # Example
///
/// ```rust,ignore
/// let registry = TypeConverterRegistry::with_defaults()
///     .register(TypeTag::BigInt, || converter_fn(uuid_to_bigint));
///
/// let converter = registry.get(&TypeTag::BigInt)?;
/// ```
#[derive(Clone, Default)]
pub struct TypeConverterRegistry {
    factories: HashMap<TypeTag, ConverterFactory>,
}

impl TypeConverterRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Create registry with the built-in scalar converters
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::empty()
            .with_converter::<BoolConverter>()
            .with_converter::<I8Converter>()
            .with_converter::<I16Converter>()
            .with_converter::<I32Converter>()
            .with_converter::<I64Converter>()
            .with_converter::<BigIntConverter>()
            .with_converter::<F32Converter>()
            .with_converter::<F64Converter>()
            .with_converter::<DecimalConverter>()
            .with_converter::<CharConverter>()
            .with_converter::<StringConverter>()
            .with_converter::<UuidConverter>()
    }

    /// Process-wide default registry, built on first use
    #[inline]
    #[must_use]
    pub fn shared() -> &'static Self {
        &DEFAULT_REGISTRY
    }

    /// Register a converter factory for the tag
    #[must_use]
    pub fn register<F, C>(mut self, tag: TypeTag, factory: F) -> Self
    where
        F: Fn() -> C + Send + Sync + 'static,
        C: TypeConverter + 'static,
    {
        self.insert(tag, factory);
        self
    }

    /// Register a default-constructed converter under its output's tag
    #[must_use]
    pub fn with_converter<C>(self) -> Self
    where
        C: TypeConverter + Default + 'static,
        C::Output: Typed,
    {
        self.register(<C::Output as Typed>::type_tag(), C::default)
    }

    /// Register a converter factory for the tag in place
    pub fn insert<F, C>(&mut self, tag: TypeTag, factory: F)
    where
        F: Fn() -> C + Send + Sync + 'static,
        C: TypeConverter + 'static,
    {
        tracing::trace!("Registering type converter for {}", tag);
        let factory: ConverterFactory = Arc::new(move || -> SharedConverter { Arc::new(factory()) });
        self.factories.insert(tag, factory);
    }

    /// Get a converter for the tag
    ///
    /// # Errors
    /// Returns [`RegistryError::NotRegistered`] if no factory exists
    pub fn get(&self, tag: &TypeTag) -> Result<SharedConverter, RegistryError> {
        self.get_or_none(tag)
            .ok_or_else(|| RegistryError::NotRegistered { tag: tag.clone() })
    }

    /// Get a converter for the tag, if registered
    #[inline]
    #[must_use]
    pub fn get_or_none(&self, tag: &TypeTag) -> Option<SharedConverter> {
        self.factories.get(tag).map(|factory| factory())
    }

    /// Check if a factory exists for the tag
    #[inline]
    #[must_use]
    pub fn contains(&self, tag: &TypeTag) -> bool {
        self.factories.contains_key(tag)
    }

    /// Get number of registered tags
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Registered tags, sorted
    #[must_use]
    pub fn tags(&self) -> Vec<&TypeTag> {
        let mut tags: Vec<_> = self.factories.keys().collect();
        tags.sort();
        tags
    }
}

impl fmt::Debug for TypeConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeConverterRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::converter_fn;
    use crate::error::ConversionError;
    use crate::value::Value;
    use num_bigint::BigInt;

    #[test]
    fn defaults_cover_every_scalar() {
        let registry = TypeConverterRegistry::with_defaults();
        assert_eq!(registry.len(), 12);
        for tag in [
            TypeTag::Bool,
            TypeTag::I8,
            TypeTag::I16,
            TypeTag::I32,
            TypeTag::I64,
            TypeTag::BigInt,
            TypeTag::F32,
            TypeTag::F64,
            TypeTag::Decimal,
            TypeTag::Char,
            TypeTag::String,
            TypeTag::Uuid,
        ] {
            assert!(registry.contains(&tag), "missing {tag}");
        }
    }

    #[test]
    fn empty_registry() {
        let registry = TypeConverterRegistry::empty();
        assert!(registry.is_empty());
        assert!(registry.get_or_none(&TypeTag::I32).is_none());
        assert_eq!(
            registry.get(&TypeTag::I32).unwrap_err(),
            RegistryError::NotRegistered { tag: TypeTag::I32 }
        );
    }

    #[test]
    fn register_then_get() {
        let registry = TypeConverterRegistry::empty().register(TypeTag::BigInt, || {
            converter_fn(|value: &Value| match value {
                Value::I32(v) => Ok(BigInt::from(*v) * 2),
                other => Err(ConversionError::unsupported(other, &TypeTag::BigInt)),
            })
        });

        let converter = registry.get(&TypeTag::BigInt).unwrap();
        assert_eq!(
            converter.convert_value(&Value::I32(5)),
            Ok(Value::BigInt(BigInt::from(10)))
        );
    }

    #[test]
    fn last_registration_wins() {
        let registry = TypeConverterRegistry::with_defaults()
            .register(TypeTag::I32, || converter_fn(|_: &Value| Ok(7i32)));

        let converter = registry.get(&TypeTag::I32).unwrap();
        assert_eq!(converter.convert_value(&Value::I32(1)), Ok(Value::I32(7)));
        assert_eq!(registry.len(), 12);
    }

    #[test]
    fn shared_registry_is_the_default() {
        let shared = TypeConverterRegistry::shared();
        assert_eq!(shared.tags(), TypeConverterRegistry::with_defaults().tags());
        assert!(format!("{shared:?}").contains("Uuid"));
    }
}
