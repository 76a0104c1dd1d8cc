//! Projection orchestration
//!
//! [`Projection`] runs one projection end to end: seed the builder, apply
//! the caller's overrides, compile, construct. The free functions
//! [`project`] and [`project_with`] and the [`Projector`] trait are thin
//! conveniences over it.

use crate::builder::ProjectionBuilder;
use crate::config::ProjectionConfig;
use crate::error::{ConstructError, ProjectionError};
use crate::shape::{Constructible, Projectable, TargetDescriptor};
use morph_convert::TypeConverterRegistry;
use std::borrow::Cow;

/// A configured projection onto `R`
///
/// # Example
///
/// ```rust,ignore
/// let target: Target = Projection::new()
///     .registry(&registry)
///     .project_with(&source, |builder| {
///         builder.bind_with(Target::FULL_NAME, |s: &Source| s.full_name())?;
///         Ok(())
///     })?;
/// ```
pub struct Projection<'r, R> {
    descriptor: TargetDescriptor<R>,
    registry: Cow<'r, TypeConverterRegistry>,
    log_bindings: bool,
}

impl<R: Constructible> Projection<'static, R> {
    /// Projection onto `R` using the shared default registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_descriptor(R::descriptor())
    }

    /// Projection onto `R` honouring the configuration
    #[must_use]
    pub fn from_config(config: &ProjectionConfig) -> Self {
        Self::new()
            .with_registry(config.registry.registry())
            .log_bindings(config.log_bindings)
    }
}

impl<R: Constructible> Default for Projection<'static, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Projection<'static, R> {
    /// Projection using an explicit descriptor and the shared default registry
    #[must_use]
    pub fn with_descriptor(descriptor: TargetDescriptor<R>) -> Self {
        Self {
            descriptor,
            registry: Cow::Borrowed(TypeConverterRegistry::shared()),
            log_bindings: false,
        }
    }
}

impl<'r, R> Projection<'r, R> {
    /// With a borrowed registry
    #[inline]
    #[must_use]
    pub fn registry<'n>(self, registry: &'n TypeConverterRegistry) -> Projection<'n, R> {
        self.with_registry(Cow::Borrowed(registry))
    }

    /// With a borrowed or owned registry
    #[inline]
    #[must_use]
    pub fn with_registry<'n>(self, registry: Cow<'n, TypeConverterRegistry>) -> Projection<'n, R> {
        Projection {
            descriptor: self.descriptor,
            registry,
            log_bindings: self.log_bindings,
        }
    }

    /// With per-binding trace events
    #[inline]
    #[must_use]
    pub fn log_bindings(mut self, log_bindings: bool) -> Self {
        self.log_bindings = log_bindings;
        self
    }

    /// Target descriptor
    #[inline]
    #[must_use]
    pub fn descriptor(&self) -> &TargetDescriptor<R> {
        &self.descriptor
    }

    /// Project by convention only
    ///
    /// # Errors
    /// Returns [`ProjectionError`] if any binding fails to resolve or the
    /// target cannot be constructed
    pub fn project<S: Projectable + ?Sized>(&self, subject: &S) -> Result<R, ProjectionError> {
        self.project_with(subject, |_| Ok(()))
    }

    /// Project, letting `configure` override bindings before compilation
    ///
    /// Errors from compilation and nested projections propagate unchanged;
    /// other constructor failures are wrapped in
    /// [`ProjectionError::ConstructionFailed`].
    ///
    /// # Errors
    /// Returns [`ProjectionError`] if seeding, an override, compilation or
    /// construction fails
    pub fn project_with<S, F>(&self, subject: &S, configure: F) -> Result<R, ProjectionError>
    where
        S: Projectable + ?Sized,
        F: FnOnce(&mut ProjectionBuilder<'_, S, R>) -> Result<(), ProjectionError>,
    {
        let target = self.descriptor.name();
        tracing::debug!("Projecting {} onto {}", subject.shape_name(), target);

        let mut builder =
            ProjectionBuilder::seeded(subject, &self.descriptor, &self.registry, self.log_bindings)?;
        configure(&mut builder)?;
        let arguments = builder.compile().map_err(|err| {
            tracing::debug!("Projection onto {} failed: {}", target, err);
            err
        })?;

        match self.descriptor.construct(arguments) {
            Ok(instance) => {
                tracing::debug!("Projected {} onto {}", subject.shape_name(), target);
                Ok(instance)
            }
            Err(ConstructError::Projection(inner)) => {
                tracing::debug!("Nested projection into {} failed: {}", target, inner);
                Err(*inner)
            }
            Err(source) => {
                tracing::debug!("Constructing {} failed: {}", target, source);
                Err(ProjectionError::ConstructionFailed {
                    target: target.to_owned(),
                    source,
                })
            }
        }
    }
}

/// Project `subject` onto `R` by convention, with the default registry
///
/// # Errors
/// See [`Projection::project`]
pub fn project<R, S>(subject: &S) -> Result<R, ProjectionError>
where
    R: Constructible,
    S: Projectable + ?Sized,
{
    Projection::<R>::new().project(subject)
}

/// Project `subject` onto `R` with overrides, with the default registry
///
/// # Errors
/// See [`Projection::project_with`]
pub fn project_with<S, R, F>(subject: &S, configure: F) -> Result<R, ProjectionError>
where
    S: Projectable + ?Sized,
    R: Constructible,
    F: FnOnce(&mut ProjectionBuilder<'_, S, R>) -> Result<(), ProjectionError>,
{
    Projection::<R>::new().project_with(subject, configure)
}

/// A reusable, named projection from `Source` to `Target`
///
/// # Example
///
/// ```rust,ignore
/// struct SourceToTarget;
///
/// impl Projector for SourceToTarget {
///     type Source = Source;
///     type Target = Target;
///
///     fn configure(&self, builder: &mut ProjectionBuilder<'_, Source, Target>) -> Result<(), ProjectionError> {
///         builder.bind_attribute("b", "a")?;
///         Ok(())
///     }
/// }
///
/// let target = SourceToTarget.project(&source)?;
/// ```
pub trait Projector {
    /// Source shape
    type Source: Projectable;
    /// Target shape
    type Target: Constructible;

    /// Override bindings before compilation
    ///
    /// # Errors
    /// Propagates override failures
    fn configure(
        &self,
        builder: &mut ProjectionBuilder<'_, Self::Source, Self::Target>,
    ) -> Result<(), ProjectionError> {
        let _ = builder;
        Ok(())
    }

    /// Registry used for conventional bindings
    fn registry(&self) -> &TypeConverterRegistry {
        TypeConverterRegistry::shared()
    }

    /// Project the subject
    ///
    /// # Errors
    /// See [`Projection::project_with`]
    fn project(&self, subject: &Self::Source) -> Result<Self::Target, ProjectionError> {
        Projection::<Self::Target>::new()
            .registry(self.registry())
            .project_with(subject, |builder| self.configure(builder))
    }
}
