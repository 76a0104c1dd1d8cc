//! Projection configuration
//!
//! Serializable so hosts can load it with whatever loader they use.

use morph_convert::TypeConverterRegistry;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Which converter registry a configured projection starts from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryPreset {
    /// The shared registry with every built-in scalar converter
    #[default]
    Default,
    /// No converters; only identical types and explicit overrides project
    Empty,
}

impl RegistryPreset {
    /// Materialize the preset
    #[must_use]
    pub fn registry(self) -> Cow<'static, TypeConverterRegistry> {
        match self {
            Self::Default => Cow::Borrowed(TypeConverterRegistry::shared()),
            Self::Empty => Cow::Owned(TypeConverterRegistry::empty()),
        }
    }
}

/// Projection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Registry preset
    pub registry: RegistryPreset,
    /// Emit a trace event for every seeded binding
    pub log_bindings: bool,
}

impl ProjectionConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With registry preset
    #[inline]
    #[must_use]
    pub fn with_registry(mut self, registry: RegistryPreset) -> Self {
        self.registry = registry;
        self
    }

    /// With per-binding trace events
    #[inline]
    #[must_use]
    pub fn with_log_bindings(mut self, log_bindings: bool) -> Self {
        self.log_bindings = log_bindings;
        self
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            registry: RegistryPreset::Default,
            log_bindings: false,
        }
    }
}
