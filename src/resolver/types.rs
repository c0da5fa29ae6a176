//! Resolver type definitions.

use std::fmt;

use thiserror::Error;

use crate::input::translation::TranslationValue;
use crate::types::MissingMarker;

/// Result of the fetch procedure, as stored in the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTranslation {
    Text(String),
    /// A nested group or list of translations.
    Group(TranslationValue),
    /// The key exists neither in the store nor in the fallback translator.
    Missing(MissingMarker),
}

impl ResolvedTranslation {
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing(_))
    }
}

impl From<&TranslationValue> for ResolvedTranslation {
    fn from(value: &TranslationValue) -> Self {
        match value {
            TranslationValue::Text(text) => Self::Text(text.clone()),
            group => Self::Group(group.clone()),
        }
    }
}

/// Coerces to a string: text as-is, groups as compact JSON.
impl fmt::Display for ResolvedTranslation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Group(value) => value.fmt(f),
            Self::Missing(marker) => marker.fmt(f),
        }
    }
}

/// Whether a fallback translator has been attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverState {
    /// Only store lookups and locale handling are available.
    Uninitialized,
    Attached,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverError {
    #[error("A fallback translator is already attached")]
    FallbackAlreadyAttached,
}
