use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::types::PACKAGE_SEPARATOR;

/// Environment variable providing the default locale.
pub const ENV_DEFAULT_LOCALE: &str = "APP_LOCALE";
/// Environment variable providing the fallback locale.
pub const ENV_FALLBACK_LOCALE: &str = "APP_FALLBACK_LOCALE";
/// Environment variable enabling the translation cache.
pub const ENV_CACHE_ENABLED: &str = "TRANSLATION_CACHE_ENABLED";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "packages[0].name")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Resolver settings.
///
/// Fields missing from a configuration file take their values from the
/// environment (see [`ResolverConfig::from_env`]).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default = "ResolverConfig::from_env")]
pub struct ResolverConfig {
    /// Locale used when neither the caller nor the host set one.
    pub default_locale: String,

    /// Locale the host translator falls back to. Exposed for hosts; the
    /// resolver itself does not retry lookups with it.
    pub fallback_locale: String,

    /// Memoize resolved translations through the cache provider.
    pub cache_enabled: bool,

    /// First segment of every cache key.
    pub cache_prefix: String,

    /// Packages registered by `TranslationManager::register_configured_packages`.
    pub packages: Vec<PackageSource>,
}

/// A package and the language directory its translations live in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PackageSource {
    pub name: String,
    /// Relative paths are resolved against the configuration directory.
    pub path: PathBuf,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            fallback_locale: "en".to_string(),
            cache_enabled: false,
            cache_prefix: "utm_translations".to_string(),
            packages: Vec::new(),
        }
    }
}

impl ResolverConfig {
    /// Defaults derived from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Defaults derived from `lookup`, which maps a variable name to its value.
    ///
    /// `APP_LOCALE` and `APP_FALLBACK_LOCALE` default to `en`;
    /// `TRANSLATION_CACHE_ENABLED` accepts `true`/`1`/`yes`/`on` and defaults
    /// to disabled.
    #[must_use]
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self {
            default_locale: non_empty(ENV_DEFAULT_LOCALE).unwrap_or(defaults.default_locale),
            fallback_locale: non_empty(ENV_FALLBACK_LOCALE).unwrap_or(defaults.fallback_locale),
            cache_enabled: non_empty(ENV_CACHE_ENABLED)
                .map_or(defaults.cache_enabled, |value| parse_flag(&value)),
            ..defaults
        }
    }

    /// # Errors
    /// - Locale is empty
    /// - Cache prefix is empty while caching is enabled
    /// - Package entry has an empty or namespaced name, or an empty path
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.default_locale.trim().is_empty() {
            errors.push(ValidationError::new(
                "defaultLocale",
                "The locale cannot be empty. Example: \"en\"",
            ));
        }

        if self.fallback_locale.trim().is_empty() {
            errors.push(ValidationError::new(
                "fallbackLocale",
                "The locale cannot be empty. Example: \"en\"",
            ));
        }

        if self.cache_enabled && self.cache_prefix.is_empty() {
            errors.push(ValidationError::new(
                "cachePrefix",
                "The prefix cannot be empty while the cache is enabled. Example: \"utm_translations\"",
            ));
        }

        for (index, package) in self.packages.iter().enumerate() {
            if package.name.is_empty() {
                errors.push(ValidationError::new(
                    format!("packages[{index}].name"),
                    "The package name cannot be empty",
                ));
            } else if package.name.contains(PACKAGE_SEPARATOR) {
                errors.push(ValidationError::new(
                    format!("packages[{index}].name"),
                    format!(
                        "The package name '{}' cannot contain '{PACKAGE_SEPARATOR}'",
                        package.name
                    ),
                ));
            }

            if package.path.as_os_str().is_empty() {
                errors.push(ValidationError::new(
                    format!("packages[{index}].path"),
                    "The path cannot be empty. Example: \"lang\"",
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes" | "on" | "(true)")
}
