//! Core types used throughout the project.

use std::collections::BTreeMap;
use std::fmt;

/// Separator between the package and the rest of a key (`shop::cart.empty`).
pub const PACKAGE_SEPARATOR: &str = "::";

/// Separator between the group and the item (`cart.empty`).
pub const GROUP_SEPARATOR: char = '.';

/// Package segment used in cache keys when the key has no package.
pub const APP_PACKAGE: &str = "APP";

/// Placeholder replacements passed to `get` / `choice`.
///
/// Ordered so substitution is deterministic.
pub type Replacements = BTreeMap<String, String>;

/// A parsed translation key.
///
/// Only the first `::` and the first `.` after it are significant:
/// `pkg::a.b.c` parses to package `pkg`, group `a`, item `b.c`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranslationKey {
    pub package: Option<String>,
    pub group: Option<String>,
    pub item: String,
}

impl TranslationKey {
    /// Splits a raw key into package, group and item. Any string is valid.
    #[must_use]
    pub fn parse(key: &str) -> Self {
        let (package, rest) = match key.split_once(PACKAGE_SEPARATOR) {
            Some((package, rest)) => (Some(package.to_string()), rest),
            None => (None, key),
        };

        let (group, item) = match rest.split_once(GROUP_SEPARATOR) {
            Some((group, item)) => (Some(group.to_string()), item.to_string()),
            None => (None, rest.to_string()),
        };

        tracing::trace!(key, ?package, ?group, item = %item, "Parsed translation key");
        Self { package, group, item }
    }

    /// Package name, treating an empty segment as absent.
    #[must_use]
    pub fn package_name(&self) -> Option<&str> {
        self.package.as_deref().filter(|p| !p.is_empty())
    }

    /// Group name, treating an empty segment as absent.
    #[must_use]
    pub fn group_name(&self) -> Option<&str> {
        self.group.as_deref().filter(|g| !g.is_empty())
    }

    /// Rebuilds the key handed to the fallback translator.
    ///
    /// # Examples
    /// ```
    /// use package_i18n_resolver::types::TranslationKey;
    ///
    /// assert_eq!(TranslationKey::parse("shop::cart.empty").canonical(), "shop::cart.empty");
    /// assert_eq!(TranslationKey::parse("auth.failed").canonical(), "auth.failed");
    /// assert_eq!(TranslationKey::parse("welcome").canonical(), "welcome");
    /// ```
    #[must_use]
    pub fn canonical(&self) -> String {
        let mut key = self
            .package_name()
            .map_or_else(String::new, |package| format!("{package}{PACKAGE_SEPARATOR}"));
        if let Some(group) = self.group_name() {
            key.push_str(group);
            key.push(GROUP_SEPARATOR);
        }
        key.push_str(&self.item);
        key
    }

    /// Path looked up inside a package's translation tree.
    #[must_use]
    pub fn store_path(&self) -> String {
        self.group_name().map_or_else(
            || self.item.clone(),
            |group| format!("{group}{GROUP_SEPARATOR}{}", self.item),
        )
    }

    /// Cache key: `{prefix}.{locale}.{package|APP}.{group}.{item}`.
    #[must_use]
    pub fn cache_key(&self, prefix: &str, locale: &str) -> String {
        format!(
            "{prefix}.{locale}.{}.{}.{}",
            self.package.as_deref().unwrap_or(APP_PACKAGE),
            self.group.as_deref().unwrap_or_default(),
            self.item
        )
    }

    /// Sentinel stored in place of a translation that does not exist.
    #[must_use]
    pub fn missing_marker(&self) -> MissingMarker {
        MissingMarker(format!(
            "@@__MISSING_TRANSLATION__{}::{}.{}__@@",
            self.package.as_deref().unwrap_or_default(),
            self.group.as_deref().unwrap_or_default(),
            self.item
        ))
    }
}

/// Marks a key as genuinely absent, as opposed to translated to `""`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MissingMarker(String);

impl MissingMarker {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MissingMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
