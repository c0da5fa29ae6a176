//! Package translation table and registration from language directories.

use std::collections::{
    BTreeMap,
    HashMap,
};
use std::path::Path;

use ignore::WalkBuilder;

use super::{
    RegistrationError,
    RegistrationReport,
};
use crate::input::translation::{
    TranslationValue,
    is_locale_dir_name,
    load_translation_file,
    translation_file_path,
};

/// Translations keyed by package, then locale.
///
/// Filled during initialization and never pruned. Registering the same
/// package and locale again merges the top-level keys of the new file over
/// the existing ones.
#[derive(Debug, Clone, Default)]
pub struct PackageStore {
    /// package -> locale -> translation tree (always a `Group`)
    translations: HashMap<String, HashMap<String, TranslationValue>>,
}

impl PackageStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers translation files for a package.
    ///
    /// Scans `base_lang_path` for locale directories (`en`, `en_US`) and
    /// loads `{locale}/{package}.json` from each. Every failure is logged and
    /// recorded in the returned report; none of them abort the remaining
    /// locales.
    pub fn register(&mut self, package: &str, base_lang_path: &Path) -> RegistrationReport {
        let mut report = RegistrationReport::new(package);

        if !base_lang_path.is_dir() {
            let error = RegistrationError::InvalidBasePath {
                package: package.to_string(),
                path: base_lang_path.to_path_buf(),
            };
            tracing::warn!("{error}");
            report.skipped.push(error);
            return report;
        }
        tracing::info!(
            package,
            path = %base_lang_path.display(),
            "Registering package translations"
        );

        let locales = Self::available_locales(base_lang_path);
        if locales.is_empty() {
            let error =
                RegistrationError::NoLocaleDirectories { path: base_lang_path.to_path_buf() };
            tracing::warn!("{error}");
            report.skipped.push(error);
            return report;
        }

        for locale in locales {
            let path = translation_file_path(base_lang_path, &locale, package);
            tracing::debug!(path = %path.display(), "Checking translation file");

            if !path.is_file() {
                let error = RegistrationError::FileNotFound { locale, path };
                tracing::debug!("{error}");
                report.skipped.push(error);
                continue;
            }

            match load_translation_file(&path) {
                Ok(TranslationValue::Group(entries)) => {
                    self.insert(package, &locale, entries);
                    tracing::debug!(package, locale = %locale, "Translations loaded");
                    report.loaded.push(locale);
                }
                Ok(_) => {
                    let error = RegistrationError::NotAMapping { locale, path };
                    tracing::warn!("{error}");
                    report.skipped.push(error);
                }
                Err(source) => {
                    let error = RegistrationError::Load { locale, path, source };
                    tracing::error!("{error}");
                    report.skipped.push(error);
                }
            }
        }

        report
    }

    /// Merges entries into `(package, locale)`, overwriting duplicate top-level keys.
    pub fn insert(
        &mut self,
        package: &str,
        locale: &str,
        entries: BTreeMap<String, TranslationValue>,
    ) {
        self.translations
            .entry(package.to_string())
            .or_default()
            .entry(locale.to_string())
            .or_insert_with(|| TranslationValue::Group(BTreeMap::new()))
            .merge_shallow(TranslationValue::Group(entries));
    }

    /// Looks up a dot path in the tree of `(package, locale)`.
    #[must_use]
    pub fn lookup(&self, package: &str, locale: &str, path: &str) -> Option<&TranslationValue> {
        self.tree(package, locale)?.lookup(path)
    }

    /// Returns the whole tree of `(package, locale)`.
    #[must_use]
    pub fn tree(&self, package: &str, locale: &str) -> Option<&TranslationValue> {
        self.translations.get(package)?.get(locale)
    }

    #[must_use]
    pub fn contains(&self, package: &str, locale: &str) -> bool {
        self.tree(package, locale).is_some()
    }

    /// Registered package names, sorted.
    #[must_use]
    pub fn packages(&self) -> Vec<&str> {
        let mut packages: Vec<&str> = self.translations.keys().map(String::as_str).collect();
        packages.sort_unstable();
        packages
    }

    /// Loaded locales of a package, sorted.
    #[must_use]
    pub fn locales(&self, package: &str) -> Vec<&str> {
        let mut locales: Vec<&str> = self
            .translations
            .get(package)
            .map(|locales| locales.keys().map(String::as_str).collect())
            .unwrap_or_default();
        locales.sort_unstable();
        locales
    }

    /// Immediate, non-hidden subdirectories of `base_lang_path` named like a locale code.
    fn available_locales(base_lang_path: &Path) -> Vec<String> {
        let mut locales = Vec::new();

        for result in WalkBuilder::new(base_lang_path)
            .standard_filters(false)
            .hidden(true)
            .follow_links(true)
            .max_depth(Some(1))
            .sort_by_file_name(|a, b| a.cmp(b))
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read directory entry");
                    continue;
                }
            };

            if entry.depth() != 1 || !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                continue;
            }

            if let Some(name) = entry.file_name().to_str()
                && is_locale_dir_name(name)
            {
                locales.push(name.to_string());
            }
        }

        tracing::debug!(path = %base_lang_path.display(), ?locales, "Languages found");
        locales
    }
}
