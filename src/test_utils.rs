//! Test utilities shared by several test modules.
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};

use parking_lot::Mutex;
use serde_json::Value;

use crate::resolver::placeholder::replace_placeholders;
use crate::resolver::{
    FallbackTranslator,
    NamespaceRegistry,
};
use crate::types::Replacements;

/// Write `{base}/{locale}/{package}.json`, creating the locale directory.
pub(crate) fn write_translation_file(base: &Path, locale: &str, package: &str, content: &Value) {
    let dir = base.join(locale);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(format!("{package}.json")), content.to_string()).unwrap();
}

/// Builds a replacement map from pairs.
pub(crate) fn replacements(pairs: &[(&str, &str)]) -> Replacements {
    pairs.iter().map(|(key, value)| ((*key).to_string(), (*value).to_string())).collect()
}

/// Fallback translator backed by a fixed key map that counts its calls.
///
/// Unknown keys are returned unchanged, like a host translator does on a miss.
#[derive(Debug, Default)]
pub(crate) struct StubFallback {
    /// canonical key -> translation
    entries: HashMap<String, String>,
    /// Apply placeholders the way a host translator would.
    substitutes: bool,
    pub get_calls: AtomicUsize,
    pub choice_calls: AtomicUsize,
    /// Namespaces registered through `add_namespace`.
    pub namespaces: Mutex<Vec<(String, String)>>,
    /// Expose the namespace capability.
    pub with_namespaces: bool,
}

impl StubFallback {
    pub(crate) fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
                .collect(),
            ..Self::default()
        }
    }

    pub(crate) fn substituting(mut self) -> Self {
        self.substitutes = true;
        self
    }

    pub(crate) fn namespaced(mut self) -> Self {
        self.with_namespaces = true;
        self
    }

    pub(crate) fn get_count(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }
}

impl FallbackTranslator for StubFallback {
    fn get(&self, key: &str, replacements: &Replacements, _locale: &str) -> String {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        match self.entries.get(key) {
            Some(value) if self.substitutes => replace_placeholders(value, replacements),
            Some(value) => value.clone(),
            None => key.to_string(),
        }
    }

    fn choice(&self, key: &str, number: i64, _replacements: &Replacements, _locale: &str) -> String {
        self.choice_calls.fetch_add(1, Ordering::SeqCst);
        format!("{key}#{number}")
    }

    fn namespaces(&self) -> Option<&dyn NamespaceRegistry> {
        if self.with_namespaces { Some(self) } else { None }
    }
}

impl NamespaceRegistry for StubFallback {
    fn add_namespace(&self, namespace: &str, hint: &Path) {
        self.namespaces.lock().push((namespace.to_string(), hint.display().to_string()));
    }
}
