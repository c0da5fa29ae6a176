//! Host translator collaborator.

use std::path::Path;

use crate::types::Replacements;

/// Host translator consulted when the package store has no match.
///
/// # Miss signal
///
/// On a miss `get` must return the key it was given, unchanged. The resolver
/// relies on this to tell a missing key from a real translation.
pub trait FallbackTranslator: Send + Sync {
    /// Translates `key`, applying `replacements`.
    fn get(&self, key: &str, replacements: &Replacements, locale: &str) -> String;

    /// Translates `key` choosing the plural form for `number`.
    fn choice(&self, key: &str, number: i64, replacements: &Replacements, locale: &str) -> String;

    /// Optional capability for registering additional namespaces.
    fn namespaces(&self) -> Option<&dyn NamespaceRegistry> {
        None
    }
}

/// Translators that load namespaced translation directories.
pub trait NamespaceRegistry: Send + Sync {
    fn add_namespace(&self, namespace: &str, hint: &Path);
}
