//! Cache collaborator for resolved translations.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::ResolvedTranslation;

/// Get-or-compute cache with forever retention.
///
/// Implementations own their synchronization. The resolver treats
/// `remember_forever` as a blocking call with no timeout.
pub trait CacheProvider: Send + Sync {
    /// Returns the value stored under `key`, computing and storing it first if absent.
    fn remember_forever(
        &self,
        key: &str,
        compute: &mut dyn FnMut() -> ResolvedTranslation,
    ) -> ResolvedTranslation;

    /// Evicts one entry. Returns true if it existed.
    fn forget(&self, key: &str) -> bool;

    /// Evicts every entry.
    fn flush(&self);
}

/// Process-local cache. Entries live until evicted explicitly.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, ResolvedTranslation>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<ResolvedTranslation> {
        self.entries.read().get(key).cloned()
    }
}

impl CacheProvider for MemoryCache {
    fn remember_forever(
        &self,
        key: &str,
        compute: &mut dyn FnMut() -> ResolvedTranslation,
    ) -> ResolvedTranslation {
        if let Some(value) = self.get(key) {
            tracing::trace!(key, "Cache hit");
            return value;
        }

        // Compute outside the lock; the fetch may call back into the host.
        let value = compute();
        self.entries.write().entry(key.to_string()).or_insert(value).clone()
    }

    fn forget(&self, key: &str) -> bool {
        self.entries.write().remove(key).is_some()
    }

    fn flush(&self) {
        self.entries.write().clear();
    }
}
