//! Package-aware translation resolution.

use std::fmt;
use std::path::Path;
use std::sync::{
    Arc,
    OnceLock,
};

use super::placeholder::replace_placeholders;
use super::{
    CacheProvider,
    FallbackTranslator,
    LocaleProvider,
    MemoryCache,
    ResolvedTranslation,
    ResolverError,
    ResolverState,
    SharedLocale,
};
use crate::config::ResolverConfig;
use crate::input::translation::TranslationValue;
use crate::store::{
    PackageStore,
    RegistrationReport,
};
use crate::types::{
    Replacements,
    TranslationKey,
};

/// Locale used when neither the host nor the configuration provide one.
const LAST_RESORT_LOCALE: &str = "en";

/// Resolves `package::group.item` keys against registered package
/// translations, delegating everything else to the host translator.
///
/// # Lifecycle
///
/// 1. Construct with [`TranslationManager::new`] and register packages
///    (`&mut self`, initialization only).
/// 2. Attach the host translator once with
///    [`TranslationManager::attach_fallback`]. Until then the manager is
///    [`ResolverState::Uninitialized`]: store lookups and locale handling
///    work, delegated operations degrade to the raw key.
/// 3. Share the manager (e.g. behind `Arc`) for lookups.
///
/// # Failure Modes
///
/// | Failure | Behavior |
/// |---------|----------|
/// | Key not found anywhere | `get` returns the raw key |
/// | No fallback attached | error log, raw key / no-op |
/// | Broken translation file | locale skipped at registration |
pub struct TranslationManager {
    /// Resolver settings
    config: ResolverConfig,
    /// Package translations
    store: PackageStore,
    /// Memoizes resolved values when caching is enabled
    cache: Arc<dyn CacheProvider>,
    /// Process-wide current locale
    locale: Arc<dyn LocaleProvider>,
    /// Host translator, set once after construction
    fallback: OnceLock<Arc<dyn FallbackTranslator>>,
}

impl fmt::Debug for TranslationManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationManager")
            .field("config", &self.config)
            .field("store", &self.store)
            .field("cache", &"<dyn CacheProvider>")
            .field("locale", &"<dyn LocaleProvider>")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl TranslationManager {
    /// Creates a manager with an in-memory cache and locale holder.
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        tracing::debug!(
            cache_enabled = config.cache_enabled,
            default_locale = %config.default_locale,
            "TranslationManager instantiated"
        );
        Self {
            config,
            store: PackageStore::new(),
            cache: Arc::new(MemoryCache::new()),
            locale: Arc::new(SharedLocale::new()),
            fallback: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn CacheProvider>) -> Self {
        self.cache = cache;
        self
    }

    #[must_use]
    pub fn with_locale_provider(mut self, locale: Arc<dyn LocaleProvider>) -> Self {
        self.locale = locale;
        self
    }

    /// Attaches the host translator.
    ///
    /// # Errors
    /// Returns [`ResolverError::FallbackAlreadyAttached`] if a translator was
    /// attached before; the first one stays in place.
    pub fn attach_fallback(
        &self,
        translator: Arc<dyn FallbackTranslator>,
    ) -> Result<(), ResolverError> {
        self.fallback.set(translator).map_err(|_| {
            tracing::warn!("Fallback translator already attached; ignoring the new one");
            ResolverError::FallbackAlreadyAttached
        })?;
        tracing::debug!("Fallback translator attached");
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> ResolverState {
        if self.fallback.get().is_some() {
            ResolverState::Attached
        } else {
            ResolverState::Uninitialized
        }
    }

    /// Registers translation files of `package` found under `base_lang_path`.
    pub fn register_package_translations(
        &mut self,
        package: &str,
        base_lang_path: &Path,
    ) -> RegistrationReport {
        self.store.register(package, base_lang_path)
    }

    /// Registers every package listed in the configuration.
    pub fn register_configured_packages(&mut self) -> Vec<RegistrationReport> {
        self.config
            .packages
            .iter()
            .map(|source| self.store.register(&source.name, &source.path))
            .collect()
    }

    /// Translates `key`, returning the key itself when no translation exists.
    ///
    /// Groups of translations are returned as compact JSON.
    #[must_use]
    pub fn get(&self, key: &str, replacements: &Replacements, locale: Option<&str>) -> String {
        tracing::debug!(key, ?locale, "Translation requested");
        let translation = self
            .get_resolved(key, replacements, locale)
            .map_or_else(|| key.to_string(), |resolved| resolved.to_string());
        tracing::debug!(key, translation = %translation, "Translation resolved");
        translation
    }

    /// Like [`TranslationManager::get`] without string coercion; `None` on a miss.
    #[must_use]
    pub fn get_resolved(
        &self,
        key: &str,
        replacements: &Replacements,
        locale: Option<&str>,
    ) -> Option<ResolvedTranslation> {
        let parsed = TranslationKey::parse(key);
        let locale = locale.map_or_else(|| self.get_locale(), str::to_string);

        match self.resolve(&parsed, replacements, &locale) {
            ResolvedTranslation::Missing(_) => None,
            resolved => Some(resolved),
        }
    }

    /// Translates `key` with a plural form chosen by the host translator.
    #[must_use]
    pub fn choice(
        &self,
        key: &str,
        number: i64,
        replacements: &Replacements,
        locale: Option<&str>,
    ) -> String {
        let Some(fallback) = self.fallback.get() else {
            tracing::error!(key, "choice() called but no fallback translator is attached");
            return key.to_string();
        };

        let locale = locale.map_or_else(|| self.get_locale(), str::to_string);
        tracing::debug!(key, number, "Delegating choice() to the fallback translator");
        fallback.choice(key, number, replacements, &locale)
    }

    /// Current locale: host-set, else configured default, else `en`.
    #[must_use]
    pub fn get_locale(&self) -> String {
        self.locale.current().filter(|locale| !locale.is_empty()).unwrap_or_else(|| {
            if self.config.default_locale.is_empty() {
                LAST_RESORT_LOCALE.to_string()
            } else {
                self.config.default_locale.clone()
            }
        })
    }

    /// Sets the current locale. Does nothing if it is already current.
    pub fn set_locale(&self, locale: &str) {
        if self.locale.current().as_deref() != Some(locale) {
            self.locale.set(locale);
            tracing::info!(locale, "Application locale set");
        }
    }

    /// Registers a namespace with the host translator, if it supports namespaces.
    pub fn add_namespace(&self, namespace: &str, hint: &Path) {
        match self.fallback.get().and_then(|fallback| fallback.namespaces()) {
            Some(registry) => {
                tracing::debug!(
                    namespace,
                    hint = %hint.display(),
                    "Delegating add_namespace() to the fallback translator"
                );
                registry.add_namespace(namespace, hint);
            }
            None => {
                tracing::error!(
                    namespace,
                    "add_namespace() called but the fallback translator is unavailable or lacks namespaces"
                );
            }
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &PackageStore {
        &self.store
    }

    #[must_use]
    pub fn fallback_locale(&self) -> &str {
        &self.config.fallback_locale
    }

    /// Runs the fetch procedure, through the cache when enabled.
    ///
    /// A miss computed while no fallback is attached is evicted again, so it
    /// does not outlive the attach.
    fn resolve(
        &self,
        key: &TranslationKey,
        replacements: &Replacements,
        locale: &str,
    ) -> ResolvedTranslation {
        if !self.config.cache_enabled {
            return self.fetch_translation(key, replacements, locale);
        }

        let cache_key = key.cache_key(&self.config.cache_prefix, locale);
        let cached = self
            .cache
            .remember_forever(&cache_key, &mut || self.fetch_translation(key, replacements, locale));

        if cached.is_missing() && self.fallback.get().is_none() {
            tracing::debug!(cache_key = %cache_key, "Evicting miss cached before fallback attach");
            self.cache.forget(&cache_key);
        }

        match cached {
            ResolvedTranslation::Missing(marker) if marker != key.missing_marker() => {
                // `APP::a.b` and `a.b` share a cache key.
                tracing::warn!(
                    cache_key = %cache_key,
                    marker = %marker,
                    "Cached missing marker belongs to another key; resolving without cache"
                );
                self.fetch_translation(key, replacements, locale)
            }
            ResolvedTranslation::Missing(marker) => {
                tracing::debug!(cache_key = %cache_key, "Missing value found in cache");
                ResolvedTranslation::Missing(marker)
            }
            resolved => resolved,
        }
    }

    /// Store first, then the fallback translator.
    fn fetch_translation(
        &self,
        key: &TranslationKey,
        replacements: &Replacements,
        locale: &str,
    ) -> ResolvedTranslation {
        if let Some(package) = key.package_name() {
            if self.store.contains(package, locale) {
                let path = key.store_path();
                if let Some(value) = self.store.lookup(package, locale, &path) {
                    tracing::debug!(package, locale, path = %path, "Found in package store");
                    return match value {
                        TranslationValue::Text(text) => {
                            ResolvedTranslation::Text(replace_placeholders(text, replacements))
                        }
                        group => ResolvedTranslation::from(group),
                    };
                }
                tracing::debug!(package, locale, path = %path, "Not found in package store");
            } else {
                tracing::debug!(package, locale, "No package translations for locale");
            }
        }

        let canonical = key.canonical();
        let Some(fallback) = self.fallback.get() else {
            tracing::error!(
                key = %canonical,
                "Fallback translator unavailable; treating key as missing"
            );
            return ResolvedTranslation::Missing(key.missing_marker());
        };

        tracing::debug!(key = %canonical, locale, "Delegating to the fallback translator");
        let translation = fallback.get(&canonical, replacements, locale);
        if translation == canonical {
            tracing::warn!(key = %canonical, locale, "Fallback translator did not find key");
            ResolvedTranslation::Missing(key.missing_marker())
        } else {
            ResolvedTranslation::Text(translation)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::test_utils::{
        StubFallback,
        replacements,
    };

    fn shop_entries() -> BTreeMap<String, TranslationValue> {
        let tree = TranslationValue::from(serde_json::json!({
            "cart": {
                "empty": "Your cart is empty",
                "count": "You have :count items",
                "blank": ""
            },
            "title": "Shop"
        }));
        match tree {
            TranslationValue::Group(entries) => entries,
            _ => unreachable!(),
        }
    }

    fn manager(cache_enabled: bool) -> TranslationManager {
        let mut manager =
            TranslationManager::new(ResolverConfig { cache_enabled, ..ResolverConfig::default() });
        manager.store.insert("shop", "en", shop_entries());
        manager
    }

    fn attach(manager: &TranslationManager, fallback: StubFallback) -> Arc<StubFallback> {
        let fallback = Arc::new(fallback);
        manager.attach_fallback(fallback.clone()).unwrap();
        fallback
    }

    #[rstest]
    #[case::store_hit("shop::cart.empty", "Your cart is empty")]
    #[case::store_top_level("shop::title", "Shop")]
    #[case::store_miss_without_fallback("shop::cart.missing", "shop::cart.missing")]
    #[case::unknown_package("blog::post.title", "blog::post.title")]
    #[case::no_package("greeting", "greeting")]
    fn get_without_fallback(#[case] key: &str, #[case] expected: &str) {
        let manager = manager(false);

        assert_that!(manager.state(), eq(ResolverState::Uninitialized));
        assert_that!(manager.get(key, &Replacements::new(), Some("en")), eq(expected));
    }

    #[rstest]
    fn get_returns_empty_translation_not_key() {
        let manager = manager(true);
        attach(&manager, StubFallback::new(&[]));

        assert_that!(manager.get("shop::cart.blank", &Replacements::new(), Some("en")), eq(""));
        assert_that!(manager.get("shop::cart.blank", &Replacements::new(), Some("en")), eq(""));
    }

    #[rstest]
    fn get_applies_placeholders_to_store_hits() {
        let manager = manager(false);

        let result = manager.get("shop::cart.count", &replacements(&[("count", "3")]), Some("en"));

        assert_that!(result, eq("You have 3 items"));
    }

    #[rstest]
    fn get_returns_group_as_json() {
        let manager = manager(false);

        let resolved = manager.get_resolved("shop::cart", &Replacements::new(), Some("en"));

        assert!(matches!(resolved, Some(ResolvedTranslation::Group(_))));
        assert_that!(
            manager.get("shop::cart", &Replacements::new(), Some("en")),
            eq(r#"{"blank":"","count":"You have :count items","empty":"Your cart is empty"}"#)
        );
    }

    #[rstest]
    fn get_falls_back_with_canonical_key() {
        let manager = manager(false);
        let fallback = attach(
            &manager,
            StubFallback::new(&[("shop::cart.checkout", "Checkout"), ("auth.failed", "Failed")]),
        );

        assert_that!(manager.get("shop::cart.checkout", &Replacements::new(), Some("en")), eq("Checkout"));
        assert_that!(manager.get("auth.failed", &Replacements::new(), Some("en")), eq("Failed"));
        assert_that!(manager.get("auth.unknown", &Replacements::new(), Some("en")), eq("auth.unknown"));
        assert_that!(fallback.get_count(), eq(3));
    }

    #[rstest]
    fn get_falls_back_for_unloaded_locale() {
        let manager = manager(false);
        attach(&manager, StubFallback::new(&[("shop::cart.empty", "Carrello vuoto")]));

        let result = manager.get("shop::cart.empty", &Replacements::new(), Some("it"));

        assert_that!(result, eq("Carrello vuoto"));
    }

    #[rstest]
    fn get_delegates_placeholders_to_fallback() {
        let manager = manager(false);
        attach(&manager, StubFallback::new(&[("greeting", "Hello :name")]));

        let result = manager.get("greeting", &replacements(&[("name", "Ann")]), Some("en"));

        assert_that!(result, eq("Hello :name"));
    }

    #[rstest]
    fn get_with_substituting_fallback() {
        let manager = manager(false);
        attach(&manager, StubFallback::new(&[("greeting", "Hello :name")]).substituting());

        let result = manager.get("greeting", &replacements(&[("name", "Ann")]), Some("en"));

        assert_that!(result, eq("Hello Ann"));
    }

    #[rstest]
    fn get_with_cache_fetches_once() {
        let manager = manager(true);
        let fallback = attach(&manager, StubFallback::new(&[("greeting", "Hello")]));

        let first = manager.get("greeting", &Replacements::new(), Some("en"));
        let second = manager.get("greeting", &Replacements::new(), Some("en"));

        assert_that!(first, eq("Hello"));
        assert_that!(second, eq("Hello"));
        assert_that!(fallback.get_count(), eq(1));
    }

    #[rstest]
    fn get_with_cache_remembers_missing_keys() {
        let manager = manager(true);
        let fallback = attach(&manager, StubFallback::new(&[]));

        let first = manager.get("auth.unknown", &Replacements::new(), Some("en"));
        let second = manager.get("auth.unknown", &Replacements::new(), Some("en"));

        assert_that!(first, eq("auth.unknown"));
        assert_that!(second, eq("auth.unknown"));
        assert_that!(fallback.get_count(), eq(1));
    }

    #[rstest]
    fn get_without_cache_fetches_every_time() {
        let manager = manager(false);
        let fallback = attach(&manager, StubFallback::new(&[("greeting", "Hello")]));

        let _ = manager.get("greeting", &Replacements::new(), Some("en"));
        let _ = manager.get("greeting", &Replacements::new(), Some("en"));

        assert_that!(fallback.get_count(), eq(2));
    }

    #[rstest]
    fn get_uses_cache_key_layout() {
        let cache = Arc::new(MemoryCache::new());
        let manager = manager(true).with_cache(cache.clone());
        attach(&manager, StubFallback::new(&[]));

        let _ = manager.get("shop::cart.empty", &Replacements::new(), Some("en"));
        let _ = manager.get("greeting", &Replacements::new(), Some("en"));

        assert_eq!(
            cache.get("utm_translations.en.shop.cart.empty"),
            Some(ResolvedTranslation::Text("Your cart is empty".to_string()))
        );
        assert_eq!(
            cache.get("utm_translations.en.APP..greeting"),
            Some(ResolvedTranslation::Missing(TranslationKey::parse("greeting").missing_marker()))
        );
    }

    #[rstest]
    fn get_recovers_from_foreign_missing_marker() {
        let manager = manager(true);
        let fallback = attach(&manager, StubFallback::new(&[("auth.failed", "Failed")]));

        // Both keys map to `utm_translations.en.APP.auth.failed`.
        let shadowing = manager.get("APP::auth.failed", &Replacements::new(), Some("en"));
        let actual = manager.get("auth.failed", &Replacements::new(), Some("en"));

        assert_that!(shadowing, eq("APP::auth.failed"));
        assert_that!(actual, eq("Failed"));
        assert_that!(fallback.get_count(), eq(2));
    }

    #[rstest]
    fn get_does_not_keep_misses_from_before_attach() {
        let cache = Arc::new(MemoryCache::new());
        let manager = manager(true).with_cache(cache.clone());

        let before = manager.get("greeting", &Replacements::new(), Some("en"));
        assert_that!(cache.len(), eq(0));

        attach(&manager, StubFallback::new(&[("greeting", "Hello")]));
        let after = manager.get("greeting", &Replacements::new(), Some("en"));

        assert_that!(before, eq("greeting"));
        assert_that!(after, eq("Hello"));
        assert_that!(cache.len(), eq(1));
    }

    #[rstest]
    fn get_caches_store_hits_before_attach() {
        let cache = Arc::new(MemoryCache::new());
        let manager = manager(true).with_cache(cache.clone());

        let first = manager.get("shop::title", &Replacements::new(), Some("en"));
        let second = manager.get("shop::title", &Replacements::new(), Some("en"));

        assert_that!(manager.state(), eq(ResolverState::Uninitialized));
        assert_that!(first, eq("Shop"));
        assert_that!(second, eq("Shop"));
        assert_that!(cache.len(), eq(1));
        assert_eq!(
            cache.get("utm_translations.en.shop..title"),
            Some(ResolvedTranslation::Text("Shop".to_string()))
        );
    }

    #[rstest]
    fn attach_fallback_only_once() {
        let manager = manager(false);
        attach(&manager, StubFallback::new(&[("greeting", "first")]));

        let result = manager.attach_fallback(Arc::new(StubFallback::new(&[("greeting", "second")])));

        assert_eq!(result, Err(ResolverError::FallbackAlreadyAttached));
        assert_that!(manager.state(), eq(ResolverState::Attached));
        assert_that!(manager.get("greeting", &Replacements::new(), Some("en")), eq("first"));
    }

    #[rstest]
    fn choice_delegates_to_fallback() {
        let manager = manager(false);
        let fallback = attach(&manager, StubFallback::new(&[]));

        let result = manager.choice("cart.items", 3, &Replacements::new(), None);

        assert_that!(result, eq("cart.items#3"));
        assert_that!(fallback.choice_calls.load(std::sync::atomic::Ordering::SeqCst), eq(1));
    }

    #[rstest]
    fn choice_without_fallback_returns_key() {
        let manager = manager(false);

        assert_that!(manager.choice("cart.items", 3, &Replacements::new(), None), eq("cart.items"));
    }

    fn shop_entries_with_title(title: &str) -> BTreeMap<String, TranslationValue> {
        BTreeMap::from([("title".to_string(), TranslationValue::Text(title.to_string()))])
    }

    #[rstest]
    fn locale_precedence() {
        let mut manager = TranslationManager::new(ResolverConfig {
            default_locale: "it".to_string(),
            ..ResolverConfig::default()
        });
        manager.store.insert("shop", "it", shop_entries_with_title("Negozio"));
        manager.store.insert("shop", "fr", shop_entries_with_title("Boutique"));
        manager.store.insert("shop", "de", shop_entries_with_title("Laden"));

        assert_that!(manager.get_locale(), eq("it"));
        assert_that!(manager.get("shop::title", &Replacements::new(), None), eq("Negozio"));

        manager.set_locale("fr");
        assert_that!(manager.get_locale(), eq("fr"));
        assert_that!(manager.get("shop::title", &Replacements::new(), None), eq("Boutique"));
        assert_that!(manager.get("shop::title", &Replacements::new(), Some("de")), eq("Laden"));
    }

    #[rstest]
    fn get_locale_last_resort() {
        let manager = TranslationManager::new(ResolverConfig {
            default_locale: String::new(),
            ..ResolverConfig::default()
        });

        assert_that!(manager.get_locale(), eq("en"));
    }

    #[rstest]
    fn set_locale_is_idempotent() {
        let locale = Arc::new(SharedLocale::new());
        let manager = manager(false).with_locale_provider(locale.clone());

        manager.set_locale("it");
        manager.set_locale("it");

        assert_that!(locale.current(), some(eq("it")));
        assert_that!(manager.get_locale(), eq("it"));
    }

    #[rstest]
    fn add_namespace_delegates_when_supported() {
        let manager = manager(false);
        let fallback = attach(&manager, StubFallback::new(&[]).namespaced());

        manager.add_namespace("blog", Path::new("/vendor/blog/lang"));

        let namespaces = fallback.namespaces.lock().clone();
        assert_eq!(namespaces, vec![("blog".to_string(), "/vendor/blog/lang".to_string())]);
    }

    #[rstest]
    fn add_namespace_is_noop_without_capability() {
        let manager = manager(false);
        manager.add_namespace("blog", Path::new("/vendor/blog/lang"));

        let fallback = attach(&manager, StubFallback::new(&[]));
        manager.add_namespace("blog", Path::new("/vendor/blog/lang"));

        assert!(fallback.namespaces.lock().is_empty());
    }
}
