//! Process-wide current locale.

use parking_lot::RwLock;

/// Holder of the current locale shared by the host application.
pub trait LocaleProvider: Send + Sync {
    /// Current locale, or `None` if the host has not set one.
    fn current(&self) -> Option<String>;

    fn set(&self, locale: &str);
}

/// In-memory [`LocaleProvider`].
#[derive(Debug, Default)]
pub struct SharedLocale {
    current: RwLock<Option<String>>,
}

impl SharedLocale {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `locale` already set.
    #[must_use]
    pub fn with_locale(locale: impl Into<String>) -> Self {
        Self { current: RwLock::new(Some(locale.into())) }
    }
}

impl LocaleProvider for SharedLocale {
    fn current(&self) -> Option<String> {
        self.current.read().clone()
    }

    fn set(&self, locale: &str) {
        *self.current.write() = Some(locale.to_string());
    }
}
