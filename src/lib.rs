//! package-i18n-resolver
//!
//! Package-aware translation resolution in front of a host translator.
//!
//! Keys take the form `package::group.item`. Keys of registered packages are
//! answered from translation files loaded into memory; everything else is
//! delegated to a host-provided [`FallbackTranslator`]. Resolved values can
//! be memoized through a [`CacheProvider`].

pub mod config;
pub mod input;
pub mod resolver;
pub mod store;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use config::ResolverConfig;
pub use resolver::{
    CacheProvider,
    FallbackTranslator,
    LocaleProvider,
    TranslationManager,
};
pub use types::{
    Replacements,
    TranslationKey,
};
