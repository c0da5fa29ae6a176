//! Translation resolution and its collaborators
mod cache;
mod fallback;
mod locale;
mod manager;
pub mod placeholder;
mod types;

pub use cache::{
    CacheProvider,
    MemoryCache,
};
pub use fallback::{
    FallbackTranslator,
    NamespaceRegistry,
};
pub use locale::{
    LocaleProvider,
    SharedLocale,
};
pub use manager::TranslationManager;
pub use types::{
    ResolvedTranslation,
    ResolverError,
    ResolverState,
};
