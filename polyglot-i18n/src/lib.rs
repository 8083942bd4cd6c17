//! Internationalization support for polyglot sites
//!
//! Provides the pieces a multilingual static site needs at build time:
//!
//! - **Locales**: parse and canonicalise short codes like `it` or `pt-BR`
//! - **Locale settings**: the default locale plus the supported set
//! - **Translation store**: per-locale tables loaded lazily, with fallback
//!   to the default locale and finally to the key itself
//! - **Placeholder rendering**: replace `{{ __('key') }}` in page content
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use polyglot_i18n::{FileLayout, Locale, TranslationStore};
//!
//! let store = TranslationStore::from_dir("resources/lang", FileLayout::Flat, Locale::new("en"));
//!
//! // Reads resources/lang/it.json on first use
//! let msg = store.resolve("greeting", &Locale::new("it"));
//!
//! // Unknown keys come back unchanged
//! assert_eq!(store.resolve("no.such.key", &Locale::new("it")), "no.such.key");
//! ```

mod error;
mod locale;
pub mod render;
mod source;
mod store;

pub use error::I18nError;
pub use locale::{Locale, LocaleSettings};
pub use render::{placeholder_keys, render_placeholders};
pub use source::{FileLayout, FileSource, MemorySource, TranslationSource, TranslationTable};
pub use store::TranslationStore;

/// Result type for i18n operations
pub type Result<T> = std::result::Result<T, I18nError>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        FileLayout, I18nError, Locale, LocaleSettings, Result, TranslationSource,
        TranslationStore, TranslationTable,
    };
}
