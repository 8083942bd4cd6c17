//! Lazily loaded translation tables with default-locale fallback.

use crate::render;
use crate::source::{FileLayout, FileSource, TranslationSource, TranslationTable};
use crate::{Locale, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Thread-safe translation lookup.
///
/// Each locale's table is read from the source once, on first use, and
/// kept for the lifetime of the store. Lookups never fail: a key that is
/// missing everywhere comes back unchanged.
pub struct TranslationStore {
    source: Arc<dyn TranslationSource>,
    default_locale: Locale,
    tables: Arc<RwLock<HashMap<Locale, Arc<TranslationTable>>>>,
}

impl TranslationStore {
    /// Create a store over any source.
    pub fn new(source: impl TranslationSource + 'static, default_locale: Locale) -> Self {
        Self::with_source(Arc::new(source), default_locale)
    }

    /// Create a store over a shared source.
    pub fn with_source(source: Arc<dyn TranslationSource>, default_locale: Locale) -> Self {
        Self {
            source,
            default_locale,
            tables: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a store reading translation files from a directory.
    pub fn from_dir(dir: impl Into<PathBuf>, layout: FileLayout, default_locale: Locale) -> Self {
        Self::new(FileSource::new(dir, layout), default_locale)
    }

    /// The locale used when a key is missing from the requested one.
    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Load the table for a locale, reading the source at most once.
    ///
    /// A locale without a source yields an empty table. A source that
    /// cannot be parsed is reported here, and an empty table is cached
    /// in its place so later lookups fall back instead of failing.
    pub fn load(&self, locale: &Locale) -> Result<Arc<TranslationTable>> {
        if let Some(table) = self.tables.read().get(locale) {
            return Ok(Arc::clone(table));
        }

        let (table, outcome) = match self.source.read(locale) {
            Ok(Some(table)) => {
                debug!(locale = %locale, entries = table.len(), "Loaded translations");
                (table, Ok(()))
            }
            Ok(None) => {
                warn!(
                    locale = %locale,
                    source = %self.source.describe(locale),
                    "Translation file not found, using empty table"
                );
                (TranslationTable::new(), Ok(()))
            }
            Err(e) => {
                error!(locale = %locale, error = %e, "Failed to load translations");
                (TranslationTable::new(), Err(e))
            }
        };

        let table = Arc::new(table);
        self.tables.write().insert(locale.clone(), Arc::clone(&table));

        outcome.map(|_| table)
    }

    /// Load several locales eagerly.
    ///
    /// Every locale is attempted; the first error is returned.
    pub fn preload<'a>(&self, locales: impl IntoIterator<Item = &'a Locale>) -> Result<()> {
        let mut first_error = None;
        for locale in locales {
            if let Err(e) = self.load(locale) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn table(&self, locale: &Locale) -> Arc<TranslationTable> {
        // load() has already logged and cached an empty table on error.
        self.load(locale).unwrap_or_default()
    }

    /// Look up a key, falling back to the default locale.
    pub fn get(&self, key: &str, locale: &Locale) -> Option<String> {
        if let Some(value) = self.table(locale).get(key) {
            return Some(value.to_string());
        }

        if *locale != self.default_locale {
            if let Some(value) = self.table(&self.default_locale).get(key) {
                return Some(value.to_string());
            }
        }

        None
    }

    /// Translate a key.
    ///
    /// Looks in `locale`, then the default locale, then returns `key`.
    pub fn resolve(&self, key: &str, locale: &Locale) -> String {
        self.get(key, locale).unwrap_or_else(|| key.to_string())
    }

    /// Translate with arguments.
    ///
    /// Replaces `{name}` placeholders with provided values.
    pub fn resolve_with(&self, key: &str, locale: &Locale, args: &[(&str, &str)]) -> String {
        let mut result = self.resolve(key, locale);

        for (name, value) in args {
            let placeholder = format!("{{{}}}", name);
            result = result.replace(&placeholder, value);
        }

        result
    }

    /// Check if a key exists in the locale's own table.
    pub fn has(&self, key: &str, locale: &Locale) -> bool {
        self.table(locale).contains(key)
    }

    /// Replace `{{ __('key') }}` placeholders in content.
    pub fn render(&self, content: &str, locale: &Locale) -> String {
        render::render_placeholders(content, |key| self.resolve(key, locale))
    }

    /// Locales whose tables are cached.
    pub fn loaded_locales(&self) -> Vec<Locale> {
        let mut locales: Vec<Locale> = self.tables.read().keys().cloned().collect();
        locales.sort();
        locales
    }
}

impl Clone for TranslationStore {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            default_locale: self.default_locale.clone(),
            tables: Arc::clone(&self.tables),
        }
    }
}

impl std::fmt::Debug for TranslationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationStore")
            .field("default_locale", &self.default_locale)
            .field("loaded", &self.tables.read().len())
            .finish_non_exhaustive()
    }
}
