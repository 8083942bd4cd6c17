//! Translation sources
//!
//! A source turns a locale into a flat key -> string table. Sources only
//! report what is there: a missing file is `Ok(None)`, never an error.

use crate::{I18nError, Locale, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Flat key -> string mapping for a single locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    entries: HashMap<String, String>,
}

impl TranslationTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document.
    ///
    /// Nested objects flatten to dotted keys, so
    /// `{"posts": {"hello": {"title": "Hi"}}}` yields `posts.hello.title`.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Parse a TOML document with the same flattening rules as JSON.
    pub fn from_toml(source: &str) -> Result<Self> {
        let value: toml::Value = toml::from_str(source)?;
        let value = serde_json::to_value(value)?;
        Self::from_value(value)
    }

    fn from_value(value: serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(map) = value else {
            return Err(I18nError::ParseError(
                "translation document must be an object".to_string(),
            ));
        };

        let mut table = Self::new();
        for (key, value) in map {
            table.flatten(key, value);
        }
        Ok(table)
    }

    fn flatten(&mut self, prefix: String, value: serde_json::Value) {
        match value {
            serde_json::Value::String(s) => {
                self.entries.insert(prefix, s);
            }
            serde_json::Value::Number(n) => {
                self.entries.insert(prefix, n.to_string());
            }
            serde_json::Value::Bool(b) => {
                self.entries.insert(prefix, b.to_string());
            }
            serde_json::Value::Object(obj) => {
                for (key, nested) in obj {
                    self.flatten(format!("{}.{}", prefix, key), nested);
                }
            }
            // Lists and nulls have no single string to show.
            serde_json::Value::Array(_) | serde_json::Value::Null => {}
        }
    }

    /// Add an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Get an entry.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Check if the table has an entry.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get all keys.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TranslationTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

/// Where translation tables come from.
pub trait TranslationSource: Send + Sync {
    /// Read the table for a locale.
    ///
    /// Returns `Ok(None)` when the locale has no translation source at all.
    fn read(&self, locale: &Locale) -> Result<Option<TranslationTable>>;

    /// Human readable description used in log messages.
    fn describe(&self, locale: &Locale) -> String;
}

/// File naming convention inside the translations directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileLayout {
    /// `{dir}/{locale}.json`
    #[default]
    Flat,
    /// `{dir}/{locale}/messages.json`
    Nested,
}

const EXTENSIONS: [&str; 2] = ["json", "toml"];

/// Translation files on disk.
///
/// For each locale the `.json` file is tried first, then `.toml`.
#[derive(Debug, Clone)]
pub struct FileSource {
    dir: PathBuf,
    layout: FileLayout,
}

impl FileSource {
    pub fn new(dir: impl Into<PathBuf>, layout: FileLayout) -> Self {
        Self {
            dir: dir.into(),
            layout,
        }
    }

    /// Directory that holds the translation files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Candidate path for a locale and extension.
    pub fn path_for(&self, locale: &Locale, extension: &str) -> PathBuf {
        match self.layout {
            FileLayout::Flat => self.dir.join(format!("{}.{}", locale.tag(), extension)),
            FileLayout::Nested => self
                .dir
                .join(locale.tag())
                .join(format!("messages.{}", extension)),
        }
    }
}

impl TranslationSource for FileSource {
    fn read(&self, locale: &Locale) -> Result<Option<TranslationTable>> {
        for extension in EXTENSIONS {
            let path = self.path_for(locale, extension);
            if !path.is_file() {
                continue;
            }

            let content = fs::read_to_string(&path)?;
            let table = match extension {
                "toml" => TranslationTable::from_toml(&content),
                _ => TranslationTable::from_json(&content),
            }
            .map_err(|e| I18nError::ParseError(format!("{}: {}", path.display(), e)))?;

            return Ok(Some(table));
        }

        Ok(None)
    }

    fn describe(&self, locale: &Locale) -> String {
        self.path_for(locale, EXTENSIONS[0]).display().to_string()
    }
}

/// In-memory translation tables.
#[derive(Debug, Default)]
pub struct MemorySource {
    tables: RwLock<HashMap<Locale, TranslationTable>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_table(self, locale: Locale, table: TranslationTable) -> Self {
        self.insert(locale, table);
        self
    }

    /// Insert or replace the table for a locale.
    pub fn insert(&self, locale: Locale, table: TranslationTable) {
        self.tables.write().insert(locale, table);
    }
}

impl TranslationSource for MemorySource {
    fn read(&self, locale: &Locale) -> Result<Option<TranslationTable>> {
        Ok(self.tables.read().get(locale).cloned())
    }

    fn describe(&self, locale: &Locale) -> String {
        format!("memory:{}", locale)
    }
}
