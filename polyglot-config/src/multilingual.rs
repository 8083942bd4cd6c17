//! The `multilingual` configuration section
//!
//! ```toml
//! [multilingual]
//! default_language = "en"
//! supported_languages = ["it", "de"]
//! translations_dir = "resources/lang"
//! collision_policy = "keep_first"
//!
//! [multilingual.content]
//! markdown = "shared"
//!
//! [[multilingual.navigation.custom]]
//! label = "GitHub"
//! destination = "https://github.com/example/site"
//! priority = 90
//! ```
//!
//! Top-level keys loaded from the environment (`POLYGLOT_DEFAULT_LANGUAGE`,
//! `POLYGLOT_SUPPORTED_LANGUAGES`, `POLYGLOT_TRANSLATIONS_DIR`) override the
//! file section.

use crate::{ConfigError, ConfigManager, ConfigValidator, EnvLoader, Result, Validate};
use polyglot_i18n::{FileLayout, Locale, LocaleSettings};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use tracing::debug;

/// Name of the configuration section.
pub const SECTION: &str = "multilingual";

/// How route keys produced by two different base routes are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The later route replaces the earlier one.
    #[default]
    LastWriteWins,
    /// The earlier route is kept.
    KeepFirst,
    /// Expansion fails.
    Reject,
}

/// Where the content of a localized page comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStrategy {
    /// Every locale renders the same source file.
    Shared,
    /// Each locale has its own source file under a locale folder.
    PerLocale,
}

/// Translation file naming, mirrors [`FileLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationLayout {
    #[default]
    Flat,
    Nested,
}

impl From<TranslationLayout> for FileLayout {
    fn from(layout: TranslationLayout) -> Self {
        match layout {
            TranslationLayout::Flat => FileLayout::Flat,
            TranslationLayout::Nested => FileLayout::Nested,
        }
    }
}

/// A navigation entry that does not come from a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomNavItem {
    pub label: String,
    pub destination: String,
    #[serde(default = "default_priority")]
    pub priority: i32,
}

fn default_priority() -> i32 {
    100
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavigationConfig {
    #[serde(default)]
    pub custom: Vec<CustomNavItem>,
}

/// Settings for locale routing and translations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultilingualConfig {
    pub default_language: String,
    pub supported_languages: Vec<String>,
    pub translations_dir: PathBuf,
    pub translation_layout: TranslationLayout,
    pub redirect_locale_root: bool,
    pub index_file: String,
    pub collision_policy: CollisionPolicy,
    /// Page kind name (`markdown`, `post`, ...) to content strategy.
    pub content: BTreeMap<String, ContentStrategy>,
    pub navigation: NavigationConfig,
}

impl Default for MultilingualConfig {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            supported_languages: vec!["it".to_string(), "de".to_string()],
            translations_dir: PathBuf::from("resources/lang"),
            translation_layout: TranslationLayout::Flat,
            redirect_locale_root: true,
            index_file: "index.html".to_string(),
            collision_policy: CollisionPolicy::LastWriteWins,
            content: BTreeMap::new(),
            navigation: NavigationConfig::default(),
        }
    }
}

impl MultilingualConfig {
    /// Read the section from a manager, apply top-level overrides and validate.
    ///
    /// A missing section yields the defaults.
    pub fn from_manager(manager: &ConfigManager) -> Result<Self> {
        let mut config = match manager.get_value(SECTION) {
            Some(value) => serde_json::from_value::<Self>(value)
                .map_err(|e| ConfigError::DeserializationError(format!("{}: {}", SECTION, e)))?,
            None => {
                debug!("No multilingual section, using defaults");
                Self::default()
            }
        };

        let overrides: HashMap<String, String> = ["default_language", "supported_languages", "translations_dir"]
            .into_iter()
            .filter_map(|key| {
                manager
                    .get_value(key)
                    .and_then(|v| v.as_str().map(str::to_string))
                    .map(|v| (key.to_string(), v))
            })
            .collect();
        config.apply_overrides(&overrides);

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides read directly from prefixed environment variables.
    pub fn with_env(mut self, loader: &EnvLoader) -> Result<Self> {
        self.apply_overrides(&loader.load());
        self.validate()?;
        Ok(self)
    }

    fn apply_overrides(&mut self, values: &HashMap<String, String>) {
        if let Some(default) = values.get("default_language") {
            self.default_language = default.trim().to_string();
        }
        if let Some(list) = values.get("supported_languages") {
            self.supported_languages = split_list(list);
        }
        if let Some(dir) = values.get("translations_dir") {
            self.translations_dir = PathBuf::from(dir);
        }
    }

    /// Build locale settings from the configured codes.
    pub fn locale_settings(&self) -> Result<LocaleSettings> {
        let default = ConfigValidator::is_locale(&self.default_language, "default_language")?;
        let supported = self
            .supported_languages
            .iter()
            .map(|code| ConfigValidator::is_locale(code, "supported_languages"))
            .collect::<Result<Vec<Locale>>>()?;
        Ok(LocaleSettings::new(default, supported))
    }

    /// Content strategy configured for a page kind name, if any.
    pub fn content_strategy(&self, kind: &str) -> Option<ContentStrategy> {
        self.content.get(&kind.to_lowercase()).copied()
    }
}

impl Validate for MultilingualConfig {
    fn validate(&self) -> Result<()> {
        ConfigValidator::not_empty(&self.default_language, "default_language")?;
        ConfigValidator::is_file_name(&self.index_file, "index_file")?;
        self.locale_settings()?;
        Ok(())
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
