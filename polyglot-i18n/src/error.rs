//! Error types for i18n operations

use thiserror::Error;

/// Errors that can occur while parsing locales or loading translations.
#[derive(Debug, Error)]
pub enum I18nError {
    /// Invalid locale string
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    /// Locale is not part of the configured set
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// Failed to parse a translation file
    #[error("Failed to parse translation file: {0}")]
    ParseError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parse error
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}
