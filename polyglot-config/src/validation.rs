// Configuration validation

use crate::{ConfigError, Result};
use polyglot_i18n::Locale;

/// Trait for validating configuration
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Configuration validator with rules
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate that a value is not empty
    pub fn not_empty(value: &str, field: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                field
            )));
        }
        Ok(())
    }

    /// Validate that a value is in a list of allowed values
    pub fn one_of<T: PartialEq>(value: &T, allowed: &[T], field: &str) -> Result<()> {
        if !allowed.contains(value) {
            return Err(ConfigError::ValidationError(format!(
                "{} must be one of the allowed values",
                field
            )));
        }
        Ok(())
    }

    /// Validate that a value parses as a locale code
    pub fn is_locale(value: &str, field: &str) -> Result<Locale> {
        Locale::parse(value).map_err(|_| {
            ConfigError::ValidationError(format!(
                "{} must be a locale code like \"en\" or \"pt-BR\", got \"{}\"",
                field, value
            ))
        })
    }

    /// Validate that a value is a single path segment
    pub fn is_file_name(value: &str, field: &str) -> Result<()> {
        Self::not_empty(value, field)?;
        if value.contains('/') || value.contains('\\') {
            return Err(ConfigError::ValidationError(format!(
                "{} must be a file name, not a path",
                field
            )));
        }
        Ok(())
    }
}
