// ConfigService - High-level configuration service

use crate::{ConfigManager, FileFormat, MultilingualConfig, Result};
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use tracing::warn;

/// High-level configuration service
#[derive(Clone)]
pub struct ConfigService {
    manager: ConfigManager,
}

impl ConfigService {
    /// Create a new configuration service
    pub fn new() -> Self {
        Self {
            manager: ConfigManager::new(),
        }
    }

    /// Create from an existing manager
    pub fn from_manager(manager: ConfigManager) -> Self {
        Self { manager }
    }

    /// Builder for creating configured service
    pub fn builder() -> ConfigServiceBuilder {
        ConfigServiceBuilder::new()
    }

    /// Get configuration value
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        self.manager.get(key)
    }

    /// Get configuration value with default
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.manager.get_or(key, default)
    }

    /// Get string value
    pub fn get_string(&self, key: &str) -> Result<String> {
        self.manager.get_string(key)
    }

    /// Get boolean value
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.manager.get_bool(key)
    }

    /// Check if key exists
    pub fn has(&self, key: &str) -> bool {
        self.manager.has(key)
    }

    /// The validated `multilingual` section
    pub fn multilingual(&self) -> Result<MultilingualConfig> {
        MultilingualConfig::from_manager(&self.manager)
    }

    /// Get underlying manager
    pub fn manager(&self) -> &ConfigManager {
        &self.manager
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for ConfigService
pub struct ConfigServiceBuilder {
    manager: ConfigManager,
    load_env: bool,
    load_dotenv: bool,
    dotenv_path: Option<PathBuf>,
    config_files: Vec<(PathBuf, Option<FileFormat>)>,
}

impl ConfigServiceBuilder {
    pub fn new() -> Self {
        Self {
            manager: ConfigManager::new(),
            load_env: false,
            load_dotenv: false,
            dotenv_path: None,
            config_files: Vec::new(),
        }
    }

    /// Set environment variable prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.manager = ConfigManager::with_prefix(prefix);
        self
    }

    /// Enable loading from environment variables
    pub fn load_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Enable loading from .env file
    pub fn load_dotenv(mut self, path: Option<PathBuf>) -> Self {
        self.load_dotenv = true;
        self.dotenv_path = path;
        self
    }

    /// Add configuration file to load
    pub fn add_file(mut self, path: impl Into<PathBuf>, format: FileFormat) -> Self {
        self.config_files.push((path.into(), Some(format)));
        self
    }

    /// Add a configuration file whose format follows its extension
    pub fn add_file_auto(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_files.push((path.into(), None));
        self
    }

    /// Build the configuration service
    pub fn build(self) -> Result<ConfigService> {
        // Files first so the environment can override them
        for (path, format) in &self.config_files {
            match format {
                Some(format) => self.manager.load_file(path, *format)?,
                None => self.manager.load_file_auto(path)?,
            }
        }

        if self.load_dotenv {
            if let Err(e) = self.manager.load_dotenv(self.dotenv_path.as_deref()) {
                warn!(error = %e, "Failed to load .env file");
            }
        }

        if self.load_env {
            self.manager.load_env();
        }

        Ok(ConfigService::from_manager(self.manager))
    }
}

impl Default for ConfigServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_loads_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("base.json");
        let local = dir.path().join("local.toml");
        std::fs::write(&base, r#"{"title": "Base", "theme": "dark"}"#).unwrap();
        std::fs::write(&local, "title = \"Local\"\n").unwrap();

        let service = ConfigService::builder()
            .add_file(&base, FileFormat::Json)
            .add_file_auto(&local)
            .build()
            .unwrap();

        assert_eq!(service.get_string("title").unwrap(), "Local");
        assert_eq!(service.get_string("theme").unwrap(), "dark");
    }

    #[test]
    fn test_builder_missing_file_fails() {
        let result = ConfigService::builder()
            .add_file("/definitely/not/here.toml", FileFormat::Toml)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_multilingual_defaults_when_section_missing() {
        let service = ConfigService::new();
        let config = service.multilingual().unwrap();
        assert_eq!(config.default_language, "en");
    }
}
