// Error types for polyglot routing

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Route key collision on {key}: produced by {existing} and {incoming}")]
    RouteCollision {
        key: String,
        existing: String,
        incoming: String,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] polyglot_config::ConfigError),

    #[error("Translation error: {0}")]
    I18n(#[from] polyglot_i18n::I18nError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl Error {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Error::NotFound(_) => 404,
            Error::RouteCollision { .. } => 409,
            Error::I18n(polyglot_i18n::I18nError::InvalidLocale(_))
            | Error::I18n(polyglot_i18n::I18nError::UnsupportedLocale(_)) => 400,

            // Default to 500 for unmapped errors
            _ => 500,
        }
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}
