// Core library for polyglot
// Locale-prefixed routing, localized pages and per-request locale resolution

pub mod error;
pub mod http;
pub mod logging;
pub mod middleware;
pub mod navigation;
pub mod page;
pub mod path;
pub mod provider;
pub mod routing;

// Re-export commonly used types
pub use error::*;
pub use http::*;
pub use middleware::*;
pub use navigation::{NavItem, NavigationMenu};
pub use page::*;
pub use provider::MultilingualProvider;
pub use routing::*;

pub use polyglot_config::{CollisionPolicy, ContentStrategy};

/// Result type for polyglot-core operations
pub type Result<T> = std::result::Result<T, Error>;
