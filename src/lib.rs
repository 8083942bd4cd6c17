// Polyglot - locale-aware routing and translations for static sites
//
// This library expands a site's discovered pages into one route per
// supported locale, resolves the active locale of incoming requests and
// looks up translated strings with fallback to the default locale.

// Re-export core functionality
pub use polyglot_core::*;

// Re-export member crates
pub use polyglot_config;
pub use polyglot_i18n;

pub use polyglot_config::{ConfigManager, ConfigService, MultilingualConfig};
pub use polyglot_i18n::{FileLayout, Locale, LocaleSettings, TranslationStore};

// Re-export for implementing Middleware
pub use async_trait::async_trait;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        BaseRoute,
        CollisionPolicy,
        ConfigService,
        ContentStrategy,
        Error,
        HttpRequest,
        HttpResponse,
        Locale,
        LocaleDecision,
        LocaleMiddleware,
        LocaleResolver,
        LocaleSettings,
        LocalizedPage,
        LocalizedPageFactory,
        Middleware,
        MiddlewareChain,
        MultilingualConfig,
        MultilingualProvider,
        NavigationMenu,
        Next,
        PageHandle,
        PageKind,
        Route,
        RouteExpander,
        RouteSet,
        RouteTable,
        SiteRoutes,
        TranslationStore,
        async_trait,
    };
}
