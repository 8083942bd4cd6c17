//! Wiring of settings, translations, route expansion and middleware

use crate::middleware::{LocaleMiddleware, LocaleResolver};
use crate::navigation::NavigationMenu;
use crate::page::LocalizedPageFactory;
use crate::routing::{RouteExpander, RouteSet, RouteTable};
use crate::Result;
use polyglot_config::{CustomNavItem, MultilingualConfig};
use polyglot_i18n::{Locale, LocaleSettings, TranslationStore};
use tracing::{debug, info};

/// Everything a host needs to serve a multilingual site.
#[derive(Debug, Clone)]
pub struct MultilingualProvider {
    settings: LocaleSettings,
    store: TranslationStore,
    expander: RouteExpander,
    resolver: LocaleResolver,
    custom_nav: Vec<CustomNavItem>,
}

impl MultilingualProvider {
    /// Build from validated configuration.
    pub fn from_config(config: &MultilingualConfig) -> Result<Self> {
        let settings = config.locale_settings()?;
        let store = TranslationStore::from_dir(
            config.translations_dir.clone(),
            config.translation_layout.into(),
            settings.default_locale().clone(),
        );
        Ok(Self::with_store(settings, store, config))
    }

    /// Build with a translation store supplied by the caller.
    pub fn with_store(
        settings: LocaleSettings,
        store: TranslationStore,
        config: &MultilingualConfig,
    ) -> Self {
        let factory = LocalizedPageFactory::from_config(settings.clone(), config);
        let expander = RouteExpander::new(factory).with_policy(config.collision_policy);
        let resolver = LocaleResolver::new(settings.clone())
            .with_index_file(config.index_file.clone())
            .with_root_redirect(config.redirect_locale_root);

        info!(
            default_locale = %settings.default_locale(),
            locales = settings.supported().len(),
            policy = ?config.collision_policy,
            "Multilingual provider ready"
        );

        Self {
            settings,
            store,
            expander,
            resolver,
            custom_nav: config.navigation.custom.clone(),
        }
    }

    pub fn settings(&self) -> &LocaleSettings {
        &self.settings
    }

    /// Expand the host's base routes and replace its table.
    ///
    /// Returns the number of localized routes registered.
    pub fn register_routes(&self, table: &mut impl RouteTable) -> Result<usize> {
        let base = table.base_routes();
        debug!(base_routes = base.len(), "Registering localized routes");

        let routes = self.expander.expand(&base)?;
        let count = routes.len();
        table.replace_routes(routes);

        info!(before = base.len(), after = count, "Replaced route table");
        Ok(count)
    }

    pub fn expander(&self) -> &RouteExpander {
        &self.expander
    }

    /// Middleware applying the configured locale resolution.
    pub fn middleware(&self) -> LocaleMiddleware {
        LocaleMiddleware::new(self.resolver.clone())
    }

    /// Shared translation store, cloning shares the cache.
    pub fn translations(&self) -> TranslationStore {
        self.store.clone()
    }

    /// Navigation for one locale, configured custom links included.
    pub fn navigation(&self, routes: &RouteSet, locale: &Locale) -> NavigationMenu {
        NavigationMenu::for_locale(routes, locale, &self.store).with_custom(&self.custom_nav)
    }
}
