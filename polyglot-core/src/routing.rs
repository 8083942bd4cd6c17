//! Expansion of base routes into one route per supported locale

use crate::page::{LocalizedPage, LocalizedPageFactory, PageHandle, PageKind};
use crate::{Error, Result};
use polyglot_config::CollisionPolicy;
use polyglot_i18n::Locale;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, trace, warn};

/// A route discovered by the host before localization.
///
/// `key` identifies the route as the host knows it. Localized keys are
/// derived from `page`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseRoute {
    pub key: String,
    pub uri: String,
    pub page: PageHandle,
}

impl BaseRoute {
    /// Route keyed by the page's own base key.
    pub fn new(page: PageHandle) -> Self {
        let key = page.base_key();
        Self {
            uri: format!("/{}", key),
            key,
            page,
        }
    }

    pub fn with_key(key: impl Into<String>, uri: impl Into<String>, page: PageHandle) -> Self {
        Self {
            key: key.into(),
            uri: uri.into(),
            page,
        }
    }
}

/// A localized route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    key: String,
    uri: String,
    base_key: String,
    origin: String,
    page: LocalizedPage,
}

impl Route {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Key shared by every locale variant of the page.
    pub fn base_key(&self) -> &str {
        &self.base_key
    }

    pub fn page(&self) -> &LocalizedPage {
        &self.page
    }

    pub fn locale(&self) -> &Locale {
        self.page.locale()
    }
}

/// Two different base routes produced the same localized key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteCollision {
    pub key: String,
    pub existing: String,
    pub incoming: String,
    pub policy: CollisionPolicy,
}

/// Insertion-ordered localized routes.
#[derive(Debug, Clone, Default)]
pub struct RouteSet {
    routes: Vec<Route>,
    index: HashMap<String, usize>,
    collisions: Vec<RouteCollision>,
}

impl RouteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Route> {
        self.index.get(key).map(|&i| &self.routes[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(Route::key)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routes whose page is rendered in `locale`.
    pub fn for_locale<'a>(&'a self, locale: &'a Locale) -> impl Iterator<Item = &'a Route> + 'a {
        self.routes.iter().filter(move |r| r.locale() == locale)
    }

    /// Every locale variant of the page behind `key`, the route itself included.
    pub fn alternates(&self, key: &str) -> Vec<&Route> {
        let Some(route) = self.get(key) else {
            return Vec::new();
        };
        self.routes
            .iter()
            .filter(|r| r.base_key == route.base_key)
            .collect()
    }

    /// Pages of one kind in one locale, in route order.
    pub fn pages_of_kind<'a>(
        &'a self,
        kind: PageKind,
        locale: &'a Locale,
    ) -> impl Iterator<Item = &'a LocalizedPage> + 'a {
        self.for_locale(locale)
            .map(Route::page)
            .filter(move |p| p.kind() == kind)
    }

    /// Collisions seen while building the set.
    pub fn collisions(&self) -> &[RouteCollision] {
        &self.collisions
    }

    fn insert(&mut self, route: Route, policy: CollisionPolicy) -> Result<()> {
        let Some(&slot) = self.index.get(&route.key) else {
            trace!(route_key = %route.key, locale = %route.locale(), "Registered route");
            self.index.insert(route.key.clone(), self.routes.len());
            self.routes.push(route);
            return Ok(());
        };

        let existing = &self.routes[slot];
        if existing.origin == route.origin {
            self.routes[slot] = route;
            return Ok(());
        }

        warn!(
            route_key = %route.key,
            existing = %existing.origin,
            incoming = %route.origin,
            policy = ?policy,
            "Route key collision"
        );
        let collision = RouteCollision {
            key: route.key.clone(),
            existing: existing.origin.clone(),
            incoming: route.origin.clone(),
            policy,
        };

        match policy {
            CollisionPolicy::LastWriteWins => self.routes[slot] = route,
            CollisionPolicy::KeepFirst => {}
            CollisionPolicy::Reject => {
                return Err(Error::RouteCollision {
                    key: collision.key,
                    existing: collision.existing,
                    incoming: collision.incoming,
                });
            }
        }
        self.collisions.push(collision);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a RouteSet {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

/// Expands base routes into localized routes.
#[derive(Debug, Clone)]
pub struct RouteExpander {
    factory: LocalizedPageFactory,
    policy: CollisionPolicy,
}

impl RouteExpander {
    pub fn new(factory: LocalizedPageFactory) -> Self {
        Self {
            factory,
            policy: CollisionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CollisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    pub fn factory(&self) -> &LocalizedPageFactory {
        &self.factory
    }

    /// One route per (base route, supported locale), default locale first.
    ///
    /// Every route is keyed by its page's localized route key. A base route
    /// found in a locale folder is skipped when the same page also exists
    /// outside one.
    pub fn expand(&self, base_routes: &[BaseRoute]) -> Result<RouteSet> {
        let settings = self.factory.settings();
        let default = settings.default_locale();
        let locales: Vec<&Locale> = std::iter::once(default).chain(settings.non_default()).collect();

        let handles: Vec<PageHandle> = base_routes
            .iter()
            .map(|base| self.factory.base_handle(&base.page))
            .collect();
        let unprefixed: HashSet<String> = base_routes
            .iter()
            .zip(&handles)
            .filter(|(base, handle)| base.page.identifier == handle.identifier)
            .map(|(_, handle)| handle.base_key())
            .collect();

        let mut set = RouteSet::new();
        for (base, handle) in base_routes.iter().zip(&handles) {
            let base_key = handle.base_key();
            if base.page.identifier != handle.identifier && unprefixed.contains(&base_key) {
                debug!(route_key = %base.key, base_key = %base_key, "Skipping locale mirror route");
                continue;
            }

            for locale in &locales {
                let page = self.factory.make(&base.page, locale);
                let route = Route {
                    key: page.route_key().to_string(),
                    uri: page.uri().to_string(),
                    base_key: base_key.clone(),
                    origin: base.key.clone(),
                    page,
                };
                set.insert(route, self.policy)?;
            }
        }

        info!(
            base_routes = base_routes.len(),
            routes = set.len(),
            locales = locales.len(),
            collisions = set.collisions.len(),
            "Expanded localized routes"
        );
        Ok(set)
    }
}

/// The host's route table.
pub trait RouteTable {
    /// Routes as discovered, before localization.
    fn base_routes(&self) -> Vec<BaseRoute>;

    /// Replace the whole table with localized routes.
    fn replace_routes(&mut self, routes: RouteSet);
}

/// In-memory route table.
#[derive(Debug, Clone, Default)]
pub struct SiteRoutes {
    base: Vec<BaseRoute>,
    routes: RouteSet,
}

impl SiteRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, route: BaseRoute) {
        self.base.push(route);
    }

    pub fn with_page(mut self, identifier: impl Into<String>, kind: PageKind) -> Self {
        self.add(BaseRoute::new(PageHandle::new(identifier, kind)));
        self
    }

    /// The localized routes, empty until replaced.
    pub fn routes(&self) -> &RouteSet {
        &self.routes
    }
}

impl RouteTable for SiteRoutes {
    fn base_routes(&self) -> Vec<BaseRoute> {
        self.base.clone()
    }

    fn replace_routes(&mut self, routes: RouteSet) {
        self.routes = routes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyglot_i18n::LocaleSettings;

    fn expander() -> RouteExpander {
        let settings = LocaleSettings::parse("en", &["it", "de"]).unwrap();
        RouteExpander::new(LocalizedPageFactory::new(settings))
    }

    fn base(identifier: &str, kind: PageKind) -> BaseRoute {
        BaseRoute::new(PageHandle::new(identifier, kind))
    }

    #[test]
    fn test_expand_single_route() {
        let set = expander()
            .expand(&[base("about", PageKind::Template)])
            .unwrap();

        let keys: Vec<&str> = set.keys().collect();
        assert_eq!(keys, vec!["about", "it/about", "de/about"]);
        assert_eq!(set.get("it/about").unwrap().locale(), &Locale::new("it"));
        assert!(set.collisions().is_empty());
    }

    #[test]
    fn test_expand_index() {
        let set = expander()
            .expand(&[base("index", PageKind::Template)])
            .unwrap();

        assert_eq!(set.get("index").unwrap().uri(), "/");
        assert_eq!(set.get("it/index").unwrap().uri(), "/it/index");
        assert_eq!(set.get("de/index").unwrap().page().output_path(), "de/index.html");
    }

    #[test]
    fn test_expand_count() {
        let routes = vec![
            base("index", PageKind::Template),
            base("hello", PageKind::Post),
            base("intro", PageKind::Documentation),
        ];
        let set = expander().expand(&routes).unwrap();

        assert_eq!(set.len(), 9);
        assert!(set.contains("it/posts/hello"));
        assert!(set.contains("de/docs/intro"));
    }

    #[test]
    fn test_mirror_route_skipped() {
        let routes = vec![
            base("about", PageKind::Markdown),
            base("it/about", PageKind::Markdown),
        ];
        let set = expander().expand(&routes).unwrap();

        assert_eq!(set.len(), 3);
        assert!(set.collisions().is_empty());
        assert!(!set.contains("it/it/about"));
    }

    #[test]
    fn test_mirror_without_counterpart_expands_stripped() {
        let set = expander()
            .expand(&[base("de/contact", PageKind::Html)])
            .unwrap();

        let keys: Vec<&str> = set.keys().collect();
        assert_eq!(keys, vec!["contact", "it/contact", "de/contact"]);
    }

    fn assert_keys_match_pages(set: &RouteSet) {
        let mut outputs = HashSet::new();
        for route in set {
            assert_eq!(route.key(), route.page().route_key());
            assert!(outputs.insert(route.page().output_path().to_string()));
        }
    }

    #[test]
    fn test_locale_folder_documentation_mirror() {
        let routes = vec![
            base("intro", PageKind::Documentation),
            base("it/intro", PageKind::Documentation),
        ];
        let set = expander().expand(&routes).unwrap();

        let keys: Vec<&str> = set.keys().collect();
        assert_eq!(keys, vec!["docs/intro", "it/docs/intro", "de/docs/intro"]);
        assert!(set.collisions().is_empty());
        assert_eq!(
            set.get("it/docs/intro").unwrap().page().source_path(),
            "_docs/it/intro.md"
        );
        assert_keys_match_pages(&set);
    }

    #[test]
    fn test_locale_folder_post_without_counterpart() {
        let set = expander()
            .expand(&[base("de/hello", PageKind::Post)])
            .unwrap();

        let keys: Vec<&str> = set.keys().collect();
        assert_eq!(keys, vec!["posts/hello", "it/posts/hello", "de/posts/hello"]);
        assert!(set.iter().all(|r| r.base_key() == "posts/hello"));
        assert_keys_match_pages(&set);
    }

    #[test]
    fn test_locale_named_page_keeps_key() {
        let routes = vec![
            base("de", PageKind::Html),
            base("it", PageKind::Documentation),
        ];
        let set = expander().expand(&routes).unwrap();

        assert_eq!(set.len(), 6);
        let keys: Vec<&str> = set.keys().collect();
        assert_eq!(
            keys,
            vec!["de", "it/de", "de/de", "docs/it", "it/docs/it", "de/docs/it"]
        );
        assert_eq!(set.get("de").unwrap().page().output_path(), "de.html");
        assert_eq!(set.get("de").unwrap().locale(), &Locale::new("en"));
        assert_eq!(set.get("it/de").unwrap().uri(), "/it/de");
        assert_keys_match_pages(&set);
    }

    #[test]
    fn test_keys_match_pages_across_kinds() {
        let routes: Vec<BaseRoute> = [PageKind::Template, PageKind::Post, PageKind::Documentation]
            .into_iter()
            .flat_map(|kind| [base("guide", kind), base("it/guide", kind), base("de/setup", kind)])
            .collect();
        let set = expander().expand(&routes).unwrap();
        assert_eq!(set.len(), 3 * 2 * 3);
        assert!(set.collisions().is_empty());
        assert_keys_match_pages(&set);
    }

    fn colliding() -> Vec<BaseRoute> {
        vec![
            BaseRoute::with_key("it/de/faq", "it/de/faq", PageHandle::new("faq", PageKind::Template)),
            BaseRoute::with_key("de/faq", "de/faq", PageHandle::new("faq", PageKind::Markdown)),
        ]
    }

    #[test]
    fn test_collision_last_write_wins() {
        let set = expander().expand(&colliding()).unwrap();

        assert_eq!(set.len(), 3);
        assert_eq!(set.collisions().len(), 3);
        assert_eq!(set.get("faq").unwrap().page().kind(), PageKind::Markdown);
        assert_eq!(set.keys().next(), Some("faq"));
    }

    #[test]
    fn test_collision_keep_first() {
        let set = expander()
            .with_policy(CollisionPolicy::KeepFirst)
            .expand(&colliding())
            .unwrap();

        assert_eq!(set.get("it/faq").unwrap().page().kind(), PageKind::Template);
        assert_eq!(set.collisions()[0].existing, "it/de/faq");
        assert_eq!(set.collisions()[0].incoming, "de/faq");
    }

    #[test]
    fn test_collision_reject() {
        let err = expander()
            .with_policy(CollisionPolicy::Reject)
            .expand(&colliding())
            .unwrap_err();

        assert!(matches!(err, Error::RouteCollision { ref key, .. } if key == "faq"));
    }

    #[test]
    fn test_alternates_and_filters() {
        let routes = vec![
            base("index", PageKind::Template),
            base("hello", PageKind::Post),
            base("world", PageKind::Post),
        ];
        let set = expander().expand(&routes).unwrap();

        let alternates: Vec<&str> = set
            .alternates("de/posts/hello")
            .into_iter()
            .map(Route::key)
            .collect();
        assert_eq!(alternates, vec!["posts/hello", "it/posts/hello", "de/posts/hello"]);

        let it = Locale::new("it");
        assert_eq!(set.for_locale(&it).count(), 3);
        let posts: Vec<&str> = set
            .pages_of_kind(PageKind::Post, &it)
            .map(|p| p.route_key())
            .collect();
        assert_eq!(posts, vec!["it/posts/hello", "it/posts/world"]);
        assert!(set.alternates("missing").is_empty());
    }

    #[test]
    fn test_site_routes_replace() {
        let mut table = SiteRoutes::new().with_page("about", PageKind::Template);
        assert!(table.routes().is_empty());

        let set = expander().expand(&table.base_routes()).unwrap();
        table.replace_routes(set);
        assert_eq!(table.routes().len(), 3);
    }
}
