//! Page kinds and their locale-tagged variants

use crate::path::{self, strip_locale_prefix};
use polyglot_config::{ContentStrategy, MultilingualConfig};
use polyglot_i18n::{Locale, LocaleSettings};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// The kinds of page the host discovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// Templated page (`_pages/*.blade.php`)
    Template,
    Markdown,
    /// Blog post (`_posts/*.md`)
    Post,
    /// Documentation page (`_docs/*.md`)
    Documentation,
    Html,
    /// Page registered in code with no source file
    InMemory,
}

impl PageKind {
    pub const ALL: [PageKind; 6] = [
        PageKind::Template,
        PageKind::Markdown,
        PageKind::Post,
        PageKind::Documentation,
        PageKind::Html,
        PageKind::InMemory,
    ];

    /// Parse a kind name, falling back to [`PageKind::Template`].
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "markdown" | "markdown_page" => PageKind::Markdown,
            "post" | "markdown_post" => PageKind::Post,
            "documentation" | "docs" | "documentation_page" => PageKind::Documentation,
            "html" | "html_page" => PageKind::Html,
            "in_memory" | "in_memory_page" => PageKind::InMemory,
            _ => PageKind::Template,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PageKind::Template => "template",
            PageKind::Markdown => "markdown",
            PageKind::Post => "post",
            PageKind::Documentation => "documentation",
            PageKind::Html => "html",
            PageKind::InMemory => "in_memory",
        }
    }

    pub fn source_dir(&self) -> &'static str {
        match self {
            PageKind::Template | PageKind::Markdown | PageKind::Html => "_pages",
            PageKind::Post => "_posts",
            PageKind::Documentation => "_docs",
            PageKind::InMemory => "",
        }
    }

    pub fn source_extension(&self) -> &'static str {
        match self {
            PageKind::Template => ".blade.php",
            PageKind::Markdown | PageKind::Post | PageKind::Documentation => ".md",
            PageKind::Html => ".html",
            PageKind::InMemory => "",
        }
    }

    pub fn output_dir(&self) -> &'static str {
        match self {
            PageKind::Post => "posts",
            PageKind::Documentation => "docs",
            _ => "",
        }
    }

    pub fn default_strategy(&self) -> ContentStrategy {
        match self {
            PageKind::Markdown | PageKind::Post | PageKind::Documentation => {
                ContentStrategy::PerLocale
            }
            PageKind::Template | PageKind::Html | PageKind::InMemory => ContentStrategy::Shared,
        }
    }

    /// Whether compiled output carries a locale marker comment.
    pub fn annotates(&self) -> bool {
        matches!(self, PageKind::Markdown | PageKind::Html | PageKind::InMemory)
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A page as discovered by the host: identifier plus kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageHandle {
    /// Logical path without extension, relative to the kind's source dir
    pub identifier: String,
    pub kind: PageKind,
}

impl PageHandle {
    pub fn new(identifier: impl Into<String>, kind: PageKind) -> Self {
        Self {
            identifier: identifier.into(),
            kind,
        }
    }

    /// Route key of the page before localization.
    pub fn base_key(&self) -> String {
        join(self.kind.output_dir(), &self.identifier)
    }
}

fn join(dir: &str, rest: &str) -> String {
    if dir.is_empty() {
        rest.to_string()
    } else {
        format!("{}/{}", dir, rest)
    }
}

/// A page tagged with the locale it is rendered in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedPage {
    identifier: String,
    kind: PageKind,
    locale: Locale,
    route_key: String,
    output_path: String,
    uri: String,
    source_identifier: String,
}

impl LocalizedPage {
    /// Identifier with every locale prefix removed.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn route_key(&self) -> &str {
        &self.route_key
    }

    /// Path of the compiled file relative to the output tree.
    pub fn output_path(&self) -> &str {
        &self.output_path
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Identifier used to locate the content file.
    pub fn source_identifier(&self) -> &str {
        &self.source_identifier
    }

    /// Content file relative to the site root, empty for in-memory pages.
    pub fn source_path(&self) -> String {
        if self.kind == PageKind::InMemory {
            return String::new();
        }
        format!(
            "{}{}",
            join(self.kind.source_dir(), &self.source_identifier),
            self.kind.source_extension()
        )
    }

    /// The same page without a locale.
    pub fn handle(&self) -> PageHandle {
        PageHandle::new(self.identifier.clone(), self.kind)
    }

    /// Mark compiled output with its locale.
    pub fn annotate(&self, compiled: &str) -> String {
        if self.kind.annotates() {
            format!("<!-- Locale: {} -->\n{}", self.locale, compiled)
        } else {
            compiled.to_string()
        }
    }

    /// Values exposed to templates.
    pub fn view_data(&self) -> serde_json::Value {
        serde_json::json!({
            "locale": self.locale.tag(),
            "identifier": self.identifier,
            "route_key": self.route_key,
            "output_path": self.output_path,
            "uri": self.uri,
            "kind": self.kind.name(),
        })
    }
}

/// Builds [`LocalizedPage`]s for the configured locales.
#[derive(Debug, Clone)]
pub struct LocalizedPageFactory {
    settings: LocaleSettings,
    strategies: HashMap<PageKind, ContentStrategy>,
}

impl LocalizedPageFactory {
    pub fn new(settings: LocaleSettings) -> Self {
        Self {
            settings,
            strategies: HashMap::new(),
        }
    }

    /// Apply the per-kind content overrides from configuration.
    ///
    /// Unknown kind names are parsed with the usual fallback.
    pub fn from_config(settings: LocaleSettings, config: &MultilingualConfig) -> Self {
        config
            .content
            .iter()
            .fold(Self::new(settings), |factory, (name, strategy)| {
                factory.with_strategy(PageKind::parse(name), *strategy)
            })
    }

    pub fn with_strategy(mut self, kind: PageKind, strategy: ContentStrategy) -> Self {
        self.strategies.insert(kind, strategy);
        self
    }

    pub fn strategy(&self, kind: PageKind) -> ContentStrategy {
        self.strategies
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.default_strategy())
    }

    pub fn settings(&self) -> &LocaleSettings {
        &self.settings
    }

    /// `page` with every locale folder removed from its identifier.
    pub fn base_handle(&self, page: &PageHandle) -> PageHandle {
        PageHandle::new(
            strip_locale_prefix(&page.identifier, &self.settings),
            page.kind,
        )
    }

    /// Build the variant of `page` in `locale`.
    pub fn make(&self, page: &PageHandle, locale: &Locale) -> LocalizedPage {
        let default = self.settings.default_locale();
        let base = self.base_handle(page);
        let base_key = base.base_key();
        let identifier = base.identifier;

        let route_key = path::route_key(&base_key, locale, default);
        let output_path = path::output_path(&format!("{}.html", base_key), locale, default);
        let uri = path::uri(&base_key, locale, default);
        let source_identifier = match self.strategy(page.kind) {
            ContentStrategy::Shared => identifier.clone(),
            ContentStrategy::PerLocale => path::route_key(&identifier, locale, default),
        };

        trace!(
            identifier = %identifier,
            locale = %locale,
            route_key = %route_key,
            kind = %page.kind,
            "Localized page"
        );

        LocalizedPage {
            identifier,
            kind: page.kind,
            locale: locale.clone(),
            route_key,
            output_path,
            uri,
            source_identifier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory() -> LocalizedPageFactory {
        LocalizedPageFactory::new(LocaleSettings::parse("en", &["it", "de"]).unwrap())
    }

    #[test]
    fn test_kind_parse_fallback() {
        assert_eq!(PageKind::parse("Markdown"), PageKind::Markdown);
        assert_eq!(PageKind::parse("in-memory"), PageKind::InMemory);
        assert_eq!(PageKind::parse("docs"), PageKind::Documentation);
        assert_eq!(PageKind::parse("something-else"), PageKind::Template);
        for kind in PageKind::ALL {
            assert_eq!(PageKind::parse(kind.name()), kind);
        }
    }

    #[test]
    fn test_make_default_locale() {
        let page = factory().make(&PageHandle::new("about", PageKind::Template), &Locale::new("en"));

        assert_eq!(page.route_key(), "about");
        assert_eq!(page.output_path(), "about.html");
        assert_eq!(page.uri(), "/about");
        assert_eq!(page.source_path(), "_pages/about.blade.php");
    }

    #[test]
    fn test_make_strips_nested_prefix() {
        let page = factory().make(
            &PageHandle::new("de/it/about", PageKind::Template),
            &Locale::new("it"),
        );

        assert_eq!(page.identifier(), "about");
        assert_eq!(page.route_key(), "it/about");
        assert_eq!(page.output_path(), "it/about.html");
    }

    #[test]
    fn test_locale_named_identifier_kept() {
        let factory = factory();
        let page = PageHandle::new("de", PageKind::Html);

        let en = factory.make(&page, &Locale::new("en"));
        assert_eq!(en.identifier(), "de");
        assert_eq!(en.route_key(), "de");
        assert_eq!(en.output_path(), "de.html");

        let de = factory.make(&page, &Locale::new("de"));
        assert_eq!(de.route_key(), "de/de");
        assert_eq!(de.output_path(), "de/de.html");
        assert_eq!(de.uri(), "/de/de");
    }

    #[test]
    fn test_locale_folder_documentation() {
        let page = factory().make(
            &PageHandle::new("it/intro", PageKind::Documentation),
            &Locale::new("de"),
        );

        assert_eq!(page.identifier(), "intro");
        assert_eq!(page.route_key(), "de/docs/intro");
        assert_eq!(page.handle().base_key(), "docs/intro");
        assert_eq!(page.source_path(), "_docs/de/intro.md");
    }

    #[test]
    fn test_per_locale_documentation() {
        let page = factory().make(
            &PageHandle::new("intro", PageKind::Documentation),
            &Locale::new("it"),
        );

        assert_eq!(page.route_key(), "it/docs/intro");
        assert_eq!(page.output_path(), "it/docs/intro.html");
        assert_eq!(page.source_identifier(), "it/intro");
        assert_eq!(page.source_path(), "_docs/it/intro.md");
    }

    #[test]
    fn test_strategy_override() {
        let factory = factory().with_strategy(PageKind::Post, ContentStrategy::Shared);
        let page = factory.make(&PageHandle::new("hello", PageKind::Post), &Locale::new("de"));

        assert_eq!(page.route_key(), "de/posts/hello");
        assert_eq!(page.source_path(), "_posts/hello.md");
    }

    #[test]
    fn test_from_config_strategies() {
        let mut config = MultilingualConfig::default();
        config
            .content
            .insert("markdown".to_string(), ContentStrategy::Shared);
        let factory =
            LocalizedPageFactory::from_config(config.locale_settings().unwrap(), &config);

        assert_eq!(factory.strategy(PageKind::Markdown), ContentStrategy::Shared);
        assert_eq!(factory.strategy(PageKind::Post), ContentStrategy::PerLocale);
        assert_eq!(factory.strategy(PageKind::Html), ContentStrategy::Shared);
    }

    #[test]
    fn test_index_page() {
        let factory = factory();
        let index = PageHandle::new("index", PageKind::Template);

        let en = factory.make(&index, &Locale::new("en"));
        let it = factory.make(&index, &Locale::new("it"));
        assert_eq!(en.uri(), "/");
        assert_eq!(en.output_path(), "index.html");
        assert_eq!(it.uri(), "/it/index");
        assert_eq!(it.output_path(), "it/index.html");
    }

    #[test]
    fn test_annotate() {
        let factory = factory();
        let it = Locale::new("it");

        let html = factory.make(&PageHandle::new("legal", PageKind::Html), &it);
        assert_eq!(html.annotate("<p>x</p>"), "<!-- Locale: it -->\n<p>x</p>");

        let template = factory.make(&PageHandle::new("about", PageKind::Template), &it);
        assert_eq!(template.annotate("<p>x</p>"), "<p>x</p>");
    }

    #[test]
    fn test_in_memory_has_no_source() {
        let page = factory().make(&PageHandle::new("feed", PageKind::InMemory), &Locale::new("de"));
        assert_eq!(page.source_path(), "");
        assert_eq!(page.route_key(), "de/feed");
    }

    #[test]
    fn test_view_data() {
        let page = factory().make(&PageHandle::new("hello", PageKind::Post), &Locale::new("it"));
        let data = page.view_data();

        assert_eq!(data["locale"], "it");
        assert_eq!(data["route_key"], "it/posts/hello");
        assert_eq!(data["kind"], "post");
    }
}
