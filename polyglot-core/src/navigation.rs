//! Per-locale navigation menus

use crate::page::PageKind;
use crate::path::INDEX;
use crate::routing::RouteSet;
use polyglot_config::CustomNavItem;
use polyglot_i18n::{Locale, TranslationStore};
use serde::Serialize;

/// Priority of the site root page.
pub const INDEX_PRIORITY: i32 = 0;
/// Priority of every other route-backed item.
pub const ROUTE_PRIORITY: i32 = 500;

/// One entry of a navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: String,
    pub destination: String,
    pub priority: i32,
    /// Route backing the item, `None` for custom links
    pub route_key: Option<String>,
}

impl From<&CustomNavItem> for NavItem {
    fn from(item: &CustomNavItem) -> Self {
        Self {
            label: item.label.clone(),
            destination: item.destination.clone(),
            priority: item.priority,
            route_key: None,
        }
    }
}

/// Navigation menu for one locale.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NavigationMenu {
    items: Vec<NavItem>,
}

impl NavigationMenu {
    /// Build the menu from the routes in `locale`.
    ///
    /// Blog posts are left out. A label comes from the `nav.{base_key}`
    /// translation when present, else from the last identifier segment.
    pub fn for_locale(routes: &RouteSet, locale: &Locale, store: &TranslationStore) -> Self {
        let items = routes
            .for_locale(locale)
            .filter(|route| route.page().kind() != PageKind::Post)
            .map(|route| {
                let page = route.page();
                let label = store
                    .get(&format!("nav.{}", route.base_key()), locale)
                    .unwrap_or_else(|| default_label(page.identifier()));
                let priority = if page.identifier() == INDEX {
                    INDEX_PRIORITY
                } else {
                    ROUTE_PRIORITY
                };

                NavItem {
                    label,
                    destination: route.uri().to_string(),
                    priority,
                    route_key: Some(route.key().to_string()),
                }
            })
            .collect();

        let mut menu = Self { items };
        menu.sort();
        menu
    }

    /// Append configured links and re-sort.
    pub fn with_custom<'a>(mut self, custom: impl IntoIterator<Item = &'a CustomNavItem>) -> Self {
        self.items.extend(custom.into_iter().map(NavItem::from));
        self.sort();
        self
    }

    fn sort(&mut self) {
        self.items.sort_by_key(|item| item.priority);
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn default_label(identifier: &str) -> String {
    let last = identifier.rsplit('/').next().unwrap_or(identifier);
    if last == INDEX {
        return "Home".to_string();
    }

    last.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
