//! Locale-prefixed route keys, output paths and URIs
//!
//! The default locale is served without a prefix; every other locale lives
//! under `{locale}/`. All functions here are pure and idempotent.

use polyglot_i18n::{Locale, LocaleSettings};

/// Identifier of the site root page.
pub const INDEX: &str = "index";

fn prefix(base: &str, locale: &Locale, default: &Locale) -> String {
    if locale == default {
        return base.to_string();
    }

    let tag = locale.tag();
    let already = base
        .strip_prefix(tag.as_str())
        .is_some_and(|rest| rest.starts_with('/'));
    if already {
        base.to_string()
    } else {
        format!("{}/{}", tag, base)
    }
}

/// Route key of a page in `locale`.
///
/// Only a leading `{locale}/` counts as an existing prefix, so a page whose
/// identifier is itself a locale code is still prefixed.
///
/// ```
/// use polyglot_core::path::route_key;
/// use polyglot_i18n::Locale;
///
/// let (en, it) = (Locale::new("en"), Locale::new("it"));
/// assert_eq!(route_key("about", &it, &en), "it/about");
/// assert_eq!(route_key("it/about", &it, &en), "it/about");
/// assert_eq!(route_key("about", &en, &en), "about");
/// assert_eq!(route_key("it", &it, &en), "it/it");
/// ```
pub fn route_key(base_key: &str, locale: &Locale, default: &Locale) -> String {
    prefix(base_key, locale, default)
}

/// Output path of a page in `locale`, derived separately from the route key.
pub fn output_path(base_path: &str, locale: &Locale, default: &Locale) -> String {
    prefix(base_path, locale, default)
}

/// Public URI of a page.
///
/// Always absolute. The site root maps to `/` for the default locale and to
/// `/{locale}/index` for the others.
pub fn uri(base_key: &str, locale: &Locale, default: &Locale) -> String {
    if base_key == INDEX && locale == default {
        return "/".to_string();
    }
    format!("/{}", route_key(base_key, locale, default))
}

/// Remove every leading `{locale}/` segment naming a supported locale.
///
/// Leading slashes are dropped as well: `/de/it/about` becomes `about`. A
/// final segment is never stripped, `de/it` becomes `it`.
pub fn strip_locale_prefix<'a>(path: &'a str, settings: &LocaleSettings) -> &'a str {
    let mut rest = path.trim_start_matches('/');
    while let Some((segment, tail)) = rest.split_once('/') {
        if settings.find_segment(segment).is_none() {
            break;
        }
        rest = tail.trim_start_matches('/');
    }
    rest
}

/// Location a bare locale root redirects to.
pub fn locale_index_location(locale: &Locale, settings: &LocaleSettings, index_file: &str) -> String {
    if settings.is_default(locale) {
        format!("/{}", index_file)
    } else {
        format!("/{}/{}", locale.tag(), index_file)
    }
}

/// Absolute or site-relative URL of `path` in `locale`.
///
/// ```
/// use polyglot_core::path::localized_url;
/// use polyglot_i18n::Locale;
///
/// let (en, de) = (Locale::new("en"), Locale::new("de"));
/// assert_eq!(localized_url(Some("https://example.com/"), "/docs/intro", &de, &en),
///            "https://example.com/de/docs/intro");
/// assert_eq!(localized_url(None, "", &en, &en), "/");
/// ```
pub fn localized_url(base_url: Option<&str>, path: &str, locale: &Locale, default: &Locale) -> String {
    let path = path.trim_start_matches('/');
    let key = if path.is_empty() {
        if locale == default {
            String::new()
        } else {
            locale.tag()
        }
    } else {
        route_key(path, locale, default)
    };

    match base_url {
        Some(base) => format!("{}/{}", base.trim_end_matches('/'), key),
        None => format!("/{}", key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn settings() -> LocaleSettings {
        LocaleSettings::parse("en", &["it", "de"]).unwrap()
    }

    #[test]
    fn test_route_key_default_unchanged() {
        let en = Locale::new("en");
        assert_eq!(route_key("docs/intro", &en, &en), "docs/intro");
    }

    #[test]
    fn test_route_key_no_partial_prefix_match() {
        let (en, it) = (Locale::new("en"), Locale::new("it"));
        assert_eq!(route_key("items", &it, &en), "it/items");
        assert_eq!(route_key("it", &it, &en), "it/it");
        assert_eq!(route_key("it/it", &it, &en), "it/it");
        assert_eq!(route_key("de", &it, &en), "it/de");
    }

    #[test]
    fn test_region_locale_prefix() {
        let en = Locale::new("en");
        let pt_br = Locale::parse("pt-BR").unwrap();
        assert_eq!(route_key("about", &pt_br, &en), "pt-BR/about");
        assert_eq!(output_path("pt-BR/about.html", &pt_br, &en), "pt-BR/about.html");
    }

    #[test]
    fn test_index_uri() {
        let (en, it) = (Locale::new("en"), Locale::new("it"));
        assert_eq!(uri("index", &en, &en), "/");
        assert_eq!(uri("index", &it, &en), "/it/index");
        assert_eq!(uri("about", &it, &en), "/it/about");
        assert_eq!(uri("about", &en, &en), "/about");
    }

    #[test]
    fn test_strip_locale_prefix() {
        let settings = settings();
        assert_eq!(strip_locale_prefix("de/it/about", &settings), "about");
        assert_eq!(strip_locale_prefix("/it/posts/x", &settings), "posts/x");
        assert_eq!(strip_locale_prefix("en/about", &settings), "about");
        assert_eq!(strip_locale_prefix("fr/about", &settings), "fr/about");
        assert_eq!(strip_locale_prefix("italy/it", &settings), "italy/it");
    }

    #[test]
    fn test_strip_keeps_locale_named_page() {
        let settings = settings();
        assert_eq!(strip_locale_prefix("it", &settings), "it");
        assert_eq!(strip_locale_prefix("/de", &settings), "de");
        assert_eq!(strip_locale_prefix("de/it", &settings), "it");
        assert_eq!(strip_locale_prefix("it/", &settings), "");
    }

    #[test]
    fn test_locale_index_location() {
        let settings = settings();
        assert_eq!(
            locale_index_location(&Locale::new("it"), &settings, "index.html"),
            "/it/index.html"
        );
        assert_eq!(
            locale_index_location(&Locale::new("en"), &settings, "index.html"),
            "/index.html"
        );
    }

    #[test]
    fn test_localized_url_locale_root() {
        let (en, it) = (Locale::new("en"), Locale::new("it"));
        assert_eq!(localized_url(None, "/", &it, &en), "/it");
        assert_eq!(localized_url(Some("https://x.dev"), "about", &en, &en), "https://x.dev/about");
    }

    fn key_strategy() -> impl Strategy<Value = String> {
        "[a-z]{1,8}(/[a-z0-9_-]{1,8}){0,3}"
    }

    fn locale_strategy() -> impl Strategy<Value = Locale> {
        prop_oneof![
            Just(Locale::new("en")),
            Just(Locale::new("it")),
            Just(Locale::new("de")),
        ]
    }

    proptest! {
        #[test]
        fn prop_route_key_idempotent(key in key_strategy(), locale in locale_strategy()) {
            let default = Locale::new("en");
            let once = route_key(&key, &locale, &default);
            let twice = route_key(&once, &locale, &default);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_default_locale_is_identity(key in key_strategy()) {
            let default = Locale::new("en");
            prop_assert_eq!(route_key(&key, &default, &default), key);
        }

        #[test]
        fn prop_prefix_never_nested(key in key_strategy(), locale in locale_strategy()) {
            let default = Locale::new("en");
            let settings = LocaleSettings::parse("en", &["it", "de"]).unwrap();
            prop_assume!(locale != default);
            prop_assume!(strip_locale_prefix(&key, &settings) == key);
            let localized = route_key(&key, &locale, &default);
            let prefix = format!("{}/", locale.tag());
            prop_assert!(localized.starts_with(&prefix));
            let doubled = format!("{}{}", prefix, prefix);
            prop_assert!(!localized.starts_with(&doubled));
        }

        #[test]
        fn prop_strip_then_derive_round_trips(key in key_strategy(), locale in locale_strategy()) {
            let settings = LocaleSettings::parse("en", &["it", "de"]).unwrap();
            let default = settings.default_locale().clone();
            let localized = route_key(&key, &locale, &default);
            let stripped = strip_locale_prefix(&localized, &settings);
            prop_assert_eq!(
                route_key(stripped, &locale, &default),
                route_key(strip_locale_prefix(&key, &settings), &locale, &default)
            );
        }
    }
}
