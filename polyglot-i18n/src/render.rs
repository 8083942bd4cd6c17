//! Translation placeholders in page content
//!
//! Content files may embed `{{ __('key') }}` (single or double quotes, any
//! inner whitespace). Rendering swaps each one for its translation.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\{\{\s*__\(\s*(?:'([^']+)'|"([^"]+)")\s*\)\s*\}\}"#).unwrap()
});

/// Replace every placeholder using `translate(key)`.
pub fn render_placeholders(content: &str, translate: impl Fn(&str) -> String) -> String {
    PLACEHOLDER
        .replace_all(content, |caps: &Captures<'_>| {
            let key = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map_or("", |m| m.as_str());
            translate(key)
        })
        .into_owned()
}

/// Keys referenced by placeholders, in order of appearance.
pub fn placeholder_keys(content: &str) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_styles_and_spacing() {
        let out = render_placeholders(
            "{{ __('a') }} {{__(\"b\")}} {{   __( 'c' )   }}",
            |k| k.to_uppercase(),
        );
        assert_eq!(out, "A B C");
    }

    #[test]
    fn test_untouched_without_placeholders() {
        let content = "{{ $title }} and {{ __(missing_quotes) }}";
        assert_eq!(render_placeholders(content, |_| "x".to_string()), content);
    }

    #[test]
    fn test_placeholder_keys() {
        let keys = placeholder_keys("{{ __('nav.home') }} text {{ __(\"nav.about\") }}");
        assert_eq!(keys, vec!["nav.home", "nav.about"]);
    }
}
