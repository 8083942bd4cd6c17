//! Locale codes and the configured locale set
//!
//! A [`Locale`] is the short code used both as a URL prefix and as the
//! name of a translation file. [`LocaleSettings`] pairs the default locale
//! with the ordered list of supported locales.

use crate::{I18nError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A locale (language + optional script and region).
///
/// # Examples
///
/// ```
/// use polyglot_i18n::Locale;
///
/// let it = Locale::parse("it").unwrap();
/// let pt_br = Locale::parse("pt_br").unwrap();
/// assert_eq!(it.tag(), "it");
/// assert_eq!(pt_br.tag(), "pt-BR");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    /// Language code (ISO 639-1, e.g., "en", "it", "de")
    pub language: String,
    /// Optional script (e.g., "Latn", "Hans")
    pub script: Option<String>,
    /// Optional region code (ISO 3166-1, e.g., "US", "BR")
    pub region: Option<String>,
}

impl Locale {
    /// Create a language-only locale.
    ///
    /// No validation is performed; use [`Locale::parse`] for input that
    /// comes from configuration or URLs.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into().to_lowercase(),
            script: None,
            region: None,
        }
    }

    /// Parse from a BCP 47 style tag (e.g., "en", "pt-BR", "zh_Hans_CN").
    pub fn parse(tag: &str) -> Result<Self> {
        let parts: Vec<&str> = tag.trim().split(['-', '_']).collect();

        let language = parts
            .first()
            .map(|p| p.to_lowercase())
            .filter(|l| (2..=3).contains(&l.len()) && l.chars().all(|c| c.is_ascii_alphabetic()))
            .ok_or_else(|| I18nError::InvalidLocale(tag.to_string()))?;

        let mut script = None;
        let mut region = None;

        for part in parts.iter().skip(1) {
            if part.len() == 4 && part.chars().all(|c| c.is_ascii_alphabetic()) && script.is_none() && region.is_none() {
                script = Some(title_case(part));
            } else if part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()) && region.is_none() {
                region = Some(part.to_uppercase());
            } else if part.len() == 3 && part.chars().all(|c| c.is_ascii_digit()) && region.is_none() {
                region = Some(part.to_string());
            } else {
                return Err(I18nError::InvalidLocale(tag.to_string()));
            }
        }

        Ok(Self {
            language,
            script,
            region,
        })
    }

    /// Get the canonical tag (e.g., "pt-BR").
    pub fn tag(&self) -> String {
        let mut tag = self.language.clone();
        if let Some(ref script) = self.script {
            tag.push('-');
            tag.push_str(script);
        }
        if let Some(ref region) = self.region {
            tag.push('-');
            tag.push_str(region);
        }
        tag
    }

    /// Get language-only locale (strips script and region).
    pub fn language_only(&self) -> Self {
        Self::new(self.language.clone())
    }

    /// Check whether a URL or path segment names this locale.
    pub fn is_segment(&self, segment: &str) -> bool {
        segment == self.tag()
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self> {
        Locale::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = I18nError;

    fn try_from(value: String) -> Result<Self> {
        Locale::parse(&value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.tag()
    }
}

/// The default locale together with every supported locale.
///
/// The default locale is always a member of the supported set and is
/// served without a URL prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSettings {
    default: Locale,
    supported: Vec<Locale>,
}

impl LocaleSettings {
    /// Create settings from a default locale and a supported list.
    ///
    /// The default is inserted at the front when the list omits it, and
    /// duplicates keep their first position.
    pub fn new(default: Locale, supported: impl IntoIterator<Item = Locale>) -> Self {
        let mut ordered: Vec<Locale> = Vec::new();
        for locale in supported {
            if !ordered.contains(&locale) {
                ordered.push(locale);
            }
        }

        if !ordered.contains(&default) {
            ordered.insert(0, default.clone());
        }

        Self {
            default,
            supported: ordered,
        }
    }

    /// Parse settings from raw codes.
    pub fn parse<S: AsRef<str>>(default: &str, supported: &[S]) -> Result<Self> {
        let default = Locale::parse(default)?;
        let supported = supported
            .iter()
            .map(|code| Locale::parse(code.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(default, supported))
    }

    /// The locale served without a prefix.
    pub fn default_locale(&self) -> &Locale {
        &self.default
    }

    /// Every supported locale, default included, in configured order.
    pub fn supported(&self) -> &[Locale] {
        &self.supported
    }

    /// Supported locales other than the default.
    pub fn non_default(&self) -> impl Iterator<Item = &Locale> {
        self.supported.iter().filter(move |l| **l != self.default)
    }

    /// Check if a locale is the default one.
    pub fn is_default(&self, locale: &Locale) -> bool {
        *locale == self.default
    }

    /// Check if a locale is part of the supported set.
    pub fn is_supported(&self, locale: &Locale) -> bool {
        self.supported.contains(locale)
    }

    /// Find the supported locale named by a path segment.
    pub fn find_segment(&self, segment: &str) -> Option<&Locale> {
        if segment.is_empty() {
            return None;
        }
        self.supported.iter().find(|l| l.is_segment(segment))
    }

    /// Ensure a locale is supported, returning it unchanged.
    pub fn require(&self, locale: Locale) -> Result<Locale> {
        if self.is_supported(&locale) {
            Ok(locale)
        } else {
            Err(I18nError::UnsupportedLocale(locale.tag()))
        }
    }
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self::new(Locale::new("en"), Vec::new())
    }
}
