//! Locale-aware text collation for non-digit segments

use icu_collator::{Collator, CollatorOptions, Numeric};
use icu_locid::Locale;
use icu_provider::DataLocale;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, warn};

/// Which collation orders text segments
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Collation {
    /// Collation of the operating system's locale
    #[default]
    System,
    /// Collation of an explicit BCP-47 locale, such as `zh-CN` or `sv`
    Locale(String),
    /// Unicode code-point order, no locale data
    CodePoint,
}

impl From<String> for Collation {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "system" | "" => Collation::System,
            "code-point" | "codepoint" => Collation::CodePoint,
            _ => Collation::Locale(value),
        }
    }
}

impl From<Collation> for String {
    fn from(value: Collation) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Collation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collation::System => write!(f, "system"),
            Collation::Locale(tag) => write!(f, "{}", tag),
            Collation::CodePoint => write!(f, "code-point"),
        }
    }
}

/// A resolved collation backend
pub(crate) enum TextCollator {
    Icu(Box<Collator>),
    CodePoint,
}

impl TextCollator {
    /// Resolve a [`Collation`] into a usable backend
    ///
    /// Never fails: an unknown or unparsable locale falls back to the root
    /// collation, and missing root data falls back to code-point order.
    pub(crate) fn resolve(collation: &Collation) -> (Self, Option<String>) {
        let tag = match collation {
            Collation::CodePoint => return (TextCollator::CodePoint, None),
            Collation::System => system_locale_tag(),
            Collation::Locale(tag) => Some(normalize_tag(tag)),
        };

        let locale = tag
            .as_deref()
            .and_then(|t| match t.parse::<Locale>() {
                Ok(locale) => Some(locale),
                Err(e) => {
                    warn!(tag = t, error = ?e, "Unparsable locale, using root collation");
                    None
                }
            })
            .unwrap_or(Locale::UND);

        let resolved = locale.to_string();
        let mut options = CollatorOptions::new();
        options.numeric = Some(Numeric::On);

        match Collator::try_new(&DataLocale::from(locale), options) {
            Ok(collator) => {
                debug!(locale = %resolved, "Using ICU collation");
                (TextCollator::Icu(Box::new(collator)), Some(resolved))
            }
            Err(e) => {
                warn!(locale = %resolved, error = ?e, "No collation data, using code-point order");
                (TextCollator::CodePoint, None)
            }
        }
    }

    /// Order two text segments
    pub(crate) fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            TextCollator::Icu(collator) => collator.compare(a, b),
            TextCollator::CodePoint => a.cmp(b),
        }
    }
}

/// Detect the operating system locale as a BCP-47 tag
fn system_locale_tag() -> Option<String> {
    let tag = sys_locale::get_locale().map(|raw| normalize_tag(&raw));
    debug!(?tag, "Detected system locale");
    tag
}

/// Turn POSIX-style names such as `zh_CN.UTF-8` into `zh-CN`
fn normalize_tag(raw: &str) -> String {
    raw.split(['.', '@'])
        .next()
        .unwrap_or_default()
        .replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collation_from_string() {
        assert_eq!(Collation::from("system".to_string()), Collation::System);
        assert_eq!(Collation::from("Code-Point".to_string()), Collation::CodePoint);
        assert_eq!(
            Collation::from("zh-CN".to_string()),
            Collation::Locale("zh-CN".into())
        );
    }

    #[test]
    fn test_collation_display_round_trip() {
        for collation in [
            Collation::System,
            Collation::CodePoint,
            Collation::Locale("de".into()),
        ] {
            assert_eq!(Collation::from(collation.to_string()), collation);
        }
    }

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("zh_CN.UTF-8"), "zh-CN");
        assert_eq!(normalize_tag("de_DE@euro"), "de-DE");
        assert_eq!(normalize_tag("en-US"), "en-US");
    }

    #[test]
    fn test_code_point_backend() {
        let (backend, locale) = TextCollator::resolve(&Collation::CodePoint);
        assert!(locale.is_none());
        assert_eq!(backend.compare("B", "a"), Ordering::Less);
    }

    #[test]
    fn test_icu_backend_orders_letters_alphabetically() {
        let (backend, locale) = TextCollator::resolve(&Collation::Locale("en".into()));
        assert_eq!(locale.as_deref(), Some("en"));
        assert_eq!(backend.compare("a", "B"), Ordering::Less);
        assert_eq!(backend.compare("B", "c"), Ordering::Less);
        assert_eq!(backend.compare("é", "f"), Ordering::Less);
    }

    #[test]
    fn test_bad_locale_falls_back_to_root() {
        let (backend, locale) = TextCollator::resolve(&Collation::Locale("not a locale!".into()));
        assert_eq!(locale.as_deref(), Some("und"));
        assert_eq!(backend.compare("a", "B"), Ordering::Less);
    }
}
