//! Localized UI strings.
//!
//! Catalogs are flat JSON objects compiled into the binary. Missing keys
//! render as the key itself, and `{name}` placeholders are filled by
//! [`I18n::format`].

use std::collections::HashMap;
use std::env;

/// Bundled catalogs by language code. The first entry is the fallback.
const CATALOGS: &[(&str, &str)] = &[("en", include_str!("../i18n/en.json"))];

/// Environment variables consulted for the locale, highest priority first
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

#[derive(Clone, Debug)]
pub struct I18n {
    locale: String,
    messages: HashMap<String, String>,
}

impl I18n {
    /// Load strings for the given locale, or the one detected from the environment.
    pub fn load(locale: Option<&str>) -> Self {
        let locale = locale
            .and_then(normalize_locale)
            .or_else(detect_locale)
            .unwrap_or_else(|| "en".to_string());
        let messages = catalog_for(&locale);
        Self { locale, messages }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Look up a string; unknown keys come back unchanged.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.messages.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Look up a string and fill its `{name}` placeholders.
    pub fn format(&self, key: &str, params: &[(&str, &str)]) -> String {
        params
            .iter()
            .fold(self.t(key).to_string(), |text, (name, value)| {
                text.replace(&format!("{{{name}}}"), value)
            })
    }
}

fn detect_locale() -> Option<String> {
    LOCALE_VARS
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find_map(|value| normalize_locale(&value))
}

/// `en-US.UTF-8` becomes `en_us`; blank input is no locale at all.
fn normalize_locale(raw: &str) -> Option<String> {
    let tag = raw.trim().split('.').next().unwrap_or_default();
    (!tag.is_empty()).then(|| tag.replace('-', "_").to_lowercase())
}

fn catalog_for(locale: &str) -> HashMap<String, String> {
    let language = locale.split('_').next().unwrap_or(locale);
    let (code, raw) = CATALOGS
        .iter()
        .find(|(code, _)| *code == language)
        .or_else(|| CATALOGS.first())
        .copied()
        .unwrap_or(("en", "{}"));
    if code != language {
        tracing::debug!("No catalog for locale {}, using {}", locale, code);
    }

    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!("Bundled {} catalog is invalid: {}", code, e);
        HashMap::new()
    })
}
