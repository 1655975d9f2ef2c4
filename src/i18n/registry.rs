//! Locale registry: Single source of truth for all supported locales.
//!
//! The registry is a lazily-initialized singleton (`OnceLock`). Declaration
//! order matters: it is the order used for hreflang alternates, sitemap
//! entries and the language switcher.

use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// Short locale code used in URLs and hreflang (e.g., "fr", "en", "zh")
    pub code: &'static str,

    /// English name of the language (e.g., "French", "Chinese")
    pub name: &'static str,

    /// Native name of the language (e.g., "Français", "中文")
    pub native_name: &'static str,

    /// BCP-47 tag emitted as the `<html lang>` attribute (e.g., "fr-FR")
    pub bcp47: &'static str,

    /// Open Graph locale (e.g., "fr_FR")
    pub og_locale: &'static str,

    /// Whether this locale is served at the site root without a prefix
    /// (only one should be true)
    pub is_default: bool,
}

/// Global locale registry singleton.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get a locale configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LocaleConfig)` if the locale exists
    /// * `None` if the locale is not supported
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// All locales in declared order.
    pub fn list(&self) -> &[LocaleConfig] {
        &self.locales
    }

    /// Get the default (root-served) locale configuration.
    ///
    /// # Panics
    /// Panics if zero or several locales are flagged as default. This is a
    /// configuration error in the static table, caught by the unit tests.
    pub fn default_locale(&self) -> &LocaleConfig {
        let defaults: Vec<_> = self
            .locales
            .iter()
            .filter(|locale| locale.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default locale found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default locales found in registry"),
        }
    }

    /// Check if a locale code is supported.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }
}

/// Supported locales, in the order alternates are emitted.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "fr",
            name: "French",
            native_name: "Français",
            bcp47: "fr-FR",
            og_locale: "fr_FR",
            is_default: true,
        },
        LocaleConfig {
            code: "en",
            name: "English",
            native_name: "English",
            bcp47: "en-US",
            og_locale: "en_US",
            is_default: false,
        },
        LocaleConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            bcp47: "es-ES",
            og_locale: "es_ES",
            is_default: false,
        },
        LocaleConfig {
            code: "de",
            name: "German",
            native_name: "Deutsch",
            bcp47: "de-DE",
            og_locale: "de_DE",
            is_default: false,
        },
        LocaleConfig {
            code: "pt",
            name: "Portuguese",
            native_name: "Português",
            bcp47: "pt-PT",
            og_locale: "pt_PT",
            is_default: false,
        },
        LocaleConfig {
            code: "ru",
            name: "Russian",
            native_name: "Русский",
            bcp47: "ru-RU",
            og_locale: "ru_RU",
            is_default: false,
        },
        LocaleConfig {
            code: "zh",
            name: "Chinese",
            native_name: "中文",
            bcp47: "zh-CN",
            og_locale: "zh_CN",
            is_default: false,
        },
    ]
}
