//! Locale type: validated locale representation.
//!
//! A `Locale` can only be built from a code present in the registry, so every
//! downstream lookup (paths, meta, strings) can treat it as total.

use crate::i18n::{LocaleConfig, LocaleRegistry};
use anyhow::{bail, Result};
use std::fmt;

/// A validated locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    /// Short locale code (e.g., "fr", "en")
    code: &'static str,
}

impl Locale {
    pub const FRENCH: Locale = Locale { code: "fr" };
    pub const ENGLISH: Locale = Locale { code: "en" };
    pub const SPANISH: Locale = Locale { code: "es" };
    pub const GERMAN: Locale = Locale { code: "de" };
    pub const PORTUGUESE: Locale = Locale { code: "pt" };
    pub const RUSSIAN: Locale = Locale { code: "ru" };
    pub const CHINESE: Locale = Locale { code: "zh" };

    /// Create a Locale from a code string.
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is in the registry
    /// * `Err` if the code is unknown
    pub fn from_code(code: &str) -> Result<Locale> {
        match LocaleRegistry::get().get_by_code(code) {
            Some(config) => Ok(Locale { code: config.code }),
            None => bail!("Unknown locale code: '{}'", code),
        }
    }

    /// The locale served at the site root.
    pub fn default_locale() -> Locale {
        Locale {
            code: LocaleRegistry::get().default_locale().code,
        }
    }

    /// The locale used when a translation is missing and as the x-default target.
    pub fn fallback() -> Locale {
        Locale::ENGLISH
    }

    /// All supported locales in declared order.
    pub fn all() -> impl Iterator<Item = Locale> {
        LocaleRegistry::get()
            .list()
            .iter()
            .map(|config| Locale { code: config.code })
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full locale configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is not in the registry, which cannot happen for a
    /// Locale built through `from_code` or the constants.
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_code(self.code)
            .expect("Locale code should always be valid")
    }

    /// BCP-47 tag for the `<html lang>` attribute (e.g., `fr` → `fr-FR`).
    pub fn bcp47(&self) -> &'static str {
        self.config().bcp47
    }

    pub fn og_locale(&self) -> &'static str {
        self.config().og_locale
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_constants_match_registry() {
        let constants = [
            Locale::FRENCH,
            Locale::ENGLISH,
            Locale::SPANISH,
            Locale::GERMAN,
            Locale::PORTUGUESE,
            Locale::RUSSIAN,
            Locale::CHINESE,
        ];
        let all: Vec<_> = Locale::all().collect();
        assert_eq!(all, constants.to_vec());
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_valid() {
        let german = Locale::from_code("de").expect("Should succeed");
        assert_eq!(german, Locale::GERMAN);
        assert_eq!(german.bcp47(), "de-DE");
    }

    #[test]
    fn test_from_code_invalid() {
        let result = Locale::from_code("it");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown"));
    }

    #[test]
    fn test_from_code_is_case_sensitive() {
        assert!(Locale::from_code("FR").is_err());
    }

    #[test]
    fn test_from_code_empty() {
        assert!(Locale::from_code("").is_err());
    }

    // ==================== Accessor Tests ====================

    #[test]
    fn test_default_locale_is_french() {
        assert_eq!(Locale::default_locale(), Locale::FRENCH);
        assert!(Locale::FRENCH.is_default());
        assert!(!Locale::ENGLISH.is_default());
    }

    #[test]
    fn test_fallback_is_english() {
        assert_eq!(Locale::fallback(), Locale::ENGLISH);
    }

    #[test]
    fn test_bcp47_mapping() {
        assert_eq!(Locale::FRENCH.bcp47(), "fr-FR");
        assert_eq!(Locale::ENGLISH.bcp47(), "en-US");
        assert_eq!(Locale::CHINESE.bcp47(), "zh-CN");
    }

    #[test]
    fn test_og_locale() {
        assert_eq!(Locale::PORTUGUESE.og_locale(), "pt_PT");
    }

    #[test]
    fn test_display_is_code() {
        assert_eq!(Locale::RUSSIAN.to_string(), "ru");
    }

    #[test]
    fn test_native_name() {
        assert_eq!(Locale::CHINESE.native_name(), "中文");
        assert_eq!(Locale::SPANISH.native_name(), "Español");
    }
}
