//! Canonical URLs and hreflang alternates.

use crate::i18n::Locale;
use crate::routes::{resolve_path, PageKey};
use serde::Serialize;

/// hreflang value of the fallback alternate.
pub const X_DEFAULT: &str = "x-default";

/// Production origin of the site.
pub const DEFAULT_BASE_URL: &str = "https://williamsjullin.com";

/// One hreflang annotation: a locale code (or `x-default`) and an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternateLink {
    pub href_lang: &'static str,
    pub href: String,
}

/// Absolute-URL builder bound to a site origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    base_url: String,
}

impl Site {
    /// Create a site for an origin. A trailing slash is dropped.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join the origin with an absolute path.
    pub fn absolute(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// The single authoritative URL for a (locale, page) pair.
    pub fn canonical(&self, locale: Locale, page: PageKey, slug: Option<&str>) -> String {
        self.absolute(&resolve_path(locale, page, slug))
    }

    /// hreflang alternates for a page: one entry per locale in declared
    /// order, then one `x-default` entry pointing at the English URL.
    pub fn alternates(&self, page: PageKey, slug: Option<&str>) -> Vec<AlternateLink> {
        let mut links: Vec<AlternateLink> = Locale::all()
            .map(|locale| AlternateLink {
                href_lang: locale.code(),
                href: self.canonical(locale, page, slug),
            })
            .collect();

        links.push(AlternateLink {
            href_lang: X_DEFAULT,
            href: self.canonical(Locale::fallback(), page, slug),
        });

        links
    }
}

impl Default for Site {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
