//! Consistency checks over the static locale, route and meta tables.
//!
//! Errors describe tables that would produce broken URLs or empty head tags;
//! warnings describe pages served with the English fallback.

use crate::i18n::Locale;
use crate::routes::{match_path, resolve_path, PageKey};
use crate::seo::meta::explicit_meta;
use std::collections::HashMap;

/// Validation report containing errors and warnings about the tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that break routing or SEO output
    pub errors: Vec<String>,

    /// Non-critical findings (missing translations covered by fallback)
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample slug for resolving the parametric post route.
const SAMPLE_SLUG: &str = "sample-slug";

/// Check every (locale, page) pair of the route and meta tables.
pub fn validate_tables() -> ValidationReport {
    let mut report = ValidationReport::new();

    for page in PageKey::ALL {
        if explicit_meta(page, Locale::fallback()).is_none() {
            report.errors.push(format!(
                "Page '{}' has no {} meta entry",
                page,
                Locale::fallback()
            ));
        }
    }

    for locale in Locale::all() {
        let mut seen: HashMap<String, PageKey> = HashMap::new();

        for page in PageKey::ALL {
            let slug = page.is_parametric().then_some(SAMPLE_SLUG);
            let path = resolve_path(locale, page, slug);

            if !path.starts_with('/') {
                report
                    .errors
                    .push(format!("[{}] {} path '{}' is not absolute", locale, page, path));
            }

            if !locale.is_default() {
                let prefix = format!("/{}", locale.code());
                if path != prefix && !path.starts_with(&format!("{}/", prefix)) {
                    report.errors.push(format!(
                        "[{}] {} path '{}' is missing the '{}' prefix",
                        locale, page, path, prefix
                    ));
                }
            }

            if let Some(other) = seen.insert(path.clone(), page) {
                report.errors.push(format!(
                    "[{}] {} and {} share the path '{}'",
                    locale, other, page, path
                ));
            }

            match match_path(&path) {
                Some(m) if m.locale == locale && m.page == page => {}
                Some(m) => report.errors.push(format!(
                    "[{}] {} path '{}' matches {}/{} instead",
                    locale, page, path, m.locale, m.page
                )),
                None => report.errors.push(format!(
                    "[{}] {} path '{}' is not matched by the router",
                    locale, page, path
                )),
            }

            if locale != Locale::fallback() && explicit_meta(page, locale).is_none() {
                report.warnings.push(format!(
                    "[{}] {} meta falls back to {}",
                    locale,
                    page,
                    Locale::fallback()
                ));
            }
        }
    }

    report
}
