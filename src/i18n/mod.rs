//! Internationalization (i18n) module for multi-locale support.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported locales and their metadata
//! - `locale`: Type-safe `Locale` validated against the registry
//! - `strings`: Localized UI strings with English fallback
//! - `validator`: Consistency checks over the route, meta and locale tables
//!
//! # Example
//!
//! ```rust,ignore
//! use williams_jullin_site::i18n::Locale;
//!
//! let german = Locale::from_code("de")?;
//! assert_eq!(german.bcp47(), "de-DE");
//! ```

mod locale;
mod registry;
mod strings;
mod validator;

pub use locale::Locale;
pub use registry::{LocaleConfig, LocaleRegistry};
pub use strings::UiStrings;
pub use validator::{validate_tables, ValidationReport};
