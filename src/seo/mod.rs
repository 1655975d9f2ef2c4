//! SEO layer: canonical URLs, hreflang alternates, meta dictionary and
//! head-tag management. Everything here is a pure function of the static
//! tables plus its inputs, except `HeadManager` which owns a mutable
//! `HeadDocument`.

pub mod head;
pub mod links;
pub mod meta;

pub use head::{HeadDiff, HeadDocument, HeadManager, HeadTag, PageHead};
pub use links::{AlternateLink, Site, DEFAULT_BASE_URL, X_DEFAULT};
pub use meta::{meta_for, MetaEntry};
