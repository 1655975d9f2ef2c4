//! Localized route table.
//!
//! One `RouteMap` per locale maps every logical page to its path. The default
//! locale is served from the root; every other locale lives under `/{code}`.
//! This table is the only place paths are spelled out: the SEO layer, the
//! HTTP matcher and the sitemap generator all read from it.

use crate::i18n::Locale;
use serde::Serialize;
use std::fmt;

/// Logical page identifier, independent of its localized path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKey {
    Home,
    Story,
    Blog,
    Contact,
    Media,
    Investors,
    Post,
}

impl PageKey {
    /// Every page key, parametric `Post` last.
    pub const ALL: [PageKey; 7] = [
        PageKey::Home,
        PageKey::Story,
        PageKey::Blog,
        PageKey::Contact,
        PageKey::Media,
        PageKey::Investors,
        PageKey::Post,
    ];

    /// Pages with a fixed path in every locale.
    pub const STATIC: [PageKey; 6] = [
        PageKey::Home,
        PageKey::Story,
        PageKey::Blog,
        PageKey::Contact,
        PageKey::Media,
        PageKey::Investors,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageKey::Home => "home",
            PageKey::Story => "story",
            PageKey::Blog => "blog",
            PageKey::Contact => "contact",
            PageKey::Media => "media",
            PageKey::Investors => "investors",
            PageKey::Post => "post",
        }
    }

    pub fn is_parametric(&self) -> bool {
        matches!(self, PageKey::Post)
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Localized paths for one locale.
#[derive(Debug, Clone, Copy)]
pub struct RouteMap {
    pub locale: &'static str,
    pub home: &'static str,
    pub story: &'static str,
    pub blog: &'static str,
    pub contact: &'static str,
    pub media: &'static str,
    pub investors: &'static str,
    /// Blog posts live at `{post_prefix}/{slug}`
    pub post_prefix: &'static str,
}

impl RouteMap {
    /// Path of a blog post.
    pub fn post(&self, slug: &str) -> String {
        format!("{}/{}", self.post_prefix, slug)
    }

    /// Fixed path of a non-parametric page. `Post` yields the blog listing.
    pub fn fixed(&self, page: PageKey) -> &'static str {
        match page {
            PageKey::Home => self.home,
            PageKey::Story => self.story,
            PageKey::Blog | PageKey::Post => self.blog,
            PageKey::Contact => self.contact,
            PageKey::Media => self.media,
            PageKey::Investors => self.investors,
        }
    }
}

static ROUTES: [RouteMap; 7] = [
    RouteMap {
        locale: "fr",
        home: "/",
        story: "/mon-histoire",
        blog: "/blog",
        contact: "/contact",
        media: "/medias",
        investors: "/investisseurs",
        post_prefix: "/blog",
    },
    RouteMap {
        locale: "en",
        home: "/en",
        story: "/en/my-story",
        blog: "/en/blog",
        contact: "/en/contact",
        media: "/en/media",
        investors: "/en/investors",
        post_prefix: "/en/blog",
    },
    RouteMap {
        locale: "es",
        home: "/es",
        story: "/es/mi-historia",
        blog: "/es/blog",
        contact: "/es/contacto",
        media: "/es/medios",
        investors: "/es/inversores",
        post_prefix: "/es/blog",
    },
    RouteMap {
        locale: "de",
        home: "/de",
        story: "/de/meine-geschichte",
        blog: "/de/blog",
        contact: "/de/kontakt",
        media: "/de/medien",
        investors: "/de/investoren",
        post_prefix: "/de/blog",
    },
    RouteMap {
        locale: "pt",
        home: "/pt",
        story: "/pt/minha-historia",
        blog: "/pt/blog",
        contact: "/pt/contato",
        media: "/pt/midia",
        investors: "/pt/investidores",
        post_prefix: "/pt/blog",
    },
    RouteMap {
        locale: "ru",
        home: "/ru",
        story: "/ru/моя-история",
        blog: "/ru/блог",
        contact: "/ru/контакты",
        media: "/ru/сми",
        investors: "/ru/инвесторы",
        post_prefix: "/ru/блог",
    },
    RouteMap {
        locale: "zh",
        home: "/zh",
        story: "/zh/我的故事",
        blog: "/zh/博客",
        contact: "/zh/联系",
        media: "/zh/媒体",
        investors: "/zh/投资者",
        post_prefix: "/zh/博客",
    },
];

/// Route map for a locale.
///
/// # Panics
/// Panics if the locale has no route map. Every registry locale has one; the
/// table validator and unit tests enforce it.
pub fn route_map(locale: Locale) -> &'static RouteMap {
    ROUTES
        .iter()
        .find(|map| map.locale == locale.code())
        .expect("Every supported locale should have a route map")
}

/// Resolve the localized path of a page.
///
/// `slug` is only consulted for `PageKey::Post`; a post without a slug
/// resolves to the blog listing. Slugs are opaque and inserted verbatim.
pub fn resolve_path(locale: Locale, page: PageKey, slug: Option<&str>) -> String {
    let map = route_map(locale);
    match (page, slug) {
        (PageKey::Post, Some(slug)) if !slug.is_empty() => map.post(slug),
        _ => map.fixed(page).to_string(),
    }
}

/// Result of matching a request path against the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub locale: Locale,
    pub page: PageKey,
    pub slug: Option<String>,
}

/// Reverse lookup: map a (percent-decoded) request path to its page.
///
/// A trailing slash is ignored. Returns `None` for paths not in the table.
pub fn match_path(path: &str) -> Option<RouteMatch> {
    let normalized = normalize_path(path);

    for locale in Locale::all() {
        let map = route_map(locale);
        for page in PageKey::STATIC {
            if map.fixed(page) == normalized {
                return Some(RouteMatch {
                    locale,
                    page,
                    slug: None,
                });
            }
        }
    }

    for locale in Locale::all() {
        let map = route_map(locale);
        let Some(rest) = normalized
            .strip_prefix(map.post_prefix)
            .and_then(|rest| rest.strip_prefix('/'))
        else {
            continue;
        };
        if !rest.is_empty() && !rest.contains('/') {
            return Some(RouteMatch {
                locale,
                page: PageKey::Post,
                slug: Some(rest.to_string()),
            });
        }
    }

    None
}

fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Percent-encode every byte of `url` outside the RFC 3986 unreserved and
/// reserved sets, turning an IRI such as `/zh/联系` into a plain URI.
/// Existing `%XX` escapes are left alone.
pub fn percent_encode_uri(url: &str) -> String {
    const KEEP: &[u8] = b"-._~:/?#[]@!$&'()*+,;=%";

    let mut out = String::with_capacity(url.len());
    for &byte in url.as_bytes() {
        if byte.is_ascii_alphanumeric() || KEEP.contains(&byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

/// Decode `%XX` escapes in a request path. Invalid escapes are kept as-is.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let h1 = bytes[i + 1] as char;
            let h2 = bytes[i + 2] as char;
            if let (Some(a), Some(b)) = (h1.to_digit(16), h2.to_digit(16)) {
                out.push(((a << 4) + b) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
