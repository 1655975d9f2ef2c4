//! Declarative document-head management.
//!
//! Pages declare the tags they want as a `PageHead`. A `HeadManager` applies
//! that declaration to a `HeadDocument`, remembering the node ids it inserted.
//! On the next page it removes exactly its own nodes that are no longer
//! declared and leaves every other node (charset, stylesheets, tags owned by
//! someone else) untouched.

use crate::html::{escape_html, escape_script_json};
use crate::i18n::Locale;
use crate::routes::PageKey;
use crate::seo::links::{AlternateLink, Site};
use crate::seo::meta::meta_for;
use serde::Serialize;
use std::fmt::Write;

pub const SITE_NAME: &str = "Williams Jullin";

/// Attribute that names a `<meta>` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaAttr {
    Name,
    Property,
}

impl MetaAttr {
    fn as_str(&self) -> &'static str {
        match self {
            MetaAttr::Name => "name",
            MetaAttr::Property => "property",
        }
    }
}

/// One element of the document head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum HeadTag {
    Charset {
        charset: String,
    },
    Title {
        text: String,
    },
    Meta {
        attr: MetaAttr,
        key: String,
        content: String,
    },
    Link {
        rel: String,
        href: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        hreflang: Option<String>,
    },
    JsonLd {
        id: String,
        json: String,
    },
}

impl HeadTag {
    pub fn title(text: impl Into<String>) -> Self {
        HeadTag::Title { text: text.into() }
    }

    pub fn name(key: impl Into<String>, content: impl Into<String>) -> Self {
        HeadTag::Meta {
            attr: MetaAttr::Name,
            key: key.into(),
            content: content.into(),
        }
    }

    pub fn property(key: impl Into<String>, content: impl Into<String>) -> Self {
        HeadTag::Meta {
            attr: MetaAttr::Property,
            key: key.into(),
            content: content.into(),
        }
    }

    pub fn link(rel: impl Into<String>, href: impl Into<String>) -> Self {
        HeadTag::Link {
            rel: rel.into(),
            href: href.into(),
            hreflang: None,
        }
    }

    pub fn alternate(link: &AlternateLink) -> Self {
        HeadTag::Link {
            rel: "alternate".to_string(),
            href: link.href.clone(),
            hreflang: Some(link.href_lang.to_string()),
        }
    }

    /// Serialized JSON-LD script block.
    pub fn json_ld(id: impl Into<String>, value: &serde_json::Value) -> Self {
        HeadTag::JsonLd {
            id: id.into(),
            json: value.to_string(),
        }
    }

    /// Render the tag as HTML.
    pub fn render(&self) -> String {
        match self {
            HeadTag::Charset { charset } => format!("<meta charset=\"{}\">", escape_html(charset)),
            HeadTag::Title { text } => format!("<title>{}</title>", escape_html(text)),
            HeadTag::Meta { attr, key, content } => format!(
                "<meta {}=\"{}\" content=\"{}\">",
                attr.as_str(),
                escape_html(key),
                escape_html(content)
            ),
            HeadTag::Link { rel, href, hreflang } => match hreflang {
                Some(lang) => format!(
                    "<link rel=\"{}\" hreflang=\"{}\" href=\"{}\">",
                    escape_html(rel),
                    escape_html(lang),
                    escape_html(href)
                ),
                None => format!(
                    "<link rel=\"{}\" href=\"{}\">",
                    escape_html(rel),
                    escape_html(href)
                ),
            },
            HeadTag::JsonLd { id, json } => format!(
                "<script type=\"application/ld+json\" id=\"{}\">{}</script>",
                escape_html(id),
                escape_script_json(json)
            ),
        }
    }
}

/// The full set of head tags a page declares, plus its `<html lang>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageHead {
    pub lang: String,
    pub tags: Vec<HeadTag>,
}

impl PageHead {
    /// Build the declared head of a localized page.
    ///
    /// Emits title, description, canonical, one alternate per hreflang entry
    /// (x-default included), Open Graph and Twitter tags mirroring the meta
    /// entry, then the caller's JSON-LD blocks in order.
    pub fn for_page(
        site: &Site,
        locale: Locale,
        page: PageKey,
        slug: Option<&str>,
        json_ld: &[serde_json::Value],
    ) -> Self {
        let meta = meta_for(page, locale);
        let canonical = site.canonical(locale, page, slug);
        let og_type = if page == PageKey::Post { "article" } else { "website" };

        let mut tags = vec![
            HeadTag::title(meta.title),
            HeadTag::name("description", meta.description),
            HeadTag::link("canonical", canonical.as_str()),
        ];

        tags.extend(site.alternates(page, slug).iter().map(HeadTag::alternate));

        tags.extend([
            HeadTag::property("og:type", og_type),
            HeadTag::property("og:site_name", SITE_NAME),
            HeadTag::property("og:title", meta.title),
            HeadTag::property("og:description", meta.description),
            HeadTag::property("og:url", canonical.as_str()),
            HeadTag::property("og:locale", locale.og_locale()),
        ]);
        tags.extend(
            Locale::all()
                .filter(|other| *other != locale)
                .map(|other| HeadTag::property("og:locale:alternate", other.og_locale())),
        );

        tags.extend([
            HeadTag::name("twitter:card", "summary_large_image"),
            HeadTag::name("twitter:title", meta.title),
            HeadTag::name("twitter:description", meta.description),
        ]);

        tags.extend(
            json_ld
                .iter()
                .enumerate()
                .map(|(i, value)| HeadTag::json_ld(format!("jsonld-{}", i), value)),
        );

        Self {
            lang: locale.bcp47().to_string(),
            tags,
        }
    }

    /// Head of the not-found page: title and `noindex`, no canonical.
    pub fn not_found(locale: Locale, title: &str) -> Self {
        Self {
            lang: locale.bcp47().to_string(),
            tags: vec![
                HeadTag::title(format!("{} | {}", title, SITE_NAME)),
                HeadTag::name("robots", "noindex"),
            ],
        }
    }
}

/// Identifier of a node inside a `HeadDocument`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

#[derive(Debug, Clone)]
struct HeadNode {
    id: NodeId,
    tag: HeadTag,
}

/// In-memory document head: an ordered node list plus the `<html lang>` value.
#[derive(Debug, Clone)]
pub struct HeadDocument {
    html_lang: String,
    nodes: Vec<HeadNode>,
    next_id: u64,
}

impl HeadDocument {
    pub fn new(html_lang: impl Into<String>) -> Self {
        Self {
            html_lang: html_lang.into(),
            nodes: Vec::new(),
            next_id: 0,
        }
    }

    /// Document pre-populated with the static tags every page shares.
    pub fn with_defaults() -> Self {
        let mut doc = Self::new(Locale::default_locale().bcp47());
        doc.insert(HeadTag::Charset {
            charset: "utf-8".to_string(),
        });
        doc.insert(HeadTag::name("viewport", "width=device-width, initial-scale=1"));
        doc.insert(HeadTag::link("icon", "/favicon.svg"));
        doc.insert(HeadTag::link("stylesheet", "/assets/site.css"));
        doc
    }

    pub fn insert(&mut self, tag: HeadTag) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push(HeadNode { id, tag });
        id
    }

    pub fn remove(&mut self, id: NodeId) -> Option<HeadTag> {
        let index = self.nodes.iter().position(|node| node.id == id)?;
        Some(self.nodes.remove(index).tag)
    }

    pub fn html_lang(&self) -> &str {
        &self.html_lang
    }

    pub fn set_html_lang(&mut self, lang: impl Into<String>) {
        self.html_lang = lang.into();
    }

    pub fn tags(&self) -> impl Iterator<Item = &HeadTag> {
        self.nodes.iter().map(|node| &node.tag)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Inner HTML of `<head>`, one tag per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            let _ = writeln!(out, "{}", node.tag.render());
        }
        out
    }
}

/// Tags inserted and removed by one transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadDiff {
    pub added: Vec<HeadTag>,
    pub removed: Vec<HeadTag>,
}

impl HeadDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Owner of the page-specific part of a document head.
#[derive(Debug, Default)]
pub struct HeadManager {
    owned: Vec<(NodeId, HeadTag)>,
}

impl HeadManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags currently owned, in insertion order.
    pub fn owned(&self) -> impl Iterator<Item = &HeadTag> {
        self.owned.iter().map(|(_, tag)| tag)
    }

    /// Replace the owned tag set with `next`.
    ///
    /// Owned tags also present in `next` stay in place. Duplicates are matched
    /// one-for-one, so a tag declared twice is kept twice.
    pub fn apply(&mut self, doc: &mut HeadDocument, next: &PageHead) -> HeadDiff {
        doc.set_html_lang(next.lang.as_str());

        let mut matched = vec![false; self.owned.len()];
        let mut to_insert = Vec::new();

        for tag in &next.tags {
            let existing = self
                .owned
                .iter()
                .enumerate()
                .position(|(i, (_, owned))| !matched[i] && owned == tag);
            match existing {
                Some(i) => matched[i] = true,
                None => to_insert.push(tag.clone()),
            }
        }

        let mut diff = HeadDiff::default();
        let previous = std::mem::take(&mut self.owned);
        for ((id, tag), keep) in previous.into_iter().zip(matched) {
            if keep {
                self.owned.push((id, tag));
            } else {
                doc.remove(id);
                diff.removed.push(tag);
            }
        }

        for tag in to_insert {
            let id = doc.insert(tag.clone());
            self.owned.push((id, tag.clone()));
            diff.added.push(tag);
        }

        diff
    }

    /// Remove every owned tag, e.g. when the page unmounts.
    pub fn clear(&mut self, doc: &mut HeadDocument) -> HeadDiff {
        let mut diff = HeadDiff::default();
        for (id, tag) in self.owned.drain(..) {
            doc.remove(id);
            diff.removed.push(tag);
        }
        diff
    }
}
