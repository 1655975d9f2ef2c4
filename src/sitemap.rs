//! XML sitemap with hreflang alternates.
//!
//! Built from the route table through `Site::alternates`, so the sitemap and
//! the runtime head tags can never disagree on URLs. Head tags keep the raw
//! IRIs; sitemap URLs are percent-encoded as the protocol requires.

use crate::html::escape_html;
use crate::i18n::Locale;
use crate::routes::{percent_encode_uri, PageKey};
use crate::seo::Site;
use chrono::NaiveDate;
use std::fmt::Write;

fn change_freq(page: PageKey) -> &'static str {
    match page {
        PageKey::Home | PageKey::Blog => "weekly",
        _ => "monthly",
    }
}

fn priority(page: PageKey) -> &'static str {
    match page {
        PageKey::Home => "1.0",
        PageKey::Story | PageKey::Investors => "0.8",
        PageKey::Blog | PageKey::Media | PageKey::Contact => "0.7",
        PageKey::Post => "0.6",
    }
}

/// Render the sitemap: one `<url>` per (locale, static page) and per
/// (locale, post slug), each listing every locale plus `x-default`.
pub fn generate(site: &Site, posts: &[String], lastmod: NaiveDate) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(
        "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" \
         xmlns:xhtml=\"http://www.w3.org/1999/xhtml\">\n",
    );

    let entries = PageKey::STATIC
        .iter()
        .map(|page| (*page, None))
        .chain(posts.iter().map(|slug| (PageKey::Post, Some(slug.as_str()))));

    let lastmod = lastmod.format("%Y-%m-%d").to_string();

    for (page, slug) in entries {
        let alternates = site.alternates(page, slug);
        for locale in Locale::all() {
            let loc = site.canonical(locale, page, slug);
            let _ = writeln!(out, "  <url>");
            let _ = writeln!(out, "    <loc>{}</loc>", escape_html(&percent_encode_uri(&loc)));
            for link in &alternates {
                let _ = writeln!(
                    out,
                    "    <xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}\"/>",
                    link.href_lang,
                    escape_html(&percent_encode_uri(&link.href))
                );
            }
            let _ = writeln!(out, "    <lastmod>{}</lastmod>", lastmod);
            let _ = writeln!(out, "    <changefreq>{}</changefreq>", change_freq(page));
            let _ = writeln!(out, "    <priority>{}</priority>", priority(page));
            let _ = writeln!(out, "  </url>");
        }
    }

    out.push_str("</urlset>\n");
    out
}

/// Body of `/robots.txt`.
pub fn robots_txt(site: &Site) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}\n",
        site.absolute("/sitemap.xml")
    )
}
