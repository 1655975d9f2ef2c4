//! Server-side page rendering.
//!
//! Each page is rendered from a fresh `HeadDocument` (shared static tags)
//! onto which a `HeadManager` applies the page's declared `PageHead`. Bodies
//! are a minimal localized skeleton: navigation, heading, lead paragraph,
//! language switcher and, on the contact page, the contact form.
//!
//! The contact form is a plain HTML form posting to `/api/contact`. The
//! server answers a form post by rendering the contact page again, either in
//! the sent state (empty form, success message) or in the failed state
//! (submitted values kept, error message shown, invalid fields marked).

use crate::contact::ContactRecord;
use crate::html::escape_html;
use crate::i18n::{Locale, UiStrings};
use crate::routes::{resolve_path, PageKey, RouteMatch};
use crate::seo::head::SITE_NAME;
use crate::seo::{meta_for, HeadDocument, HeadManager, PageHead, Site};
use serde_json::{json, Value};
use std::fmt::Write;

/// JSON-LD blocks declared by a page.
pub fn structured_data(site: &Site, locale: Locale, page: PageKey, slug: Option<&str>) -> Vec<Value> {
    let meta = meta_for(page, locale);
    let url = site.canonical(locale, page, slug);

    let mut blocks = vec![json!({
        "@context": "https://schema.org",
        "@type": if page == PageKey::Post { "BlogPosting" } else { "WebPage" },
        "name": meta.title,
        "description": meta.description,
        "url": url,
        "inLanguage": locale.bcp47(),
    })];

    if page == PageKey::Home {
        blocks.push(json!({
            "@context": "https://schema.org",
            "@type": "Person",
            "name": SITE_NAME,
            "url": site.canonical(locale, PageKey::Home, None),
            "jobTitle": "Entrepreneur",
        }));
    }

    blocks
}

/// Outcome of the last contact submission shown on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Sent,
    Failed,
}

/// What the contact form shows when rendered.
#[derive(Debug, Clone, Default)]
pub struct ContactFormView<'a> {
    pub status: FormStatus,
    /// Values to fill back in after a failed submission.
    pub values: Option<&'a ContactRecord>,
    /// Names of the fields that failed validation.
    pub invalid: Vec<&'static str>,
}

/// Render a matched route as a complete HTML document.
pub fn render_page(site: &Site, route: &RouteMatch) -> String {
    render_route(site, route, &ContactFormView::default())
}

/// Render the contact page of `locale` after a form submission.
pub fn render_contact(site: &Site, locale: Locale, view: &ContactFormView<'_>) -> String {
    let route = RouteMatch {
        locale,
        page: PageKey::Contact,
        slug: None,
    };
    render_route(site, &route, view)
}

fn render_route(site: &Site, route: &RouteMatch, form: &ContactFormView<'_>) -> String {
    let locale = route.locale;
    let slug = route.slug.as_deref();
    let json_ld = structured_data(site, locale, route.page, slug);
    let head = PageHead::for_page(site, locale, route.page, slug, &json_ld);

    let mut doc = HeadDocument::with_defaults();
    let mut manager = HeadManager::new();
    manager.apply(&mut doc, &head);

    let strings = UiStrings::for_locale(locale);
    let meta = meta_for(route.page, locale);

    let mut main = String::new();
    let _ = writeln!(main, "<h1>{}</h1>", escape_html(meta.title));
    let _ = writeln!(main, "<p class=\"lead\">{}</p>", escape_html(meta.description));
    if route.page == PageKey::Contact {
        main.push_str(&contact_form(locale, strings, form));
    }

    document(&doc, &nav(locale, strings), &main, &language_switcher(route, strings))
}

/// Render the not-found page for a request path.
pub fn render_not_found(path: &str) -> String {
    let locale = locale_hint(path);
    let strings = UiStrings::for_locale(locale);

    let mut doc = HeadDocument::with_defaults();
    let mut manager = HeadManager::new();
    manager.apply(&mut doc, &PageHead::not_found(locale, strings.not_found_title));

    let main = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"{}\">{}</a></p>\n",
        escape_html(strings.not_found_title),
        escape_html(strings.not_found_body),
        escape_html(&resolve_path(locale, PageKey::Home, None)),
        escape_html(strings.nav_home),
    );

    document(&doc, &nav(locale, strings), &main, "")
}

/// Locale suggested by the first path segment, or the default locale.
pub fn locale_hint(path: &str) -> Locale {
    path.trim_start_matches('/')
        .split('/')
        .next()
        .and_then(|segment| Locale::from_code(segment).ok())
        .unwrap_or_else(Locale::default_locale)
}

fn document(head: &HeadDocument, nav: &str, main: &str, footer_extra: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n{head}</head>\n<body>\n<header>\n{nav}</header>\n<main>\n{main}</main>\n<footer>\n{footer_extra}<p>&copy; {site}</p>\n</footer>\n</body>\n</html>\n",
        lang = escape_html(head.html_lang()),
        head = head.render(),
        nav = nav,
        main = main,
        footer_extra = footer_extra,
        site = SITE_NAME,
    )
}

fn nav(locale: Locale, strings: &UiStrings) -> String {
    let items = [
        (PageKey::Home, strings.nav_home),
        (PageKey::Story, strings.nav_story),
        (PageKey::Blog, strings.nav_blog),
        (PageKey::Media, strings.nav_media),
        (PageKey::Investors, strings.nav_investors),
        (PageKey::Contact, strings.nav_contact),
    ];

    let mut out = String::from("<nav>\n<ul>\n");
    for (page, label) in items {
        let _ = writeln!(
            out,
            "<li><a href=\"{}\">{}</a></li>",
            escape_html(&resolve_path(locale, page, None)),
            escape_html(label)
        );
    }
    out.push_str("</ul>\n</nav>\n");
    out
}

fn language_switcher(route: &RouteMatch, strings: &UiStrings) -> String {
    let mut out = format!(
        "<nav class=\"languages\" aria-label=\"{}\">\n<ul>\n",
        escape_html(strings.language_label)
    );
    for locale in Locale::all() {
        let path = resolve_path(locale, route.page, route.slug.as_deref());
        let current = if locale == route.locale {
            " aria-current=\"true\""
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "<li><a href=\"{}\" hreflang=\"{}\" lang=\"{}\"{}>{}</a></li>",
            escape_html(&path),
            locale.code(),
            locale.bcp47(),
            current,
            escape_html(locale.native_name())
        );
    }
    out.push_str("</ul>\n</nav>\n");
    out
}

fn text_input(
    name: &str,
    label: &str,
    kind: &str,
    required: bool,
    value: Option<&str>,
    invalid: bool,
) -> String {
    format!(
        "<label>{label}{mark}<input type=\"{kind}\" name=\"{name}\"{value}{req}{invalid}></label>\n",
        label = escape_html(label),
        mark = if required { " *" } else { "" },
        kind = kind,
        name = name,
        value = value
            .map(|v| format!(" value=\"{}\"", escape_html(v)))
            .unwrap_or_default(),
        req = if required { " required" } else { "" },
        invalid = if invalid { " aria-invalid=\"true\"" } else { "" },
    )
}

fn contact_form(locale: Locale, strings: &UiStrings, view: &ContactFormView<'_>) -> String {
    let values = view.values;
    let invalid = |field: &str| view.invalid.iter().any(|f| *f == field);

    let mut out = String::from(
        "<form id=\"contact-form\" action=\"/api/contact\" method=\"post\">\n",
    );
    let _ = writeln!(
        out,
        "<input type=\"hidden\" name=\"locale\" value=\"{}\">",
        locale.code()
    );
    out.push_str(&text_input(
        "purpose",
        strings.form_purpose,
        "text",
        true,
        values.map(|r| r.purpose.as_str()),
        invalid("purpose"),
    ));
    out.push_str(&text_input(
        "fullName",
        strings.form_full_name,
        "text",
        true,
        values.map(|r| r.full_name.as_str()),
        invalid("fullName"),
    ));
    out.push_str(&text_input(
        "email",
        strings.form_email,
        "email",
        true,
        values.map(|r| r.email.as_str()),
        invalid("email"),
    ));
    out.push_str(&text_input(
        "title",
        strings.form_title,
        "text",
        false,
        values.and_then(|r| r.title.as_deref()),
        invalid("title"),
    ));
    let _ = writeln!(
        out,
        "<label>{} *<textarea name=\"message\" required{}>{}</textarea></label>",
        escape_html(strings.form_message),
        if invalid("message") { " aria-invalid=\"true\"" } else { "" },
        escape_html(values.map(|r| r.message.as_str()).unwrap_or_default())
    );
    out.push_str(&text_input(
        "country",
        strings.form_country,
        "text",
        false,
        values.and_then(|r| r.country.as_deref()),
        invalid("country"),
    ));
    let _ = writeln!(
        out,
        "<label><input type=\"checkbox\" name=\"consent\" value=\"on\" required{}{}> {}</label>",
        if values.is_some_and(|r| r.consent) { " checked" } else { "" },
        if invalid("consent") { " aria-invalid=\"true\"" } else { "" },
        escape_html(strings.form_consent)
    );
    let _ = writeln!(
        out,
        "<p class=\"form-success\" role=\"status\"{}>{}</p>\n<p class=\"form-error\" role=\"alert\"{}>{}</p>",
        if view.status == FormStatus::Sent { "" } else { " hidden" },
        escape_html(strings.contact_success),
        if view.status == FormStatus::Failed { "" } else { " hidden" },
        escape_html(strings.contact_error)
    );
    let _ = writeln!(out, "<button type=\"submit\">{}</button>", escape_html(strings.form_submit));
    out.push_str("</form>\n");
    out
}
