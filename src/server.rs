//! HTTP surface: localized pages, static assets, SEO files, contact intake
//! and diagnostics.
//!
//! `POST /api/contact` takes either JSON (answered with JSON) or a native
//! form post (answered with the re-rendered contact page).

use crate::config::Config;
use crate::contact::{submit_contact, ContactForm, ContactRecord, SubmitError};
use crate::health;
use crate::i18n::Locale;
use crate::render::{render_contact, render_not_found, render_page, ContactFormView, FormStatus};
use crate::routes::{match_path, percent_decode};
use crate::security::is_authorized;
use crate::seed::test_connection;
use crate::seo::Site;
use crate::sitemap;
use crate::store::DocumentStore;
use axum::extract::{FromRequest, Request, State};
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{any, get, post};
use axum::{Form, Json, Router};
use chrono::Utc;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Shared, immutable application state.
#[derive(Clone)]
pub struct AppState {
    pub site: Site,
    pub blog_posts: Vec<String>,
    pub admin_api_key: Option<String>,
    pub missing_keys: Vec<&'static str>,
    pub store: Option<Arc<dyn DocumentStore>>,
    /// Root of `assets/` and `favicon.svg`.
    pub public_dir: PathBuf,
}

impl AppState {
    pub fn from_config(config: &Config, store: Option<Arc<dyn DocumentStore>>) -> Self {
        Self {
            site: Site::new(config.site_url.as_str()),
            blog_posts: config.blog_posts.clone(),
            admin_api_key: config.admin_api_key.clone(),
            missing_keys: config.missing_keys(),
            store,
            public_dir: PathBuf::from(&config.public_dir),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let assets = ServeDir::new(state.public_dir.join("assets"));
    let favicon = ServeFile::new(state.public_dir.join("favicon.svg"));

    Router::new()
        .nest_service("/assets", assets)
        .route_service("/favicon.svg", favicon)
        .route("/ping", any(health::ping))
        .route("/sitemap.xml", get(sitemap_xml))
        .route("/robots.txt", get(robots_txt))
        .route("/api/contact", post(contact))
        .route("/api/diagnostics", get(diagnostics))
        .route("/api/diagnostics/connection", post(connection))
        .fallback(page)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

fn submit_status(e: &SubmitError) -> StatusCode {
    match e {
        SubmitError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmitError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        SubmitError::Store(_) => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        let status = submit_status(&self);
        let body = match self {
            SubmitError::Invalid(fields) => {
                json!({ "error": "validation_failed", "fields": fields })
            }
            SubmitError::NotConfigured => json!({ "error": "not_configured" }),
            SubmitError::Store(e) => {
                error!("Contact submission failed: {}", e);
                json!({ "error": "store_unavailable" })
            }
        };
        (status, Json(body)).into_response()
    }
}

async fn page(State(state): State<Arc<AppState>>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "GET, HEAD")]).into_response();
    }

    let path = percent_decode(uri.path());
    match match_path(&path) {
        Some(route) => Html(render_page(&state.site, &route)).into_response(),
        None => (StatusCode::NOT_FOUND, Html(render_not_found(&path))).into_response(),
    }
}

async fn sitemap_xml(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let xml = sitemap::generate(&state.site, &state.blog_posts, Utc::now().date_naive());
    ([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml)
}

async fn robots_txt(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        sitemap::robots_txt(&state.site),
    )
}

fn is_form_post(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"))
}

async fn contact(State(state): State<Arc<AppState>>, req: Request) -> Response {
    if is_form_post(req.headers()) {
        return match Form::<ContactForm>::from_request(req, &state).await {
            Ok(Form(form)) => contact_form_post(&state, form).await,
            Err(rejection) => {
                warn!("Rejected contact form: {}", rejection.body_text());
                (StatusCode::BAD_REQUEST, rejection.body_text()).into_response()
            }
        };
    }

    let record = match Json::<ContactRecord>::from_request(req, &state).await {
        Ok(Json(record)) => record,
        Err(rejection) => {
            warn!("Rejected contact payload: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "invalid_json" })),
            )
                .into_response();
        }
    };

    match submit_contact(state.store.as_deref(), &record).await {
        Ok(id) => (StatusCode::CREATED, Json(json!({ "id": id }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Answer a native form post with the contact page of the posting locale:
/// a fresh form and the success message, or the submitted values with the
/// error message.
async fn contact_form_post(state: &AppState, form: ContactForm) -> Response {
    let locale = form
        .locale
        .as_deref()
        .and_then(|code| Locale::from_code(code).ok())
        .unwrap_or_else(Locale::default_locale);
    let record = form.into_record();

    match submit_contact(state.store.as_deref(), &record).await {
        Ok(id) => {
            info!("Contact form {} submitted from /{}", id, locale);
            let view = ContactFormView {
                status: FormStatus::Sent,
                ..Default::default()
            };
            Html(render_contact(&state.site, locale, &view)).into_response()
        }
        Err(e) => {
            let status = submit_status(&e);
            let invalid = match &e {
                SubmitError::Invalid(fields) => fields.iter().map(|f| f.field).collect(),
                SubmitError::Store(err) => {
                    error!("Contact form submission failed: {}", err);
                    Vec::new()
                }
                SubmitError::NotConfigured => Vec::new(),
            };
            let view = ContactFormView {
                status: FormStatus::Failed,
                values: Some(&record),
                invalid,
            };
            (status, Html(render_contact(&state.site, locale, &view))).into_response()
        }
    }
}

async fn diagnostics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "configured": state.missing_keys.is_empty(),
        "missingKeys": state.missing_keys,
    }))
}

async fn connection(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if !is_authorized(&headers, state.admin_api_key.as_deref()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "unauthorized" })),
        )
            .into_response();
    }

    let Some(store) = state.store.as_deref() else {
        return SubmitError::NotConfigured.into_response();
    };

    let report = test_connection(store).await;
    let status = if report.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };
    (status, Json(report)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn state(store: Option<MemoryStore>) -> AppState {
        AppState {
            site: Site::default(),
            blog_posts: vec!["hello-world".to_string()],
            admin_api_key: Some("admin-key".to_string()),
            missing_keys: Vec::new(),
            store: store.map(|s| Arc::new(s) as Arc<dyn DocumentStore>),
            public_dir: PathBuf::from("public"),
        }
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    const FORM_BODY: &str = "locale=en&purpose=media&fullName=Ada&email=ada%40example.com&message=Interview+request&consent=on";

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, String) {
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn contact_body() -> Value {
        json!({
            "purpose": "media",
            "fullName": "Ada Lovelace",
            "email": "ada@example.com",
            "message": "Interview request",
            "consent": true
        })
    }

    // ==================== Page Tests ====================

    #[tokio::test]
    async fn test_root_renders_french_home() {
        let (status, body) = send(build_router(state(None)), get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<html lang=\"fr-FR\">"));
    }

    #[tokio::test]
    async fn test_percent_encoded_unicode_path() {
        // /zh/联系
        let (status, body) = send(
            build_router(state(None)),
            get("/zh/%E8%81%94%E7%B3%BB"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<html lang=\"zh-CN\">"));
    }

    #[tokio::test]
    async fn test_blog_post_page() {
        let (status, body) = send(build_router(state(None)), get("/es/blog/hola")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("https://williamsjullin.com/es/blog/hola"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_404_noindex() {
        let (status, body) = send(build_router(state(None)), get("/en/nope/deeper")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("noindex"));
    }

    #[tokio::test]
    async fn test_page_rejects_post() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/en")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(build_router(state(None)), req).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    // ==================== SEO File Tests ====================

    #[tokio::test]
    async fn test_sitemap_includes_posts() {
        let (status, body) = send(build_router(state(None)), get("/sitemap.xml")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<loc>https://williamsjullin.com/de/blog/hello-world</loc>"));
    }

    #[tokio::test]
    async fn test_robots_txt() {
        let (status, body) = send(build_router(state(None)), get("/robots.txt")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Sitemap: https://williamsjullin.com/sitemap.xml"));
    }

    #[tokio::test]
    async fn test_ping_routes_to_health() {
        let (status, body) = send(build_router(state(None)), get("/ping")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    // ==================== Contact Tests ====================

    #[tokio::test]
    async fn test_contact_created() {
        let store = MemoryStore::new();
        let app = build_router(state(Some(store.clone())));

        let (status, body) = send(app, post_json("/api/contact", contact_body())).await;

        assert_eq!(status, StatusCode::CREATED);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert!(json["id"].as_str().is_some());
        assert_eq!(store.count("contacts"), 1);
    }

    #[tokio::test]
    async fn test_contact_without_consent_is_422() {
        let store = MemoryStore::new();
        let app = build_router(state(Some(store.clone())));
        let mut body = contact_body();
        body["consent"] = json!(false);

        let (status, body) = send(app, post_json("/api/contact", body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["fields"][0]["field"], "consent");
        assert_eq!(store.count("contacts"), 0);
    }

    #[tokio::test]
    async fn test_contact_without_store_is_503() {
        let (status, _) = send(
            build_router(state(None)),
            post_json("/api/contact", contact_body()),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_contact_malformed_json_is_400() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/contact")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, _) = send(build_router(state(None)), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // ==================== Contact Form Tests ====================

    #[tokio::test]
    async fn test_form_post_shows_success_page() {
        let store = MemoryStore::new();
        let app = build_router(state(Some(store.clone())));

        let (status, body) = send(app, post_form("/api/contact", FORM_BODY)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<html lang=\"en-US\">"));
        assert!(body.contains("<p class=\"form-success\" role=\"status\">"));
        assert!(body.contains("<p class=\"form-error\" role=\"alert\" hidden>"));
        assert_eq!(store.count("contacts"), 1);
    }

    #[tokio::test]
    async fn test_form_post_without_consent_keeps_values() {
        let store = MemoryStore::new();
        let app = build_router(state(Some(store.clone())));
        let body = FORM_BODY.trim_end_matches("&consent=on");

        let (status, body) = send(app, post_form("/api/contact", body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.contains("<p class=\"form-error\" role=\"alert\">"));
        assert!(body.contains("<p class=\"form-success\" role=\"status\" hidden>"));
        assert!(body.contains("value=\"Ada\""));
        assert!(body.contains("value=\"ada@example.com\""));
        assert!(body.contains(">Interview request</textarea>"));
        assert!(body.contains("aria-invalid=\"true\"> "));
        assert_eq!(store.count("contacts"), 0);
    }

    #[tokio::test]
    async fn test_form_post_without_store_is_503_page() {
        let (status, body) = send(
            build_router(state(None)),
            post_form("/api/contact", FORM_BODY),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.contains("<p class=\"form-error\" role=\"alert\">"));
        assert!(body.contains("value=\"Ada\""));
    }

    #[tokio::test]
    async fn test_form_post_unknown_locale_falls_back_to_french() {
        let store = MemoryStore::new();
        let body = FORM_BODY.replace("locale=en", "locale=xx");

        let (status, body) = send(
            build_router(state(Some(store))),
            post_form("/api/contact", &body),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<html lang=\"fr-FR\">"));
    }

    // ==================== Static Asset Tests ====================

    fn state_with_public(dir: &std::path::Path) -> AppState {
        let mut st = state(None);
        st.public_dir = dir.to_path_buf();
        st
    }

    fn write_public_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("assets")).unwrap();
        std::fs::write(dir.path().join("assets/site.css"), "body { margin: 0; }").unwrap();
        std::fs::write(dir.path().join("favicon.svg"), "<svg></svg>").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_stylesheet_is_served() {
        let dir = write_public_dir();
        let resp = build_router(state_with_public(dir.path()))
            .oneshot(get("/assets/site.css"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/css"));
    }

    #[tokio::test]
    async fn test_favicon_is_served() {
        let dir = write_public_dir();
        let (status, body) = send(
            build_router(state_with_public(dir.path())),
            get("/favicon.svg"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<svg></svg>");
    }

    #[tokio::test]
    async fn test_missing_asset_is_404() {
        let dir = write_public_dir();
        let (status, _) = send(
            build_router(state_with_public(dir.path())),
            get("/assets/missing.js"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bundled_head_assets_resolve() {
        let public = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("public");
        for uri in ["/assets/site.css", "/favicon.svg"] {
            let (status, _) = send(build_router(state_with_public(&public)), get(uri)).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
        }
    }

    // ==================== Diagnostics Tests ====================

    #[tokio::test]
    async fn test_diagnostics_lists_missing_keys() {
        let mut st = state(None);
        st.missing_keys = vec!["FIREBASE_APP_ID"];
        let (status, body) = send(build_router(st), get("/api/diagnostics")).await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["configured"], false);
        assert_eq!(json["missingKeys"][0], "FIREBASE_APP_ID");
    }

    #[tokio::test]
    async fn test_connection_requires_admin_key() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/diagnostics/connection")
            .header(header::AUTHORIZATION, "Bearer wrong")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(build_router(state(Some(MemoryStore::new()))), req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_connection_round_trip() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/diagnostics/connection")
            .header(header::AUTHORIZATION, "Bearer admin-key")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(build_router(state(Some(MemoryStore::new()))), req).await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["writeOk"], true);
        assert_eq!(json["readOk"], true);
    }
}
