use anyhow::{bail, Context, Result};
use crate::seo::DEFAULT_BASE_URL;

/// Environment keys the document-store client needs. Missing keys are
/// reported, not fatal: the site still renders, submissions fail.
pub const REQUIRED_STORE_KEYS: [&str; 6] = [
    "FIREBASE_API_KEY",
    "FIREBASE_AUTH_DOMAIN",
    "FIREBASE_PROJECT_ID",
    "FIREBASE_STORAGE_BUCKET",
    "FIREBASE_MESSAGING_SENDER_ID",
    "FIREBASE_APP_ID",
];

pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com";

/// Directory holding `assets/`, the favicon and generated files.
pub const DEFAULT_PUBLIC_DIR: &str = "public";

#[derive(Debug, Clone)]
pub struct Config {
    // Site
    pub site_url: String,
    pub port: u16,
    pub blog_posts: Vec<String>,
    pub public_dir: String,

    // Diagnostics
    pub admin_api_key: Option<String>,

    // Document store (Firebase project)
    pub firebase_api_key: Option<String>,
    pub firebase_auth_domain: Option<String>,
    pub firebase_project_id: Option<String>,
    pub firebase_storage_bucket: Option<String>,
    pub firebase_messaging_sender_id: Option<String>,
    pub firebase_app_id: Option<String>,
    pub firestore_base_url: String,
    pub request_timeout_secs: u64,
}

/// Connection settings for the Firestore REST client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirestoreConfig {
    pub base_url: String,
    pub project_id: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let site_url = std::env::var("SITE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        if !site_url.starts_with("http://") && !site_url.starts_with("https://") {
            bail!("SITE_URL must be an http(s) origin, got '{}'", site_url);
        }

        Ok(Self {
            site_url,
            port: std::env::var("PORT")
                .ok()
                .map(|v| v.parse())
                .transpose()
                .context("PORT must be a valid port number")?
                .unwrap_or(8080),
            blog_posts: std::env::var("BLOG_POSTS")
                .map(|v| parse_list(&v))
                .unwrap_or_default(),
            public_dir: std::env::var("PUBLIC_DIR")
                .unwrap_or_else(|_| DEFAULT_PUBLIC_DIR.to_string()),

            admin_api_key: non_empty_var("ADMIN_API_KEY"),

            firebase_api_key: non_empty_var("FIREBASE_API_KEY"),
            firebase_auth_domain: non_empty_var("FIREBASE_AUTH_DOMAIN"),
            firebase_project_id: non_empty_var("FIREBASE_PROJECT_ID"),
            firebase_storage_bucket: non_empty_var("FIREBASE_STORAGE_BUCKET"),
            firebase_messaging_sender_id: non_empty_var("FIREBASE_MESSAGING_SENDER_ID"),
            firebase_app_id: non_empty_var("FIREBASE_APP_ID"),
            firestore_base_url: std::env::var("FIRESTORE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_FIRESTORE_URL.to_string()),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        })
    }

    /// Required store keys that are unset, in declaration order.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let values = [
            &self.firebase_api_key,
            &self.firebase_auth_domain,
            &self.firebase_project_id,
            &self.firebase_storage_bucket,
            &self.firebase_messaging_sender_id,
            &self.firebase_app_id,
        ];
        REQUIRED_STORE_KEYS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.is_none())
            .map(|(key, _)| *key)
            .collect()
    }

    /// Firestore client settings, if the project id and API key are set.
    pub fn firestore(&self) -> Option<FirestoreConfig> {
        Some(FirestoreConfig {
            base_url: self.firestore_base_url.clone(),
            project_id: self.firebase_project_id.clone()?,
            api_key: self.firebase_api_key.clone()?,
            timeout_secs: self.request_timeout_secs,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
