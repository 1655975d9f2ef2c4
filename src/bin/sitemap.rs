//! Sitemap generator - writes the multilingual sitemap and robots.txt
//!
//! Usage:
//!   cargo run --bin sitemap                  # Writes public/sitemap.xml
//!   cargo run --bin sitemap -- out/map.xml   # Custom output path
//!
//! Optional environment variables:
//! - SITE_URL (defaults to https://williamsjullin.com)
//! - BLOG_POSTS (comma-separated post slugs)

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use williams_jullin_site::config::Config;
use williams_jullin_site::seo::Site;
use williams_jullin_site::sitemap;

const DEFAULT_OUTPUT: &str = "public/sitemap.xml";

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("williams_jullin_site=info".parse()?),
        )
        .init();

    let output = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let config = Config::from_env()?;
    let site = Site::new(config.site_url.as_str());

    let xml = sitemap::generate(&site, &config.blog_posts, Utc::now().date_naive());

    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    fs::write(&output, &xml).with_context(|| format!("Failed to write {}", output.display()))?;

    let robots = output.with_file_name("robots.txt");
    fs::write(&robots, sitemap::robots_txt(&site))
        .with_context(|| format!("Failed to write {}", robots.display()))?;

    info!(
        "Wrote {} URLs to {} ({} blog posts)",
        xml.matches("<url>").count(),
        output.display(),
        config.blog_posts.len()
    );
    Ok(())
}
