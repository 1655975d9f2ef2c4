//! Seed binary - fills the document store with sample data or checks connectivity
//!
//! Usage:
//!   cargo run --bin seed                      # Seed contacts, investors, analytics
//!   cargo run --bin seed -- --test-connection # Write-then-read round trip on `test`
//!   cargo run --bin seed -- --dry-run         # Run against an in-memory store
//!
//! Required environment variables (unless --dry-run):
//! - FIREBASE_PROJECT_ID
//! - FIREBASE_API_KEY

use anyhow::{bail, Context, Result};
use tracing::{error, info};
use williams_jullin_site::config::Config;
use williams_jullin_site::seed::{seed_all, test_connection, SeedStatus};
use williams_jullin_site::store::{DocumentStore, FirestoreStore, MemoryStore};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("williams_jullin_site=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let dry_run = args.iter().any(|arg| arg == "--dry-run");
    let connection_only = args.iter().any(|arg| arg == "--test-connection");

    let store: Box<dyn DocumentStore> = if dry_run {
        info!("Dry run: using in-memory store");
        Box::new(MemoryStore::new())
    } else {
        let config = Config::from_env()?;
        let missing = config.missing_keys();
        if !missing.is_empty() {
            info!("Missing configuration keys: {}", missing.join(", "));
        }
        let firestore = config
            .firestore()
            .context("FIREBASE_PROJECT_ID and FIREBASE_API_KEY must be set")?;
        Box::new(FirestoreStore::new(&firestore)?)
    };

    if connection_only {
        let report = test_connection(store.as_ref()).await;
        println!("{}", serde_json::to_string_pretty(&report)?);
        if !report.is_ok() {
            bail!("Connection test failed: {}", report.message);
        }
        return Ok(());
    }

    let results = seed_all(store.as_ref()).await;
    println!("{}", serde_json::to_string_pretty(&results)?);

    let failed: Vec<_> = results
        .iter()
        .filter(|r| r.status == SeedStatus::Error)
        .collect();
    if !failed.is_empty() {
        for r in &failed {
            error!("{}: {}", r.collection, r.message);
        }
        bail!("{} collection(s) failed to seed", failed.len());
    }

    info!("Seeding complete");
    Ok(())
}
