use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};
use williams_jullin_site::config::Config;
use williams_jullin_site::i18n::validate_tables;
use williams_jullin_site::server::{build_router, AppState};
use williams_jullin_site::store::{DocumentStore, FirestoreStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("williams_jullin_site=info".parse()?),
        )
        .init();

    info!("Starting Williams Jullin site");

    let config = Config::from_env()?;

    let report = validate_tables();
    for e in &report.errors {
        error!("Locale table: {}", e);
    }
    for w in &report.warnings {
        warn!("Locale table: {}", w);
    }

    let missing = config.missing_keys();
    if !missing.is_empty() {
        warn!(
            "Document store not fully configured, missing: {}",
            missing.join(", ")
        );
    }

    let store: Option<Arc<dyn DocumentStore>> = match config.firestore() {
        Some(firestore) => {
            info!("Using Firestore project '{}'", firestore.project_id);
            let store =
                FirestoreStore::new(&firestore).context("Failed to build Firestore client")?;
            Some(Arc::new(store) as Arc<dyn DocumentStore>)
        }
        None => {
            warn!("Contact submissions will be rejected until the store is configured");
            None
        }
    };

    let app = build_router(AppState::from_config(&config, store));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
