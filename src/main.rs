use std::{sync::Arc, time::Duration};

use tracing_subscriber::EnvFilter;

use hairscan_api::{
    api::{create_router, AppState},
    config::Config,
    db::{create_pool, HistoryWriter, MemoryScanStore, PgScanStore, ScanHistoryStore},
    services::classifier::{HairClassifier, HttpClassifier},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hairscan_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let classifier: Arc<dyn HairClassifier> = Arc::new(HttpClassifier::new(
        config.classifier_url.clone(),
        Duration::from_secs(config.classifier_timeout_secs),
    )?);

    let store: Arc<dyn ScanHistoryStore> = match &config.database_url {
        Some(database_url) => {
            let store = PgScanStore::new(create_pool(database_url).await?);
            store.migrate().await?;
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, scan history will not survive restarts");
            Arc::new(MemoryScanStore::new())
        }
    };

    let (history_writer, writer_handle) = HistoryWriter::spawn(store.clone());
    let state = AppState::new(classifier, store, history_writer);
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        addr = %addr,
        classifier_url = %config.classifier_url,
        "Server running"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    writer_handle.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
