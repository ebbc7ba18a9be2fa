use std::sync::Arc;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;

use docsearch::app::{build_router, AppState};
use docsearch::bootstrap::run_bootstrap;
use docsearch::config::AppConfig;
use docsearch::search::client::{OpenSearchEngine, SearchEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docsearch=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting docsearch...");

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    let search_engine: Arc<dyn SearchEngine> = Arc::new(
        OpenSearchEngine::new(&config.opensearch_url, config.verify_certs)
            .context("Failed to initialize OpenSearch client")?,
    );

    // Bootstrap must finish before the listener is bound.
    let mut rng = StdRng::from_os_rng();
    let report = run_bootstrap(search_engine.as_ref(), &config, &mut rng)
        .await
        .context("Startup bootstrap failed")?;

    tracing::info!(
        "Bootstrap finished: readiness={:?}, index_created={}, seeded={}",
        report.readiness,
        report.index_created,
        report.seeded
    );

    let app = build_router(AppState::new(search_engine.clone(), config.index_name.clone()));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    tracing::info!("Listening on http://{}", config.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    // The router and its state are gone; this is the last handle.
    drop(search_engine);
    tracing::info!("Search engine client released, shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections...");
}
