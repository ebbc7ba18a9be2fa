//! Startup sequence run once before the HTTP listener opens.
//!
//! 1. Wait for the search engine to answer its health probe.
//! 2. Create the index with the shared schema if it does not exist.
//! 3. Seed a freshly created index with sample documents.
//! 4. Refresh the index so the seeded documents are searchable immediately.
//!
//! An index that already exists is left untouched: no schema migration and
//! no additional documents.

use std::time::Duration;

use rand::Rng;
use tokio::time::Instant;

use crate::config::AppConfig;
use crate::demo_seeder::seed_documents;
use crate::error::AppError;
use crate::search::client::SearchEngine;
use crate::search::schema;

/// Outcome of the readiness wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    TimedOut,
}

/// What a bootstrap pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    pub readiness: Readiness,
    pub index_created: bool,
    pub seeded: usize,
}

/// Upper bound on a single health probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Probe the engine every `interval` until it reports healthy or `timeout`
/// elapses. Probe faults count as "not ready yet".
///
/// Each probe is cut off at [`PROBE_TIMEOUT`] or the remaining budget,
/// whichever is shorter, so a stalled connection cannot hold startup past
/// `timeout`.
pub async fn wait_for_engine(
    engine: &dyn SearchEngine,
    timeout: Duration,
    interval: Duration,
) -> Readiness {
    let start = Instant::now();
    let deadline = start + timeout;

    while Instant::now() < deadline {
        let budget = deadline
            .saturating_duration_since(Instant::now())
            .min(PROBE_TIMEOUT);

        match tokio::time::timeout(budget, engine.ping()).await {
            Ok(Ok(true)) => {
                tracing::info!("Search engine ready after {:?}", start.elapsed());
                return Readiness::Ready;
            }
            Ok(Ok(false)) => tracing::debug!("Search engine not healthy yet"),
            Ok(Err(e)) => tracing::debug!("Search engine probe failed: {e}"),
            Err(_) => tracing::debug!("Search engine probe timed out after {:?}", budget),
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        tokio::time::sleep(interval.min(remaining)).await;
    }

    tracing::warn!("Search engine not ready after {:?}", timeout);
    Readiness::TimedOut
}

/// Create `index` with the shared schema unless it already exists.
///
/// Returns `true` when the index was created by this call.
pub async fn ensure_index(engine: &dyn SearchEngine, index: &str) -> Result<bool, AppError> {
    if engine.index_exists(index).await? {
        tracing::info!("Index '{}' already exists, skipping creation.", index);
        return Ok(false);
    }

    engine.create_index(index, &schema::index_body()).await?;
    tracing::info!("Created index '{}'.", index);
    Ok(true)
}

/// Write a random sample set into `index` and refresh it.
///
/// Returns the number of documents written.
pub async fn seed_index<R: Rng + ?Sized>(
    engine: &dyn SearchEngine,
    index: &str,
    rng: &mut R,
) -> Result<usize, AppError> {
    let docs = seed_documents(rng);

    for (id, doc) in &docs {
        engine.upsert_document(index, *id, doc).await?;
        tracing::debug!("Seeded document {} ({}): {}", id, doc.content_type, doc.title);
    }

    engine.refresh_index(index).await?;
    tracing::info!("Seeded {} sample documents into '{}'.", docs.len(), index);

    Ok(docs.len())
}

/// Run the full startup sequence.
///
/// With `require_ready` set, a readiness timeout aborts with
/// [`AppError::Unavailable`]; otherwise bootstrap carries on and the index
/// calls that follow decide whether startup fails.
pub async fn run_bootstrap<R: Rng + ?Sized>(
    engine: &dyn SearchEngine,
    config: &AppConfig,
    rng: &mut R,
) -> Result<BootstrapReport, AppError> {
    tracing::info!("Waiting for search engine at {}...", config.opensearch_url);

    let readiness = wait_for_engine(engine, config.ready_timeout(), config.ready_interval()).await;
    if readiness == Readiness::TimedOut && config.require_ready {
        return Err(AppError::Unavailable(format!(
            "no healthy response from {} within {}s",
            config.opensearch_url, config.ready_timeout_secs
        )));
    }

    let index_created = ensure_index(engine, &config.index_name).await?;

    let seeded = if index_created && config.seed_on_create {
        seed_index(engine, &config.index_name, rng).await?
    } else {
        0
    };

    Ok(BootstrapReport {
        readiness,
        index_created,
        seeded,
    })
}
