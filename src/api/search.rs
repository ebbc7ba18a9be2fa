use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};

use crate::app::AppState;
use crate::error::AppError;
use crate::models::document::ContentType;
use crate::models::search::{SearchParams, SearchResult};
use crate::search::client::SearchEngine;
use crate::search::query::translate;
use crate::search::results::shape;

/// Core search logic, separated from the HTTP layer for testability.
///
/// Validates the parameters, translates them into a structured query, runs it
/// against `index` and reshapes the hits. Engine failures propagate unchanged.
pub async fn process_search(
    engine: &dyn SearchEngine,
    index: &str,
    params: SearchParams,
) -> Result<Vec<SearchResult>, AppError> {
    let query = match params.q {
        Some(q) if !q.is_empty() => q,
        Some(_) => return Err(AppError::Validation("Query parameter 'q' cannot be empty".into())),
        None => return Err(AppError::Validation("Missing required query parameter 'q'".into())),
    };

    if let Some(ct) = params.content_type.as_deref().filter(|ct| !ct.is_empty()) {
        if ContentType::from_str_ci(ct).map(|known| known.as_str()) != Some(ct) {
            tracing::debug!("Unknown content_type '{}', filter will match nothing", ct);
        }
    }

    let structured = translate(&query, params.content_type.as_deref());
    let hits = engine.search(index, &structured).await?;

    tracing::debug!(
        "Search '{}' (content_type={:?}) returned {} hits",
        query,
        params.content_type,
        hits.len()
    );
    for hit in &hits {
        tracing::trace!(
            "hit id={:?} score={:?} content_type={:?}",
            hit.id,
            hit.score,
            hit.source.content_type
        );
    }

    Ok(shape(hits))
}

/// Axum handler for `GET /search?q=<text>&content_type=<category>`.
pub async fn search_handler(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<axum::Json<Vec<SearchResult>>, AppError> {
    let Query(params) = params.map_err(|e| AppError::Validation(e.body_text()))?;

    let results = process_search(state.search_engine.as_ref(), &state.index_name, params).await?;

    Ok(axum::Json(results))
}
