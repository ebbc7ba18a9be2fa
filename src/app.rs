use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::search::client::SearchEngine;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    /// The single search engine client shared by all requests.
    pub search_engine: Arc<dyn SearchEngine>,
    /// Index queried by `/search`.
    pub index_name: String,
}

impl AppState {
    pub fn new(search_engine: Arc<dyn SearchEngine>, index_name: impl Into<String>) -> Self {
        Self {
            search_engine,
            index_name: index_name.into(),
        }
    }
}

/// Build the Axum router with every public route.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/search", get(api::search::search_handler))
        .route("/health", get(api::health::health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
