use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Axum handler for `GET /health`.
///
/// Reports liveness of this process only; the search engine is not contacted.
pub async fn health_handler() -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse { status: "ok" })
}
