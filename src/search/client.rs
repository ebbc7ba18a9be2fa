use async_trait::async_trait;
use opensearch::cert::CertificateValidation;
use opensearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use opensearch::http::{StatusCode, Url};
use opensearch::indices::{IndicesCreateParts, IndicesExistsParts, IndicesRefreshParts};
use opensearch::{IndexParts, OpenSearch, SearchParts};
use serde_json::Value;
use std::time::Duration;

use crate::error::AppError;
use crate::models::document::Document;
use crate::search::query::StructuredQuery;
use crate::search::results::{RawHit, SearchResponseBody};

/// Capabilities this service needs from the search engine.
///
/// Implementations must be safe to share across concurrently handled
/// requests; the trait exists so tests can substitute an in-memory engine.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Health probe. `Ok(false)` means the engine answered but is not healthy.
    async fn ping(&self) -> Result<bool, AppError>;

    /// Whether the named index exists.
    async fn index_exists(&self, index: &str) -> Result<bool, AppError>;

    /// Create the named index with the given creation body (mappings).
    async fn create_index(&self, index: &str, body: &Value) -> Result<(), AppError>;

    /// Insert or replace the document stored under `id`.
    async fn upsert_document(&self, index: &str, id: u64, doc: &Document) -> Result<(), AppError>;

    /// Make every write so far visible to searches.
    async fn refresh_index(&self, index: &str) -> Result<(), AppError>;

    /// Run a query and return hits in relevance order.
    async fn search(&self, index: &str, query: &StructuredQuery) -> Result<Vec<RawHit>, AppError>;
}

/// Per-request timeout applied by the OpenSearch transport.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// OpenSearch implementation of the SearchEngine.
///
/// Wraps a single `OpenSearch` client whose transport pools connections, so
/// one instance serves every request.
#[derive(Clone)]
pub struct OpenSearchEngine {
    client: OpenSearch,
}

impl OpenSearchEngine {
    /// Connect to a single OpenSearch node.
    ///
    /// With `verify_certs = false` TLS certificates are not validated, which
    /// matches a development cluster with self-signed certificates.
    pub fn new(url: &str, verify_certs: bool) -> Result<Self, AppError> {
        let parsed = Url::parse(url)
            .map_err(|e| AppError::Config(format!("Invalid OpenSearch URL '{url}': {e}")))?;

        let mut builder = TransportBuilder::new(SingleNodeConnectionPool::new(parsed))
            .timeout(REQUEST_TIMEOUT)
            .disable_proxy();
        if !verify_certs {
            builder = builder.cert_validation(CertificateValidation::None);
        }

        let transport = builder
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build OpenSearch transport: {e}")))?;

        Ok(Self {
            client: OpenSearch::new(transport),
        })
    }
}

#[async_trait]
impl SearchEngine for OpenSearchEngine {
    async fn ping(&self) -> Result<bool, AppError> {
        let response = self
            .client
            .ping()
            .send()
            .await
            .map_err(|e| AppError::SearchEngine(format!("OpenSearch ping failed: {e}")))?;

        Ok(response.status_code().is_success())
    }

    async fn index_exists(&self, index: &str) -> Result<bool, AppError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| AppError::SearchEngine(format!("OpenSearch exists error: {e}")))?;

        match response.status_code() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            other => Err(AppError::SearchEngine(format!(
                "Unexpected status {other} checking index '{index}'"
            ))),
        }
    }

    async fn create_index(&self, index: &str, body: &Value) -> Result<(), AppError> {
        self.client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(body)
            .send()
            .await
            .and_then(|r| r.error_for_status_code())
            .map_err(|e| AppError::SearchEngine(format!("Failed to create index '{index}': {e}")))?;

        Ok(())
    }

    async fn upsert_document(&self, index: &str, id: u64, doc: &Document) -> Result<(), AppError> {
        let id = id.to_string();

        self.client
            .index(IndexParts::IndexId(index, &id))
            .body(doc)
            .send()
            .await
            .and_then(|r| r.error_for_status_code())
            .map_err(|e| AppError::SearchEngine(format!("Failed to index document {id}: {e}")))?;

        Ok(())
    }

    async fn refresh_index(&self, index: &str) -> Result<(), AppError> {
        self.client
            .indices()
            .refresh(IndicesRefreshParts::Index(&[index]))
            .send()
            .await
            .and_then(|r| r.error_for_status_code())
            .map_err(|e| AppError::SearchEngine(format!("Failed to refresh index '{index}': {e}")))?;

        Ok(())
    }

    async fn search(&self, index: &str, query: &StructuredQuery) -> Result<Vec<RawHit>, AppError> {
        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .body(query.to_body())
            .send()
            .await
            .and_then(|r| r.error_for_status_code())
            .map_err(|e| AppError::SearchEngine(format!("OpenSearch search error: {e}")))?;

        let body: SearchResponseBody = response
            .json()
            .await
            .map_err(|e| AppError::SearchEngine(format!("Malformed search response: {e}")))?;

        Ok(body.hits.hits)
    }
}
