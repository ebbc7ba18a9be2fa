#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use testcontainers::core::IntoContainerPort;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};

use docsearch::app::{build_router, AppState};
use docsearch::config::AppConfig;
use docsearch::error::AppError;
use docsearch::models::document::Document;
use docsearch::search::client::{OpenSearchEngine, SearchEngine};
use docsearch::search::query::{FilterClause, MustClause, StructuredQuery};
use docsearch::search::results::{HitSource, RawHit};

#[derive(Default)]
struct IndexData {
    /// Documents visible to searches.
    visible: BTreeMap<u64, Document>,
    /// Written but not yet refreshed.
    pending: BTreeMap<u64, Document>,
}

/// In-memory stand-in for the search engine.
///
/// Writes only become searchable after `refresh_index`, like the real
/// engine's near-real-time visibility. Matching is a naive case-insensitive
/// substring test of each query word against the requested fields.
#[derive(Default)]
pub struct InMemoryEngine {
    indexes: Mutex<HashMap<String, IndexData>>,
    pub fail_searches: AtomicBool,
    pub search_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub upsert_calls: AtomicUsize,
}

impl InMemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of visible documents in `index`.
    pub fn visible_count(&self, index: &str) -> usize {
        self.indexes
            .lock()
            .unwrap()
            .get(index)
            .map(|data| data.visible.len())
            .unwrap_or(0)
    }

    pub fn visible_documents(&self, index: &str) -> Vec<Document> {
        self.indexes
            .lock()
            .unwrap()
            .get(index)
            .map(|data| data.visible.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Create `index` directly and make `docs` visible, bypassing bootstrap.
    pub fn insert_visible(&self, index: &str, docs: Vec<(u64, Document)>) {
        let mut indexes = self.indexes.lock().unwrap();
        let data = indexes.entry(index.to_string()).or_default();
        data.visible.extend(docs);
    }
}

fn field_value<'a>(doc: &'a Document, field: &str) -> Option<&'a str> {
    match field {
        "title" => Some(doc.title.as_str()),
        "content" => Some(doc.content.as_str()),
        "content_type" => Some(doc.content_type.as_str()),
        _ => None,
    }
}

fn score(doc: &Document, query: &StructuredQuery) -> Option<usize> {
    let mut total = 0;
    for clause in &query.must {
        let MustClause::MultiMatch { query, fields } = clause;
        let words: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        let hits = fields
            .iter()
            .filter_map(|f| field_value(doc, f.name()))
            .map(|text| {
                let text = text.to_lowercase();
                words.iter().filter(|w| text.contains(w.as_str())).count()
            })
            .sum::<usize>();
        if hits == 0 {
            return None;
        }
        total += hits;
    }

    for clause in &query.filter {
        let FilterClause::Term { field, value } = clause;
        if field_value(doc, field.name()) != Some(value.as_str()) {
            return None;
        }
    }

    Some(total)
}

#[async_trait]
impl SearchEngine for InMemoryEngine {
    async fn ping(&self) -> Result<bool, AppError> {
        Ok(true)
    }

    async fn index_exists(&self, index: &str) -> Result<bool, AppError> {
        Ok(self.indexes.lock().unwrap().contains_key(index))
    }

    async fn create_index(&self, index: &str, _body: &Value) -> Result<(), AppError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let mut indexes = self.indexes.lock().unwrap();
        if indexes.contains_key(index) {
            return Err(AppError::SearchEngine(format!(
                "resource_already_exists_exception: {index}"
            )));
        }
        indexes.insert(index.to_string(), IndexData::default());
        Ok(())
    }

    async fn upsert_document(&self, index: &str, id: u64, doc: &Document) -> Result<(), AppError> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        let mut indexes = self.indexes.lock().unwrap();
        let data = indexes.entry(index.to_string()).or_default();
        data.pending.insert(id, doc.clone());
        Ok(())
    }

    async fn refresh_index(&self, index: &str) -> Result<(), AppError> {
        let mut indexes = self.indexes.lock().unwrap();
        let data = indexes
            .get_mut(index)
            .ok_or_else(|| AppError::SearchEngine(format!("index_not_found_exception: {index}")))?;
        let pending = std::mem::take(&mut data.pending);
        data.visible.extend(pending);
        Ok(())
    }

    async fn search(&self, index: &str, query: &StructuredQuery) -> Result<Vec<RawHit>, AppError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_searches.load(Ordering::SeqCst) {
            return Err(AppError::SearchEngine("search_phase_execution_exception".into()));
        }

        let indexes = self.indexes.lock().unwrap();
        let data = indexes
            .get(index)
            .ok_or_else(|| AppError::SearchEngine(format!("index_not_found_exception: {index}")))?;

        let mut scored: Vec<(usize, u64, &Document)> = data
            .visible
            .iter()
            .filter_map(|(id, doc)| score(doc, query).map(|s| (s, *id, doc)))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        Ok(scored
            .into_iter()
            .map(|(s, id, doc)| RawHit {
                id: Some(id.to_string()),
                score: Some(s as f64),
                source: HitSource {
                    title: Some(doc.title.clone()),
                    content: Some(doc.content.clone()),
                    content_type: Some(doc.content_type.to_string()),
                },
            })
            .collect())
    }
}

/// Build a `TestServer` over the given engine, expecting success by default.
pub fn server(engine: Arc<dyn SearchEngine>) -> axum_test::TestServer {
    axum_test::TestServer::builder()
        .expect_success_by_default()
        .build(build_router(AppState::new(engine, "documents")))
}

/// Build a `TestServer` that does NOT expect success by default (for error tests).
pub fn server_permissive(engine: Arc<dyn SearchEngine>) -> axum_test::TestServer {
    axum_test::TestServer::builder()
        .build(build_router(AppState::new(engine, "documents")))
}

/// A running single-node OpenSearch container plus a client pointed at it.
///
/// The container is stopped when this struct is dropped.
pub struct OpenSearchEnv {
    _container: ContainerAsync<GenericImage>,
    pub url: String,
    pub engine: Arc<OpenSearchEngine>,
}

impl OpenSearchEnv {
    pub async fn start() -> Self {
        let container = GenericImage::new("opensearchproject/opensearch", "2.11.1")
            .with_exposed_port(9200.tcp())
            .with_env_var("discovery.type", "single-node")
            .with_env_var("DISABLE_SECURITY_PLUGIN", "true")
            .with_env_var("DISABLE_INSTALL_DEMO_CONFIG", "true")
            .with_env_var("OPENSEARCH_JAVA_OPTS", "-Xms512m -Xmx512m")
            .start()
            .await
            .expect("Failed to start OpenSearch container");

        let port = container
            .get_host_port_ipv4(9200)
            .await
            .expect("Failed to get OpenSearch port");
        let url = format!("http://127.0.0.1:{}", port);

        let engine = Arc::new(
            OpenSearchEngine::new(&url, false).expect("Failed to create OpenSearchEngine"),
        );

        Self {
            _container: container,
            url,
            engine,
        }
    }

    /// Config pointing at this container with a generous readiness window,
    /// since the JVM takes a while to come up.
    pub fn config(&self, index_name: &str) -> AppConfig {
        AppConfig {
            opensearch_url: self.url.clone(),
            index_name: index_name.to_string(),
            ready_timeout_secs: 180,
            ready_interval_secs: 1,
            ..AppConfig::default()
        }
    }

    pub async fn wait_ready(&self) {
        let readiness = docsearch::bootstrap::wait_for_engine(
            self.engine.as_ref(),
            Duration::from_secs(180),
            Duration::from_secs(1),
        )
        .await;
        assert_eq!(readiness, docsearch::bootstrap::Readiness::Ready);
    }
}
