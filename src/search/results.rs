use serde::Deserialize;

use crate::models::search::SearchResult;

/// Maximum number of characters kept from a document body.
pub const SNIPPET_CHARS: usize = 50;

/// Stored source of a hit. Fields are optional since the engine returns
/// whatever was indexed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HitSource {
    pub title: Option<String>,
    pub content: Option<String>,
    pub content_type: Option<String>,
}

/// A single hit as returned by the search engine.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawHit {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_source", default)]
    pub source: HitSource,
}

/// Envelope of a search response: `{"hits": {"hits": [...]}}`.
#[derive(Debug, Deserialize)]
pub struct SearchResponseBody {
    pub hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
pub struct HitsEnvelope {
    #[serde(default)]
    pub hits: Vec<RawHit>,
}

/// First [`SNIPPET_CHARS`] characters of `content`.
pub fn snippet(content: &str) -> String {
    content.chars().take(SNIPPET_CHARS).collect()
}

/// Reshape raw hits into public results, preserving engine order.
pub fn shape(hits: Vec<RawHit>) -> Vec<SearchResult> {
    hits.into_iter()
        .map(|hit| SearchResult {
            title: hit.source.title,
            snippet: hit.source.content.as_deref().map(snippet).unwrap_or_default(),
        })
        .collect()
}
