use serde::{Deserialize, Serialize};

/// Query-string parameters of `GET /search`.
///
/// Both fields are optional at the extractor level so a missing `q` can be
/// reported as a validation error instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub content_type: Option<String>,
}

/// A single entry in the public search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: Option<String>,
    pub snippet: String,
}
