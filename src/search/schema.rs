//! Declarative index schema.
//!
//! Index creation and query building both read field names from the enums
//! below, so a field is full-text searchable or exact-match filterable in
//! exactly one place.

use serde_json::{json, Map, Value};

/// How the search engine analyses a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Analysed, relevance-scored full text.
    Text,
    /// Stored verbatim, matched by exact equality.
    Keyword,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Keyword => "keyword",
        }
    }
}

/// Fields mapped as full text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Title,
    Content,
}

impl TextField {
    pub const ALL: [TextField; 2] = [TextField::Title, TextField::Content];

    pub fn name(&self) -> &'static str {
        match self {
            TextField::Title => "title",
            TextField::Content => "content",
        }
    }
}

/// Fields mapped as exact-match keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordField {
    ContentType,
}

impl KeywordField {
    pub const ALL: [KeywordField; 1] = [KeywordField::ContentType];

    pub fn name(&self) -> &'static str {
        match self {
            KeywordField::ContentType => "content_type",
        }
    }
}

/// Every mapped field with its kind.
pub fn fields() -> impl Iterator<Item = (&'static str, FieldKind)> {
    TextField::ALL
        .into_iter()
        .map(|f| (f.name(), FieldKind::Text))
        .chain(
            KeywordField::ALL
                .into_iter()
                .map(|f| (f.name(), FieldKind::Keyword)),
        )
}

/// The index-creation body: `{"mappings": {"properties": {...}}}`.
pub fn index_body() -> Value {
    let properties: Map<String, Value> = fields()
        .map(|(name, kind)| (name.to_string(), json!({ "type": kind.as_str() })))
        .collect();

    json!({
        "mappings": {
            "properties": properties
        }
    })
}
