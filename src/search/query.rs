use serde_json::{json, Value};

use crate::search::schema::{KeywordField, TextField};

/// A scored clause inside the boolean `must` list.
#[derive(Debug, Clone, PartialEq)]
pub enum MustClause {
    /// Relevance-scored match of `query` against any of `fields`.
    MultiMatch {
        query: String,
        fields: Vec<TextField>,
    },
}

/// A non-scoring clause inside the boolean `filter` list.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    /// Exact equality on a keyword field.
    Term { field: KeywordField, value: String },
}

/// Boolean search query built from an incoming search request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructuredQuery {
    pub must: Vec<MustClause>,
    pub filter: Vec<FilterClause>,
}

impl StructuredQuery {
    /// Render the query as a search request body.
    pub fn to_body(&self) -> Value {
        let must: Vec<Value> = self
            .must
            .iter()
            .map(|clause| match clause {
                MustClause::MultiMatch { query, fields } => json!({
                    "multi_match": {
                        "query": query,
                        "fields": fields.iter().map(|f| f.name()).collect::<Vec<_>>(),
                    }
                }),
            })
            .collect();

        let filter: Vec<Value> = self
            .filter
            .iter()
            .map(|clause| match clause {
                FilterClause::Term { field, value } => json!({
                    "term": { field.name(): value }
                }),
            })
            .collect();

        json!({
            "query": {
                "bool": {
                    "must": must,
                    "filter": filter,
                }
            }
        })
    }
}

/// Translate a free-text query and optional category into a structured query.
///
/// The text is matched against every full-text field. A non-empty
/// `content_type` adds an exact-match filter; the value is passed through
/// untouched, so unknown categories simply match nothing.
pub fn translate(query: &str, content_type: Option<&str>) -> StructuredQuery {
    let mut structured = StructuredQuery {
        must: vec![MustClause::MultiMatch {
            query: query.to_string(),
            fields: TextField::ALL.to_vec(),
        }],
        filter: Vec::new(),
    };

    if let Some(ct) = content_type.filter(|ct| !ct.is_empty()) {
        structured.filter.push(FilterClause::Term {
            field: KeywordField::ContentType,
            value: ct.to_string(),
        });
    }

    structured
}
