use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a document, stored as an exact-match keyword in the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Article,
    Blog,
    Guide,
    Note,
}

impl ContentType {
    /// Every known category, in declaration order.
    pub const ALL: [ContentType; 4] = [
        ContentType::Article,
        ContentType::Blog,
        ContentType::Guide,
        ContentType::Note,
    ];

    /// The keyword value stored in the index.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Article => "article",
            ContentType::Blog => "blog",
            ContentType::Guide => "guide",
            ContentType::Note => "note",
        }
    }

    /// Parse a content type from a string (case-insensitive).
    pub fn from_str_ci(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "article" => Some(ContentType::Article),
            "blog" => Some(ContentType::Blog),
            "guide" => Some(ContentType::Guide),
            "note" => Some(ContentType::Note),
            _ => None,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document as stored in the search index.
///
/// Identity is the numeric id assigned when the document is written; it is
/// not part of the stored source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub content: String,
    pub content_type: ContentType,
}
