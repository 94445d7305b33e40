//! Content record model

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A single piece of publishable content (a blog post).
///
/// Records are built once per load as a read-only snapshot; nothing mutates
/// them after the loader returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Unique identifier, derived from the source file name
    pub slug: String,

    /// Display title, non-empty
    pub title: String,

    /// Publication date
    pub published_at: DateTime<Local>,

    /// Teaser line shown in feeds and metadata
    pub summary: Option<String>,

    /// Drafts are excluded from the built site unless enabled
    pub draft: bool,

    /// Raw markdown body
    pub raw: String,

    /// Rendered HTML body
    pub html: String,

    /// Source file path relative to the content directory
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// URL path (without root), e.g. `blog/my-post/`
    pub path: String,

    /// Full permalink URL
    pub permalink: String,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl ContentRecord {
    /// Create a record with the required fields; the loader fills in the rest.
    pub fn new(slug: String, title: String, published_at: DateTime<Local>) -> Self {
        Self {
            slug,
            title,
            published_at,
            summary: None,
            draft: false,
            raw: String::new(),
            html: String::new(),
            source: String::new(),
            full_source: PathBuf::new(),
            path: String::new(),
            permalink: String::new(),
            extra: HashMap::new(),
        }
    }
}
