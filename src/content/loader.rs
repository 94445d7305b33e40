//! Content loader - loads post records from the content directory

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::{frontmatter, ContentRecord, FrontMatter, MarkdownRenderer};
use crate::Folio;

/// Failure to load the content snapshot.
///
/// Loading is atomic: the first malformed record aborts the whole load, so a
/// build never renders a partial or misordered listing.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("content source {path:?} is not readable")]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path:?}: {message}")]
    FrontMatter { path: PathBuf, message: String },

    #[error("{path:?}: missing required `{field}` field")]
    MissingField { path: PathBuf, field: &'static str },

    #[error("{path:?}: `title` must not be empty")]
    EmptyTitle { path: PathBuf },

    #[error("{path:?}: unrecognized date `{value}`")]
    InvalidDate { path: PathBuf, value: String },

    #[error("duplicate slug `{slug}`: {first:?} and {second:?}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("{path:?}: failed to render markdown: {message}")]
    Render { path: PathBuf, message: String },
}

/// Loads post records from `<content_dir>/<posts_dir>`
pub struct ContentLoader<'a> {
    folio: &'a Folio,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(folio: &'a Folio) -> Self {
        let renderer = MarkdownRenderer::new(&folio.config.highlight_theme);
        Self { folio, renderer }
    }

    /// Load all post records.
    ///
    /// Records come back in source-path order; callers wanting the display
    /// order go through [`crate::listing`]. Drafts are included here and
    /// filtered by the build according to configuration.
    pub fn load(&self) -> Result<Vec<ContentRecord>, LoadError> {
        let posts_dir = self
            .folio
            .content_dir
            .join(&self.folio.config.posts_dir);

        // A missing source directory is an error, not an empty site: the
        // listing must reflect the full curated set or nothing.
        if !posts_dir.is_dir() {
            return Err(LoadError::Source {
                path: posts_dir,
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no such directory",
                ),
            });
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&posts_dir).follow_links(true) {
            let entry = entry.map_err(|e| LoadError::Source {
                path: posts_dir.clone(),
                source: e.into(),
            })?;
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                files.push(path.to_path_buf());
            }
        }

        // Path order fixes the snapshot's insertion order, which in turn
        // fixes the tie-break order for posts sharing a timestamp.
        files.sort();

        let mut seen: HashMap<String, PathBuf> = HashMap::new();
        let mut records = Vec::with_capacity(files.len());

        for path in &files {
            let record = self.load_record(path)?;

            if let Some(first) = seen.get(&record.slug) {
                return Err(LoadError::DuplicateSlug {
                    slug: record.slug,
                    first: first.clone(),
                    second: path.clone(),
                });
            }
            seen.insert(record.slug.clone(), path.clone());
            records.push(record);
        }

        tracing::debug!("loaded {} records", records.len());
        Ok(records)
    }

    /// Load a single record from a file
    fn load_record(&self, path: &Path) -> Result<ContentRecord, LoadError> {
        let content = fs::read_to_string(path).map_err(|e| LoadError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let (fm, body) = FrontMatter::parse(&content).map_err(|e| LoadError::FrontMatter {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let title = fm.title.as_deref().ok_or_else(|| LoadError::MissingField {
            path: path.to_path_buf(),
            field: "title",
        })?;
        if title.trim().is_empty() {
            return Err(LoadError::EmptyTitle {
                path: path.to_path_buf(),
            });
        }

        let raw_date = fm.date.as_deref().ok_or_else(|| LoadError::MissingField {
            path: path.to_path_buf(),
            field: "date",
        })?;
        let published_at =
            frontmatter::parse_date_string(raw_date).ok_or_else(|| LoadError::InvalidDate {
                path: path.to_path_buf(),
                value: raw_date.to_string(),
            })?;

        // The file stem is the slug; permalinks use it, not the title
        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        let source = path
            .strip_prefix(&self.folio.content_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let url_path = format!("{}/{}/", self.folio.config.blog_dir, slug);
        let permalink = format!(
            "{}{}/{}",
            self.folio.config.url.trim_end_matches('/'),
            self.folio.config.root.trim_end_matches('/'),
            url_path
        );

        let html = self
            .renderer
            .render(body)
            .map_err(|e| LoadError::Render {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let mut record = ContentRecord::new(slug, title.to_string(), published_at);
        record.summary = fm.summary;
        record.draft = fm.draft;
        record.raw = body.to_string();
        record.html = html;
        record.source = source;
        record.full_source = path.to_path_buf();
        record.path = url_path;
        record.permalink = permalink;
        record.extra = fm.extra;

        Ok(record)
    }
}

/// Check if a file is a markdown file
pub(crate) fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
