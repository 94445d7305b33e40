//! Ordered post listing
//!
//! Produces the deterministically ordered view of loaded records that the
//! home page, blog index, feed and `list` command all render from: newest
//! first, ties kept in the loader's insertion order.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::content::ContentRecord;
use crate::helpers::format_date;

/// Sort records by publication date, newest first.
///
/// The sort is stable, so records sharing a timestamp keep their relative
/// input order and repeated calls on the same snapshot produce the same
/// sequence.
pub fn ordered(records: &[ContentRecord]) -> Vec<&ContentRecord> {
    let mut sorted: Vec<&ContentRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    sorted
}

/// One row of the rendered post list
#[derive(Debug, Clone, Serialize)]
pub struct ListEntry {
    pub slug: String,
    pub title: String,
    pub published_at: DateTime<Local>,
    /// Date formatted for display, e.g. "June 15, 2024"
    pub date: String,
    /// URL path without the site root, e.g. `blog/my-post/`
    pub path: String,
}

/// A computed-once, iterate-many view of the ordered post list
#[derive(Debug, Clone)]
pub struct Listing {
    entries: Vec<ListEntry>,
}

impl Listing {
    /// Build the listing from a loaded snapshot
    pub fn from_records(records: &[ContentRecord], date_format: &str) -> Self {
        let entries = ordered(records)
            .into_iter()
            .map(|r| ListEntry {
                slug: r.slug.clone(),
                title: r.title.clone(),
                published_at: r.published_at,
                date: format_date(&r.published_at, date_format),
                path: r.path.clone(),
            })
            .collect();
        Self { entries }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ListEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Listing {
    type Item = &'a ListEntry;
    type IntoIter = std::slice::Iter<'a, ListEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
