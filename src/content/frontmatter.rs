//! Front-matter parsing

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Front-matter data from a post file.
///
/// The field values are kept as written; validation against the required
/// shape (non-empty title, resolvable date) happens in the loader, which
/// rejects a record eagerly instead of propagating unchecked values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,

    /// Publication date string; `publishedAt` is accepted as an alias
    #[serde(alias = "publishedAt")]
    pub date: Option<String>,

    /// Teaser line for feeds and metadata
    pub summary: Option<String>,

    /// Drafts are skipped unless the build enables them
    pub draft: bool,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from a content string.
    ///
    /// Returns `(front_matter, body)`. A file may carry YAML front matter
    /// delimited by `---` lines, or a JSON object at the top. Malformed front
    /// matter is an error; a file without any front matter yields the default
    /// (and will then fail the loader's required-field checks).
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim_start();

        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        if content.starts_with('{') {
            return Self::parse_json(content);
        }

        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str)> {
        let rest = content[3..].trim_start_matches(['\n', '\r']);

        let end_pos = rest
            .find("\n---")
            .ok_or_else(|| anyhow!("front matter is missing its closing ---"))?;

        let yaml_content = &rest[..end_pos];
        let body = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let fm: FrontMatter = serde_yaml::from_str(yaml_content)
            .map_err(|e| anyhow!("invalid YAML front matter: {}", e))?;

        Ok((fm, body))
    }

    fn parse_json(content: &str) -> Result<(Self, &str)> {
        // Find the matching closing brace of the leading object
        let mut depth = 0usize;
        let mut end_pos = 0usize;
        for (i, c) in content.char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        end_pos = i + 1;
                        break;
                    }
                }
                _ => {}
            }
        }

        if end_pos == 0 {
            return Err(anyhow!("JSON front matter is missing its closing brace"));
        }

        let fm: FrontMatter = serde_json::from_str(&content[..end_pos])
            .map_err(|e| anyhow!("invalid JSON front matter: {}", e))?;

        let body = content[end_pos..].trim_start_matches(['\n', '\r']);
        Ok((fm, body))
    }
}

/// Parse a date string into a timestamp.
///
/// Accepts ISO-8601 / RFC 3339 values and the common `YYYY-MM-DD [HH:MM[:SS]]`
/// spellings. Date-only values resolve to midnight local time.
pub fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(DateTime::from_naive_utc_and_offset(
                dt,
                *Local::now().offset(),
            ));
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = chrono::NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return Some(DateTime::from_naive_utc_and_offset(
                dt,
                *Local::now().offset(),
            ));
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    None
}
