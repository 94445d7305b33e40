//! Site configuration (folio.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    /// One-line introduction shown under the author heading on the home page
    pub intro: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,
    /// URL prefix for post pages, e.g. "blog" -> /blog/<slug>/
    pub blog_dir: String,

    // Directory
    pub content_dir: String,
    pub posts_dir: String,
    pub out_dir: String,

    // Writing
    pub new_post_name: String,
    pub build_drafts: bool,

    // Display
    pub date_format: String,
    /// Color scheme applied to the layout: "system", "light" or "dark"
    pub appearance: String,

    // Navigation and footer chrome
    #[serde(default)]
    pub nav: Vec<LinkItem>,
    #[serde(default)]
    pub footer_links: Vec<LinkItem>,

    /// Publications listed on the home page
    #[serde(default)]
    pub publications: Vec<Publication>,

    // Feed
    pub feed: bool,
    pub feed_limit: usize,

    // Code highlighting
    pub highlight_theme: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "folio".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            intro: String::new(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),
            blog_dir: "blog".to_string(),

            content_dir: "content".to_string(),
            posts_dir: "posts".to_string(),
            out_dir: "public".to_string(),

            new_post_name: ":title.md".to_string(),
            build_drafts: false,

            date_format: "MMMM D, YYYY".to_string(),
            appearance: "system".to_string(),

            nav: vec![
                LinkItem {
                    name: "home".to_string(),
                    path: "/".to_string(),
                },
                LinkItem {
                    name: "blog".to_string(),
                    path: "/blog/".to_string(),
                },
            ],
            footer_links: Vec::new(),
            publications: Vec::new(),

            feed: true,
            feed_limit: 20,

            highlight_theme: "base16-ocean.dark".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// A named link used for navigation and footer entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkItem {
    pub name: String,
    pub path: String,
}

/// A publication listed on the home page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Publication {
    pub title: String,
    pub href: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "folio");
        assert_eq!(config.blog_dir, "blog");
        assert_eq!(config.appearance, "system");
        assert_eq!(config.nav.len(), 2);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Site
author: Test User
appearance: dark
publications:
  - title: A Paper
    href: https://arxiv.org/abs/0000.00000
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Site");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.appearance, "dark");
        assert_eq!(config.publications.len(), 1);
        assert_eq!(config.publications[0].title, "A Paper");
    }

    #[test]
    fn test_unknown_keys_preserved() {
        let yaml = r#"
title: My Site
analytics_id: UA-123
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.extra.contains_key("analytics_id"));
    }
}
