//! folio: a static site generator for personal portfolio/blog sites
//!
//! This crate turns a directory of Markdown posts with front matter into a
//! small static website: a home page with an introduction, publications and a
//! date-sorted post list, a blog index, one page per post, an Atom feed and a
//! sitemap. Templates are embedded Tera templates rendered at build time.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod listing;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// Name of the site configuration file at the site root.
pub const CONFIG_FILE: &str = "folio.yml";

/// The main folio application
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content directory (posts and assets)
    pub content_dir: std::path::PathBuf,
    /// Output directory for the built site
    pub out_dir: std::path::PathBuf,
}

impl Folio {
    /// Create a new folio instance from a site directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let out_dir = base_dir.join(&config.out_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            out_dir,
        })
    }

    /// Build the static site
    pub fn build(&self) -> Result<()> {
        commands::build::run(self, false)
    }

    /// Remove the output directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str) -> Result<()> {
        commands::new::run(self, title)
    }
}
