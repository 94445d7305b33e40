//! Generator module - renders the site with the embedded Tera templates

use anyhow::Result;
use chrono::Datelike;
use std::fs;
use tera::Context;
use walkdir::WalkDir;

use crate::content::{loader::is_markdown_file, ContentRecord};
use crate::helpers::{date_xml, encode_url, full_url_for, url_for};
use crate::listing::Listing;
use crate::templates::{PostItem, PostPageData, SiteData, TemplateRenderer, STYLESHEET};
use crate::Folio;

/// Static site generator
pub struct Generator {
    folio: Folio,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        Ok(Self {
            folio: folio.clone(),
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Render the entire site from a loaded snapshot
    pub fn generate(&self, records: &[ContentRecord]) -> Result<()> {
        fs::create_dir_all(&self.folio.out_dir)?;

        self.write_stylesheet()?;
        self.copy_content_assets()?;

        let listing = Listing::from_records(records, &self.folio.config.date_format);
        let post_items: Vec<PostItem> = listing
            .iter()
            .map(|e| PostItem {
                title: e.title.clone(),
                date: e.date.clone(),
                datetime: date_xml(&e.published_at),
                url: url_for(&self.folio.config, &e.path),
            })
            .collect();

        self.generate_home(&post_items)?;
        self.generate_blog_index(&post_items)?;
        self.generate_post_pages(records)?;

        if self.folio.config.feed {
            self.generate_atom_feed(records)?;
        }
        self.generate_sitemap(&listing)?;
        self.generate_robots()?;

        Ok(())
    }

    /// Common template context: site data, chrome, current year
    fn base_context(&self) -> Context {
        let config = &self.folio.config;

        let site = SiteData {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            intro: config.intro.clone(),
            url: config.url.trim_end_matches('/').to_string(),
            root: config.root.clone(),
            language: config.language.clone(),
            appearance: config.appearance.clone(),
        };

        let mut context = Context::new();
        context.insert("site", &site);
        context.insert("nav", &config.nav);
        context.insert("footer_links", &config.footer_links);
        context.insert(
            "current_year",
            &chrono::Local::now().year().to_string(),
        );
        context
    }

    fn generate_home(&self, post_items: &[PostItem]) -> Result<()> {
        let config = &self.folio.config;

        let mut context = self.base_context();
        context.insert("posts", post_items);
        context.insert("publications", &config.publications);
        context.insert("page_title", &config.title);
        context.insert("page_url", &url_for(config, ""));

        let html = self.renderer.render("home.html", &context)?;
        let output_path = self.folio.out_dir.join("index.html");
        fs::write(&output_path, html)?;
        tracing::debug!("generated {:?}", output_path);

        Ok(())
    }

    fn generate_blog_index(&self, post_items: &[PostItem]) -> Result<()> {
        let config = &self.folio.config;
        let blog_path = format!("{}/", config.blog_dir);

        let mut context = self.base_context();
        context.insert("posts", post_items);
        context.insert("heading", &config.blog_dir);
        context.insert(
            "page_title",
            &format!("{} | {}", config.blog_dir, config.title),
        );
        context.insert("page_url", &url_for(config, &blog_path));

        let html = self.renderer.render("blog.html", &context)?;
        let output_path = self.folio.out_dir.join(&config.blog_dir).join("index.html");
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, html)?;
        tracing::debug!("generated {:?}", output_path);

        Ok(())
    }

    fn generate_post_pages(&self, records: &[ContentRecord]) -> Result<()> {
        let config = &self.folio.config;

        for record in crate::listing::ordered(records) {
            let post = PostPageData {
                title: record.title.clone(),
                date: crate::helpers::format_date(&record.published_at, &config.date_format),
                datetime: date_xml(&record.published_at),
                summary: record.summary.clone(),
                content: record.html.clone(),
                url: url_for(config, &record.path),
            };

            let mut context = self.base_context();
            context.insert("post", &post);
            context.insert("page_title", &format!("{} | {}", record.title, config.title));
            context.insert("page_url", &post.url);
            if let Some(summary) = &record.summary {
                context.insert("page_description", summary);
            }

            let html = self.renderer.render("post.html", &context)?;

            let output_path = self
                .folio
                .out_dir
                .join(record.path.trim_end_matches('/'))
                .join("index.html");
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output_path, html)?;
            tracing::debug!("generated post {:?}", output_path);
        }

        tracing::info!("generated {} post pages", records.len());
        Ok(())
    }

    /// Generate the Atom feed from the most recent posts
    fn generate_atom_feed(&self, records: &[ContentRecord]) -> Result<()> {
        let config = &self.folio.config;
        let base = full_url_for(config, "");

        let mut feed = String::new();
        feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
        feed.push('\n');
        feed.push_str(r#"<feed xmlns="http://www.w3.org/2005/Atom">"#);
        feed.push('\n');
        feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
        feed.push_str(&format!(
            "  <subtitle>{}</subtitle>\n",
            escape_xml(&config.description)
        ));
        feed.push_str(&format!(
            "  <link href=\"{}\" rel=\"self\"/>\n",
            full_url_for(config, "atom.xml")
        ));
        feed.push_str(&format!("  <link href=\"{}\"/>\n", base));
        feed.push_str(&format!(
            "  <updated>{}</updated>\n",
            chrono::Utc::now().to_rfc3339()
        ));
        feed.push_str(&format!("  <id>{}</id>\n", base));
        feed.push_str(&format!(
            "  <author><name>{}</name></author>\n",
            escape_xml(&config.author)
        ));

        for record in crate::listing::ordered(records)
            .into_iter()
            .take(config.feed_limit)
        {
            let href = full_url_for(config, &encode_url(&record.path));
            feed.push_str("  <entry>\n");
            feed.push_str(&format!(
                "    <title>{}</title>\n",
                escape_xml(&record.title)
            ));
            feed.push_str(&format!("    <link href=\"{}\"/>\n", href));
            feed.push_str(&format!("    <id>{}</id>\n", href));
            feed.push_str(&format!(
                "    <published>{}</published>\n",
                record.published_at.to_rfc3339()
            ));
            feed.push_str(&format!(
                "    <updated>{}</updated>\n",
                record.published_at.to_rfc3339()
            ));
            if let Some(summary) = &record.summary {
                feed.push_str(&format!(
                    "    <summary>{}</summary>\n",
                    escape_xml(summary)
                ));
            }
            feed.push_str(&format!(
                "    <content type=\"html\"><![CDATA[{}]]></content>\n",
                strip_invalid_xml_chars(&record.html)
            ));
            feed.push_str("  </entry>\n");
        }

        feed.push_str("</feed>\n");

        fs::write(self.folio.out_dir.join("atom.xml"), feed)?;
        tracing::info!("generated atom.xml");

        Ok(())
    }

    fn generate_sitemap(&self, listing: &Listing) -> Result<()> {
        let config = &self.folio.config;

        // Home and blog index carry the newest post date as lastmod
        let latest = listing
            .entries()
            .first()
            .map(|e| date_xml(&e.published_at))
            .unwrap_or_else(|| date_xml(&chrono::Local::now()));

        let mut sitemap = String::new();
        sitemap.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
        sitemap.push('\n');
        sitemap.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        sitemap.push('\n');

        let mut push_url = |loc: &str, lastmod: &str| {
            sitemap.push_str("  <url>\n");
            sitemap.push_str(&format!("    <loc>{}</loc>\n", escape_xml(loc)));
            sitemap.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
            sitemap.push_str("  </url>\n");
        };

        push_url(&full_url_for(config, ""), &latest);
        push_url(
            &full_url_for(config, &format!("{}/", config.blog_dir)),
            &latest,
        );
        for entry in listing {
            push_url(
                &full_url_for(config, &encode_url(&entry.path)),
                &date_xml(&entry.published_at),
            );
        }

        sitemap.push_str("</urlset>\n");

        fs::write(self.folio.out_dir.join("sitemap.xml"), sitemap)?;
        tracing::info!("generated sitemap.xml");

        Ok(())
    }

    fn generate_robots(&self) -> Result<()> {
        let robots = format!(
            "User-agent: *\nAllow: /\n\nSitemap: {}\n",
            full_url_for(&self.folio.config, "sitemap.xml")
        );
        fs::write(self.folio.out_dir.join("robots.txt"), robots)?;
        Ok(())
    }

    fn write_stylesheet(&self) -> Result<()> {
        let css_dir = self.folio.out_dir.join("css");
        fs::create_dir_all(&css_dir)?;
        fs::write(css_dir.join("folio.css"), STYLESHEET)?;
        Ok(())
    }

    /// Copy non-markdown files (images, favicons, ...) from the content
    /// directory into the output directory, preserving relative paths.
    fn copy_content_assets(&self) -> Result<()> {
        let content_dir = &self.folio.content_dir;
        if !content_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(content_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || is_markdown_file(path) {
                continue;
            }

            let relative = path.strip_prefix(content_dir)?;
            let dest = self.folio.out_dir.join(relative);

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
        }

        Ok(())
    }
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Strip control characters XML 1.0 forbids (tab/newline/CR stay)
fn strip_invalid_xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            c == '\t'
                || c == '\n'
                || c == '\r'
                || ('\u{0020}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || ('\u{10000}'..='\u{10FFFF}').contains(&c)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentLoader;
    use std::fs;

    fn build_site(posts: &[(&str, &str)]) -> (tempfile::TempDir, Folio) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("folio.yml"),
            "title: Jane Doe\nauthor: Jane Doe\nurl: https://example.com\n",
        )
        .unwrap();
        let posts_dir = dir.path().join("content/posts");
        fs::create_dir_all(&posts_dir).unwrap();
        for (name, body) in posts {
            fs::write(posts_dir.join(name), body).unwrap();
        }

        let folio = Folio::new(dir.path()).unwrap();
        let records = ContentLoader::new(&folio).load().unwrap();
        Generator::new(&folio).unwrap().generate(&records).unwrap();
        (dir, folio)
    }

    #[test]
    fn test_generate_site_layout() {
        let (_dir, folio) = build_site(&[
            (
                "older.md",
                "---\ntitle: Older Post\ndate: 2023-01-01\n---\nOld body.",
            ),
            (
                "newer.md",
                "---\ntitle: Newer Post\ndate: 2024-06-15\n---\nNew body.",
            ),
        ]);

        let home = fs::read_to_string(folio.out_dir.join("index.html")).unwrap();
        assert!(home.contains("Jane Doe"));
        // Newest first on the home page
        let newer = home.find("Newer Post").unwrap();
        let older = home.find("Older Post").unwrap();
        assert!(newer < older);

        assert!(folio.out_dir.join("blog/index.html").exists());
        assert!(folio.out_dir.join("blog/newer/index.html").exists());
        assert!(folio.out_dir.join("blog/older/index.html").exists());
        assert!(folio.out_dir.join("css/folio.css").exists());
        assert!(folio.out_dir.join("robots.txt").exists());

        let post = fs::read_to_string(folio.out_dir.join("blog/newer/index.html")).unwrap();
        assert!(post.contains("New body."));
        assert!(post.contains("Newer Post | Jane Doe"));
    }

    #[test]
    fn test_generate_feed_and_sitemap() {
        let (_dir, folio) = build_site(&[(
            "hello.md",
            "---\ntitle: Hello & Goodbye\ndate: 2024-06-15\nsummary: A teaser\n---\nBody.",
        )]);

        let feed = fs::read_to_string(folio.out_dir.join("atom.xml")).unwrap();
        assert!(feed.contains("<title>Hello &amp; Goodbye</title>"));
        assert!(feed.contains("<summary>A teaser</summary>"));
        assert!(feed.contains("https://example.com/blog/hello/"));

        let sitemap = fs::read_to_string(folio.out_dir.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://example.com/</loc>"));
        assert!(sitemap.contains("<loc>https://example.com/blog/hello/</loc>"));

        let robots = fs::read_to_string(folio.out_dir.join("robots.txt")).unwrap();
        assert!(robots.contains("Sitemap: https://example.com/sitemap.xml"));
    }

    #[test]
    fn test_assets_copied() {
        let dir = tempfile::tempdir().unwrap();
        let posts_dir = dir.path().join("content/posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(
            posts_dir.join("p.md"),
            "---\ntitle: P\ndate: 2023-01-01\n---\nbody",
        )
        .unwrap();
        fs::write(dir.path().join("content/favicon.ico"), b"icon").unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        let records = ContentLoader::new(&folio).load().unwrap();
        Generator::new(&folio).unwrap().generate(&records).unwrap();

        assert!(folio.out_dir.join("favicon.ico").exists());
        // Markdown sources are not copied through
        assert!(!folio.out_dir.join("posts/p.md").exists());
    }
}
