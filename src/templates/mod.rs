//! Built-in site theme rendered with the Tera template engine
//!
//! All templates are embedded in the binary; a site needs no theme directory.
//! The layout takes navigation, footer links and appearance from explicit
//! template context, so page chrome is driven entirely by configuration.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

/// The built-in stylesheet, written to `css/folio.css` at build time
pub const STYLESHEET: &str = include_str!("theme/folio.css");

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all theme templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Post bodies are pre-rendered HTML; escaping happens explicitly in
        // the templates where values are text.
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("theme/layout.html")),
            ("home.html", include_str!("theme/home.html")),
            ("blog.html", include_str!("theme/blog.html")),
            ("post.html", include_str!("theme/post.html")),
            ("partials/nav.html", include_str!("theme/partials/nav.html")),
            (
                "partials/footer.html",
                include_str!("theme/partials/footer.html"),
            ),
            (
                "partials/post_list.html",
                include_str!("theme/partials/post_list.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with the given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Site-wide template context
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub intro: String,
    pub url: String,
    pub root: String,
    pub language: String,
    /// "system", "light" or "dark"
    pub appearance: String,
}

/// A post row in the home/blog listings
#[derive(Debug, Clone, Serialize)]
pub struct PostItem {
    pub title: String,
    /// Display date, e.g. "June 15, 2024"
    pub date: String,
    /// Machine-readable date for the `<time>` element
    pub datetime: String,
    pub url: String,
}

/// Context for an individual post page
#[derive(Debug, Clone, Serialize)]
pub struct PostPageData {
    pub title: String,
    pub date: String,
    pub datetime: String,
    pub summary: Option<String>,
    pub content: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LinkItem, Publication};

    fn base_context() -> Context {
        let site = SiteData {
            title: "Jane Doe".to_string(),
            description: "Jane Doe's website.".to_string(),
            author: "Jane Doe".to_string(),
            intro: "I build things.".to_string(),
            url: "https://example.com".to_string(),
            root: "/".to_string(),
            language: "en".to_string(),
            appearance: "system".to_string(),
        };
        let mut context = Context::new();
        context.insert("site", &site);
        context.insert(
            "nav",
            &vec![LinkItem {
                name: "home".to_string(),
                path: "/".to_string(),
            }],
        );
        context.insert("footer_links", &Vec::<LinkItem>::new());
        context.insert("current_year", "2026");
        context
    }

    #[test]
    fn test_render_home() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = base_context();
        context.insert(
            "posts",
            &vec![PostItem {
                title: "A Post".to_string(),
                date: "June 15, 2024".to_string(),
                datetime: "2024-06-15T00:00:00+00:00".to_string(),
                url: "/blog/a-post/".to_string(),
            }],
        );
        context.insert(
            "publications",
            &vec![Publication {
                title: "A Paper".to_string(),
                href: "https://arxiv.org/abs/0000.00000".to_string(),
            }],
        );
        context.insert("page_title", "Jane Doe");
        context.insert("page_url", "/");

        let html = renderer.render("home.html", &context).unwrap();
        assert!(html.contains("Jane Doe"));
        assert!(html.contains("A Post"));
        assert!(html.contains("June 15, 2024"));
        assert!(html.contains("A Paper"));
        assert!(html.contains(r#"href="/blog/a-post/""#));
    }

    #[test]
    fn test_render_post_page() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = base_context();
        context.insert(
            "post",
            &PostPageData {
                title: "Hello".to_string(),
                date: "January 1, 2023".to_string(),
                datetime: "2023-01-01T00:00:00+00:00".to_string(),
                summary: None,
                content: "<p>Body text.</p>".to_string(),
                url: "/blog/hello/".to_string(),
            },
        );
        context.insert("page_title", "Hello | Jane Doe");
        context.insert("page_url", "/blog/hello/");

        let html = renderer.render("post.html", &context).unwrap();
        assert!(html.contains("<p>Body text.</p>"));
        assert!(html.contains("<time"));
        assert!(html.contains("Hello | Jane Doe"));
    }

    #[test]
    fn test_layout_carries_nav_and_appearance() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = base_context();
        context.insert("posts", &Vec::<PostItem>::new());
        context.insert("publications", &Vec::<Publication>::new());
        context.insert("page_title", "Jane Doe");
        context.insert("page_url", "/");

        let html = renderer.render("home.html", &context).unwrap();
        assert!(html.contains(r#"data-appearance="system""#));
        assert!(html.contains(r#"<a href="/">home</a>"#));
    }
}
