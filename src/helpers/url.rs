//! URL helper functions

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "blog/my-post/") // -> "/blog/my-post/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "blog/my-post/") // -> "https://example.com/blog/my-post/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Characters that must be escaped inside a URL path
const URL_UNSAFE: &percent_encoding::AsciiSet = &percent_encoding::CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'#')
    .add(b'%');

/// Percent-encode a URL path, leaving separators intact
pub fn encode_url(path: &str) -> String {
    percent_encoding::utf8_percent_encode(path, URL_UNSAFE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com".to_string(),
            root: "/".to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "blog/post/"), "/blog/post/");
        assert_eq!(url_for(&config, "/blog/post/"), "/blog/post/");
        assert_eq!(url_for(&config, ""), "/");
    }

    #[test]
    fn test_url_for_with_subroot() {
        let config = SiteConfig {
            root: "/site/".to_string(),
            ..test_config()
        };
        assert_eq!(url_for(&config, "blog/"), "/site/blog/");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "blog/post/"),
            "https://example.com/blog/post/"
        );
        assert_eq!(full_url_for(&config, ""), "https://example.com/");
    }

    #[test]
    fn test_encode_url() {
        assert_eq!(encode_url("hello world"), "hello%20world");
    }
}
