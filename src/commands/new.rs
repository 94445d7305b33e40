//! Create a new post

use anyhow::Result;
use std::fs;

use crate::Folio;

/// Create a new post file from a title
pub fn run(folio: &Folio, title: &str) -> Result<()> {
    let now = chrono::Local::now();

    let posts_dir = folio.content_dir.join(&folio.config.posts_dir);
    fs::create_dir_all(&posts_dir)?;

    let slug = slug::slugify(title);
    let filename = folio
        .config
        .new_post_name
        .replace(":title", &slug)
        .replace(":year", &now.format("%Y").to_string())
        .replace(":month", &now.format("%m").to_string())
        .replace(":day", &now.format("%d").to_string());

    let file_path = posts_dir.join(&filename);
    if file_path.exists() {
        anyhow::bail!("file already exists: {:?}", file_path);
    }

    let content = format!(
        "---\ntitle: {}\ndate: {}\nsummary: ''\n---\n",
        title,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::write(&file_path, content)?;
    println!("Created: {:?}", file_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentLoader;

    #[test]
    fn test_new_post_is_loadable() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("content/posts")).unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        run(&folio, "My New Post").unwrap();

        let path = dir.path().join("content/posts/my-new-post.md");
        assert!(path.exists());

        let records = ContentLoader::new(&folio).load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "My New Post");
        assert_eq!(records[0].slug, "my-new-post");
    }

    #[test]
    fn test_new_post_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("content/posts")).unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        run(&folio, "Same Title").unwrap();
        assert!(run(&folio, "Same Title").is_err());
    }
}
