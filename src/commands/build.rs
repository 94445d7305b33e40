//! Build the static site

use anyhow::Result;
use notify::Watcher;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::content::ContentLoader;
use crate::generator::Generator;
use crate::Folio;

/// Load content and render the site.
///
/// The load is atomic: a malformed post aborts the build before anything is
/// written, so the output never shows a partial listing. `drafts` forces
/// drafts in regardless of configuration.
pub fn run(folio: &Folio, drafts: bool) -> Result<()> {
    let start = std::time::Instant::now();

    let mut records = ContentLoader::new(folio).load()?;

    if !(drafts || folio.config.build_drafts) {
        records.retain(|r| !r.draft);
    }

    tracing::info!("loaded {} posts", records.len());

    Generator::new(folio)?.generate(&records)?;

    tracing::info!("built in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

/// Watch for file changes and rebuild
pub async fn watch(folio: &Folio) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(folio.content_dir.as_ref(), notify::RecursiveMode::Recursive)?;

    let config_path = folio.base_dir.join(crate::CONFIG_FILE);
    if config_path.exists() {
        watcher.watch(config_path.as_ref(), notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("watching for changes, press Ctrl+C to stop");

    let mut last_rebuild = std::time::Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Debounce bursts of events from a single save
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("file changed, rebuilding");
                    if let Err(e) = run(folio, false) {
                        tracing::error!("build failed: {:#}", e);
                    }
                    last_rebuild = std::time::Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_drafts_excluded_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let posts_dir = dir.path().join("content/posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(
            posts_dir.join("visible.md"),
            "---\ntitle: Visible\ndate: 2024-01-01\n---\nbody",
        )
        .unwrap();
        fs::write(
            posts_dir.join("hidden.md"),
            "---\ntitle: Hidden\ndate: 2024-02-02\ndraft: true\n---\nbody",
        )
        .unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        run(&folio, false).unwrap();

        assert!(folio.out_dir.join("blog/visible/index.html").exists());
        assert!(!folio.out_dir.join("blog/hidden/index.html").exists());

        let home = fs::read_to_string(folio.out_dir.join("index.html")).unwrap();
        assert!(!home.contains("Hidden"));
    }

    #[test]
    fn test_drafts_flag_includes_drafts() {
        let dir = tempfile::tempdir().unwrap();
        let posts_dir = dir.path().join("content/posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(
            posts_dir.join("wip.md"),
            "---\ntitle: WIP\ndate: 2024-02-02\ndraft: true\n---\nbody",
        )
        .unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        run(&folio, true).unwrap();

        assert!(folio.out_dir.join("blog/wip/index.html").exists());
    }

    #[test]
    fn test_broken_post_aborts_build() {
        let dir = tempfile::tempdir().unwrap();
        let posts_dir = dir.path().join("content/posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(
            posts_dir.join("ok.md"),
            "---\ntitle: Ok\ndate: 2024-01-01\n---\nbody",
        )
        .unwrap();
        fs::write(
            posts_dir.join("broken.md"),
            "---\ntitle: Broken\ndate: not-a-date\n---\nbody",
        )
        .unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        assert!(run(&folio, false).is_err());
        // Nothing was rendered
        assert!(!folio.out_dir.join("index.html").exists());
    }
}
