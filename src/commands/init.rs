//! Initialize a new folio site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("content/posts"))?;

    let config_content = r#"# folio configuration

# Site
title: folio
description: ''
author: John Doe
intro: ''
language: en

# URL
url: http://example.com
root: /
blog_dir: blog

# Directory
content_dir: content
posts_dir: posts
out_dir: public

# Writing
new_post_name: :title.md
build_drafts: false

# Display
date_format: MMMM D, YYYY
appearance: system

# Chrome
nav:
  - name: home
    path: /
  - name: blog
    path: /blog/

footer_links:
  - name: github
    path: https://github.com/johndoe

# Home page
publications: []

# Feed
feed: true
feed_limit: 20

# Code highlighting
highlight_theme: base16-ocean.dark
"#;

    fs::write(target_dir.join(crate::CONFIG_FILE), config_content)?;

    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
summary: The first post on this site.
---

Welcome to your new site. This file lives in `content/posts/`; every Markdown
file there with a `title` and a `date` becomes a post.

## Writing

Create a post with:

```bash
$ folio new "My New Post"
```

Then build the site:

```bash
$ folio build
```

Or preview it with live reload:

```bash
$ folio server
```
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::write(
        target_dir.join("content/posts/hello-world.md"),
        sample_post,
    )?;

    Ok(())
}
