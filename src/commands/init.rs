//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"# Blog Configuration

# Site
title: My Blog
description: ''
author: John Doe
language: en
# IANA timezone for post dates written without an offset
timezone: ''

# Content
posts_glob: content/posts/*.md
about_file: content/about.md
preferences_file: .blog/preferences.json

# Reading
related_limit: 5
highlight:
  enable: true
  exclude_languages: []

# Development server polling
watch:
  interval_secs: 5
"#;

const ABOUT_TEMPLATE: &str = r#"---
title: About
---

Hi, I'm the author of this blog. Edit `content/about.md` to tell readers about yourself.
"#;

/// Initialize a new blog in the given directory.
///
/// Files that already exist are left untouched.
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("content/posts"))?;

    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
tags: [welcome, rust]
---

Welcome to your new blog! This is your very first post.

## Writing posts

Posts live in `content/posts` as markdown with YAML front-matter:

```yaml
title: My New Post
date: 2025-01-01
tags: [notes]
```

Create one with:

```bash
$ blog-rs new "My New Post" --tags notes
```

## Run server

```bash
$ blog-rs server --watch
```
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    write_if_missing(&target_dir.join("_config.yml"), CONFIG_TEMPLATE)?;
    write_if_missing(&target_dir.join("content/about.md"), ABOUT_TEMPLATE)?;
    write_if_missing(
        &target_dir.join("content/posts/hello-world.md"),
        &sample_post,
    )?;

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::warn!("{:?} already exists, skipping", path);
        return Ok(());
    }
    fs::write(path, content)?;
    tracing::debug!("Created {:?}", path);
    Ok(())
}
