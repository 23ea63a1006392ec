//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::posts::{generate_slug, normalize_tags};
use crate::Blog;

/// Create a new post named after its slug in the posts directory
pub fn create_post(blog: &Blog, title: &str, tags: &[String]) -> Result<PathBuf> {
    let slug = generate_slug(title);
    if slug.is_empty() {
        anyhow::bail!("Title {:?} does not produce a usable slug", title);
    }

    let target_dir = blog.base_dir.join(glob_root(&blog.config.posts_glob));
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let now = chrono::Utc::now().with_timezone(&blog.config.tz());
    let tags = normalize_tags(tags);
    let content = format!(
        "---\ntitle: {}\ndate: {}\ntags: {}\n---\n",
        serde_json::to_string(title)?,
        now.format("%Y-%m-%d %H:%M:%S"),
        serde_json::to_string(&tags)?
    );

    fs::write(&file_path, content)?;
    println!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Leading directories of a glob that contain no wildcard
fn glob_root(pattern: &str) -> PathBuf {
    Path::new(pattern)
        .components()
        .take_while(|c| {
            !c.as_os_str()
                .to_string_lossy()
                .contains(['*', '?', '[', '{'])
        })
        .collect()
}
