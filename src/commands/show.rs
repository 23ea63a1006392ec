//! Show a single post, its related posts, or the about page

use anyhow::Result;

use crate::content::Post;
use crate::posts::{filter_published_posts, find_related_posts};
use crate::Blog;

/// Print a published post
pub async fn show(blog: &Blog, slug: &str, json: bool) -> Result<()> {
    let Some(post) = blog.post_loader().load_post(slug).await else {
        anyhow::bail!("Post not found: {}", slug);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
        return Ok(());
    }

    println!("{}", post.title);
    println!(
        "{} by {}",
        post.publication_date.format("%Y-%m-%d"),
        post.author
    );
    if !post.tags.is_empty() {
        println!("Tags: {}", post.normalized_tags().join(", "));
    }
    if let Some(excerpt) = &post.excerpt {
        println!("\n{}", excerpt);
    }
    println!("\n{}", post.content);

    Ok(())
}

/// Print posts related to a published post
pub async fn related(blog: &Blog, slug: &str, limit: Option<usize>, json: bool) -> Result<()> {
    let limit = limit.unwrap_or(blog.config.related_limit);
    let published = filter_published_posts(&blog.post_loader().load_all_posts().await);
    let Some(post) = published.iter().find(|p| p.slug == slug) else {
        anyhow::bail!("Post not found: {}", slug);
    };

    let related = find_related_posts(post, &published, limit);
    if json {
        println!("{}", serde_json::to_string_pretty(&related)?);
        return Ok(());
    }

    println!("Related to {:?} ({}):", post.title, related.len());
    for post in &related {
        print_summary(post);
    }

    Ok(())
}

/// Print the about page
pub async fn about(blog: &Blog, json: bool) -> Result<()> {
    let page = blog.about_loader().load_about_page().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        println!("{}\n\n{}", page.title, page.content);
    }

    Ok(())
}

fn print_summary(post: &Post) {
    println!(
        "  {} - {} ({}) [{}]",
        post.publication_date.format("%Y-%m-%d"),
        post.title,
        post.slug,
        post.normalized_tags().join(", ")
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn blog_with_posts() -> (TempDir, Blog) {
        let dir = TempDir::new().unwrap();
        let posts = dir.path().join("content/posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(posts.join("a.md"), "---\ntitle: A\ndate: 2024-01-01\ntags: [x]\n---\nA").unwrap();
        fs::write(posts.join("b.md"), "---\ntitle: B\ndate: 2024-01-02\ntags: [x]\n---\nB").unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        (dir, blog)
    }

    #[tokio::test]
    async fn test_show_missing_post_fails() {
        let (_dir, blog) = blog_with_posts();
        assert!(show(&blog, "a", false).await.is_ok());
        assert!(show(&blog, "nope", false).await.is_err());
    }

    #[tokio::test]
    async fn test_related_missing_post_fails() {
        let (_dir, blog) = blog_with_posts();
        assert!(related(&blog, "a", Some(1), true).await.is_ok());
        assert!(related(&blog, "nope", None, false).await.is_err());
    }

    #[tokio::test]
    async fn test_about_requires_file() {
        let (dir, blog) = blog_with_posts();
        assert!(about(&blog, false).await.is_err());

        fs::write(dir.path().join("content/about.md"), "Hello").unwrap();
        assert!(about(&blog, true).await.is_ok());
    }
}
