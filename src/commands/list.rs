//! List site content

use anyhow::Result;
use serde_json::json;

use crate::content::{LoadReport, Post};
use crate::posts::{filter_posts_by_tag, filter_published_posts, tag_counts, tag_query};
use crate::Blog;

/// What `list` prints
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Only posts carrying this tag
    pub tag: Option<String>,
    /// Include posts dated in the future
    pub all: bool,
    pub json: bool,
}

/// List site content by type
pub async fn run(blog: &Blog, content_type: &str, options: &ListOptions) -> Result<()> {
    let report = match blog.post_loader().try_load_all_posts().await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Failed to load posts: {}", e);
            LoadReport::default()
        }
    };

    for failure in &report.failures {
        eprintln!("  skipped {}: {}", failure.identifier, failure.error);
    }

    match content_type {
        "post" | "posts" => {
            let posts = select_posts(&report.posts, options);
            if options.json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
                return Ok(());
            }

            println!("Posts ({}):", posts.len());
            for post in &posts {
                println!(
                    "  {} - {} [{}]",
                    post.publication_date.format("%Y-%m-%d"),
                    post.title,
                    post.source_file
                );
            }
            if report.ignored > 0 {
                println!("({} files ignored)", report.ignored);
            }
        }
        "tag" | "tags" => {
            let tags = tag_counts(&filter_published_posts(&report.posts));
            if options.json {
                let tags: Vec<_> = tags
                    .iter()
                    .map(|(tag, count)| json!({ "tag": tag, "count": count, "link": tag_query(tag) }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&tags)?);
                return Ok(());
            }

            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({}) {}", tag, count, tag_query(&tag));
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, tag", content_type);
        }
    }

    Ok(())
}

fn select_posts(posts: &[Post], options: &ListOptions) -> Vec<Post> {
    if options.all {
        match options.tag.as_deref() {
            Some(tag) => posts.iter().filter(|p| p.has_tag(tag)).cloned().collect(),
            None => posts.to_vec(),
        }
    } else {
        filter_posts_by_tag(posts, options.tag.as_deref())
    }
}
