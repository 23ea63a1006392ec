//! Publication and tag filters

use chrono::{DateTime, Utc};

use super::tags::normalize_tag;
use crate::content::Post;

/// Whether a post is visible at `now` (a post dated exactly `now` is)
pub fn is_published_at(post: &Post, now: DateTime<Utc>) -> bool {
    post.publication_date <= now
}

/// Whether a post is visible right now
pub fn is_post_published(post: &Post) -> bool {
    is_published_at(post, Utc::now())
}

/// Keep only published posts, preserving order
pub fn filter_published_posts(posts: &[Post]) -> Vec<Post> {
    let now = Utc::now();
    posts
        .iter()
        .filter(|post| is_published_at(post, now))
        .cloned()
        .collect()
}

/// Published posts carrying `tag` (all published posts when `tag` is `None`).
///
/// Tags match on their normalized form, never as substrings.
pub fn filter_posts_by_tag(posts: &[Post], tag: Option<&str>) -> Vec<Post> {
    let published = filter_published_posts(posts);
    let Some(tag) = tag else {
        return published;
    };

    let wanted = normalize_tag(tag);
    published
        .into_iter()
        .filter(|post| post.has_tag(&wanted))
        .collect()
}
