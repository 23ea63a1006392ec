//! Related-post discovery through shared tags

use std::collections::HashSet;

use super::tags::normalize_tags;
use crate::content::Post;

/// Default number of related posts
pub const DEFAULT_RELATED_LIMIT: usize = 5;

/// Find posts sharing tags with `current`.
///
/// Candidates are ranked by the number of distinct shared tags, then by
/// publication date (newest first). `all` is expected to hold only
/// published posts; the current post is excluded by id and by slug.
pub fn find_related_posts(current: &Post, all: &[Post], limit: usize) -> Vec<Post> {
    let current_tags: HashSet<String> = normalize_tags(&current.tags).into_iter().collect();
    if current_tags.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, &Post)> = all
        .iter()
        .filter(|post| post.id != current.id && post.slug != current.slug)
        .filter_map(|post| {
            let shared = normalize_tags(&post.tags)
                .iter()
                .filter(|tag| current_tags.contains(*tag))
                .count();
            (shared > 0).then_some((shared, post))
        })
        .collect();

    scored.sort_by(|(shared_a, a), (shared_b, b)| {
        shared_b
            .cmp(shared_a)
            .then_with(|| b.publication_date.cmp(&a.publication_date))
    });

    scored
        .into_iter()
        .take(limit)
        .map(|(_, post)| post.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posts::test_support::post;
    use chrono::{Duration, Utc};

    fn slugs(posts: Vec<Post>) -> Vec<String> {
        posts.into_iter().map(|p| p.slug).collect()
    }

    #[test]
    fn test_no_tags_means_no_related() {
        let now = Utc::now();
        let current = post("current", now, &[]);
        let all = vec![post("other", now, &["rust"])];
        assert!(find_related_posts(&current, &all, 5).is_empty());
    }

    #[test]
    fn test_more_shared_tags_rank_first() {
        let now = Utc::now();
        let current = post("current", now, &["rust", "web", "async"]);
        let all = vec![
            post("one-recent", now - Duration::days(1), &["rust"]),
            post("two-old", now - Duration::days(30), &["Rust", "WEB"]),
            post("none", now - Duration::days(2), &["python"]),
        ];
        assert_eq!(
            slugs(find_related_posts(&current, &all, 5)),
            vec!["two-old", "one-recent"]
        );
    }

    #[test]
    fn test_equal_overlap_newest_first() {
        let now = Utc::now();
        let current = post("current", now, &["rust"]);
        let all = vec![
            post("older", now - Duration::days(9), &["rust"]),
            post("newer", now - Duration::days(1), &["rust"]),
        ];
        assert_eq!(
            slugs(find_related_posts(&current, &all, 5)),
            vec!["newer", "older"]
        );
    }

    #[test]
    fn test_limit_is_respected() {
        let now = Utc::now();
        let current = post("current", now, &["rust"]);
        let all: Vec<_> = (0..10)
            .map(|i| post(&format!("p{i}"), now - Duration::days(i), &["rust"]))
            .collect();
        assert_eq!(find_related_posts(&current, &all, 3).len(), 3);
        assert!(find_related_posts(&current, &all, 0).is_empty());
    }

    #[test]
    fn test_current_post_excluded_by_id_and_slug() {
        let now = Utc::now();
        let current = post("current", now, &["rust"]);

        let mut same_id = post("renamed", now, &["rust"]);
        same_id.id = current.id.clone();
        let mut same_slug = post("current", now, &["rust"]);
        same_slug.id = "another-id".to_string();

        let all = vec![current.clone(), same_id, same_slug, post("other", now, &["rust"])];
        assert_eq!(slugs(find_related_posts(&current, &all, 5)), vec!["other"]);
    }
}
