//! Chronological ordering

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::content::Post;

/// Sort direction for publication dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    /// Newest first
    #[default]
    Desc,
}

/// Return the posts sorted by publication date; the input is left untouched.
///
/// Posts with the same date are ordered by title, ascending.
pub fn sort_posts_by_date(posts: &[Post], order: SortOrder) -> Vec<Post> {
    let mut sorted = posts.to_vec();
    sorted.sort_by(|a, b| {
        let by_date = match order {
            SortOrder::Asc => a.publication_date.cmp(&b.publication_date),
            SortOrder::Desc => b.publication_date.cmp(&a.publication_date),
        };
        by_date.then_with(|| compare_titles(&a.title, &b.title))
    });
    sorted
}

/// Case-insensitive title order; titles differing only in case put
/// lowercase first (`apple` before `Apple`)
pub(crate) fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}
