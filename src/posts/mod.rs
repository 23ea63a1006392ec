//! Post collection operations: tags, slugs, filtering, ordering, related posts

mod filter;
mod related;
mod slug;
mod sort;
mod tags;

pub use filter::{filter_posts_by_tag, filter_published_posts, is_post_published, is_published_at};
pub use related::{find_related_posts, DEFAULT_RELATED_LIMIT};
pub use slug::{generate_slug, title_from_filename};
pub use sort::{sort_posts_by_date, SortOrder};
pub use tags::{normalize_tag, normalize_tags, parse_tags, raw_tags, tag_counts, tag_query};
