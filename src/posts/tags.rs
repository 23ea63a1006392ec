//! Tag normalization and tag indexes

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_yaml::Value;
use std::collections::{HashMap, HashSet};

use crate::content::{value_to_string, Post};

/// Characters escaped in a `?tag=` query value
const TAG_QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Normalize a tag for comparison: trimmed and lowercased
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Normalize a list of tags, dropping empty results and duplicates.
///
/// The first occurrence of each normalized tag keeps its position.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    tags.into_iter()
        .map(|tag| normalize_tag(tag.as_ref()))
        .filter(|tag| !tag.is_empty())
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

/// Split a front-matter `tags` value into tags as authored.
///
/// Accepts a list of scalars or a comma-separated string. Anything else
/// yields no tags.
pub fn raw_tags(value: &Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items
            .iter()
            .filter_map(value_to_string)
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Parse and normalize a front-matter `tags` value
pub fn parse_tags(value: &Value) -> Vec<String> {
    normalize_tags(raw_tags(value))
}

/// Count posts per normalized tag, most used first
pub fn tag_counts(posts: &[Post]) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for post in posts {
        for tag in post.normalized_tags() {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }

    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// Query string selecting a tag filter, e.g. `?tag=rust`
pub fn tag_query(tag: &str) -> String {
    format!(
        "?tag={}",
        utf8_percent_encode(&normalize_tag(tag), TAG_QUERY)
    )
}
