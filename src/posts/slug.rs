//! Slugs and filename-derived titles

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^A-Za-z0-9_\s-]").unwrap();
    static ref SEPARATORS: Regex = Regex::new(r"[\s_-]+").unwrap();
}

/// Generate a URL-safe slug from a title or filename.
///
/// Lowercases, strips diacritics, drops anything that isn't an ASCII word
/// character, and joins the remaining words with single hyphens.
///
/// ```
/// use blog_rs::posts::generate_slug;
/// assert_eq!(generate_slug("Hello, World!"), "hello-world");
/// ```
pub fn generate_slug(input: &str) -> String {
    let folded: String = input
        .to_lowercase()
        .trim()
        .nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .collect();

    let cleaned = NON_WORD.replace_all(&folded, "");
    let joined = SEPARATORS.replace_all(&cleaned, "-");
    joined.trim_matches('-').to_string()
}

fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Derive a title from a filename: `my-first_post.md` -> `My First Post`
pub fn title_from_filename(filename: &str) -> String {
    let stem = filename
        .strip_suffix(".markdown")
        .or_else(|| filename.strip_suffix(".md"))
        .unwrap_or(filename);

    let mut title = String::with_capacity(stem.len());
    let mut in_word = false;
    for c in stem.chars() {
        let c = if c == '-' || c == '_' { ' ' } else { c };
        if c.is_alphanumeric() && !in_word {
            title.extend(c.to_uppercase());
        } else {
            title.push(c);
        }
        in_word = c.is_alphanumeric();
    }
    title
}
