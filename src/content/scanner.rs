//! Which files count as publishable sources

/// Suffixes left behind by editors and backup tools
const TEMP_SUFFIXES: &[&str] = &[".tmp", ".bak", ".swp", "~"];

/// Accepted markdown extensions
const MARKDOWN_EXTENSIONS: &[&str] = &[".md", ".markdown"];

/// Check if a file should be skipped (hidden, temporary or not markdown)
pub fn should_ignore_file(filename: &str) -> bool {
    if filename.is_empty() || filename.starts_with('.') {
        return true;
    }

    if TEMP_SUFFIXES.iter().any(|suffix| filename.ends_with(suffix)) {
        return true;
    }

    !MARKDOWN_EXTENSIONS.iter().any(|ext| filename.ends_with(ext))
}
