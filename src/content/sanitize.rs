//! HTML sanitizing for rendered documents

use ammonia::Builder;

/// Strips script-capable markup from rendered HTML.
///
/// Scripts, styles and embedding tags are dropped with their content, event
/// handler attributes and `javascript:` URLs are removed. Content markup
/// (headings, lists, links, images, tables, code blocks with their `class`
/// attributes, footnote anchors, task-list checkboxes) is kept.
pub struct Sanitizer {
    builder: Builder<'static>,
}

impl Sanitizer {
    pub fn new() -> Self {
        let mut builder = Builder::default();
        builder
            .add_generic_attributes(&["class", "id"])
            .add_tags(&["input"])
            .add_tag_attributes("input", &["type", "checked", "disabled"])
            .add_clean_content_tags(&["iframe", "object", "embed"]);
        Self { builder }
    }

    pub fn sanitize(&self, html: &str) -> String {
        self.builder.clean(html).to_string()
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_scripts_and_handlers() {
        let sanitizer = Sanitizer::new();
        let html = sanitizer.sanitize(
            r#"<p onclick="steal()">Hi</p><script>alert(1)</script><img src="x.png" onerror="boom()">"#,
        );
        assert!(!html.contains("script"));
        assert!(!html.contains("alert"));
        assert!(!html.contains("onclick"));
        assert!(!html.contains("onerror"));
        assert!(html.contains("<p>Hi</p>"));
        assert!(html.contains(r#"<img src="x.png">"#));
    }

    #[test]
    fn test_removes_javascript_urls() {
        let sanitizer = Sanitizer::new();
        let html = sanitizer.sanitize(
            r#"<a href="javascript:alert(1)">bad</a><a href="https://example.com">good</a><img src="javascript:alert(2)">"#,
        );
        assert!(!html.contains("javascript:"));
        assert!(html.contains(r#"href="https://example.com""#));
        assert!(html.contains(">bad</a>"));
    }

    #[test]
    fn test_removes_iframes() {
        let sanitizer = Sanitizer::new();
        let html = sanitizer.sanitize(
            r#"<p>before</p><iframe src="https://evil.example">inner</iframe><p>after</p>"#,
        );
        assert!(!html.contains("iframe"));
        assert!(!html.contains("evil"));
        assert!(html.contains("<p>before</p><p>after</p>"));
    }

    #[test]
    fn test_keeps_content_markup() {
        let sanitizer = Sanitizer::new();
        let input = concat!(
            "<h2>Title</h2><blockquote><p><em>a</em> <strong>b</strong></p></blockquote>",
            "<ul><li>one</li></ul><ol><li>two</li></ol>",
            r#"<pre class="language-rust"><code class="language-rust"><span class="hl-source">fn</span></code></pre>"#,
            "<table><thead><tr><th>h</th></tr></thead><tbody><tr><td>d</td></tr></tbody></table>",
        );
        assert_eq!(sanitizer.sanitize(input), input);
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let sanitizer = Sanitizer::new();
        let inputs = [
            r#"<p>Hello <a href="https://example.com" title="x">link</a> &amp; more</p>"#,
            r#"<script>x()</script><p onmouseover="y()">text</p><iframe></iframe>"#,
            r#"<ul><li><input type="checkbox" checked="" disabled=""> done</li></ul>"#,
            r#"<img src="/img.png" alt="a &lt; b"><br><hr>"#,
        ];
        for input in inputs {
            let once = sanitizer.sanitize(input);
            assert_eq!(sanitizer.sanitize(&once), once);
        }
    }
}
