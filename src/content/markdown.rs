//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use super::highlight::Highlighter;
use crate::error::RenderError;

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    highlighter: Highlighter,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_highlighter(Highlighter::new())
    }

    pub fn with_highlighter(highlighter: Highlighter) -> Self {
        Self { highlighter }
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    /// Render markdown to HTML.
    ///
    /// GitHub-flavored: tables, strikethrough, task lists, footnotes, and
    /// single newlines rendered as `<br />`. Front-matter must already be
    /// stripped.
    pub fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            if let Some((lang, mut code)) = code_block.take() {
                match event {
                    Event::Text(text) => {
                        code.push_str(&text);
                        code_block = Some((lang, code));
                    }
                    Event::End(TagEnd::CodeBlock) => {
                        let highlighted = self.highlighter.highlight(&code, lang.as_deref());
                        events.push(Event::Html(highlighted.into()));
                    }
                    _ => code_block = Some((lang, code)),
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) if !info.trim().is_empty() => {
                            Some(info.to_string())
                        }
                        _ => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::SoftBreak => events.push(Event::HardBreak),
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::write_html_fmt(&mut html_output, events.into_iter())?;

        Ok(html_output)
    }

    /// Render, falling back to the unrendered markdown on failure
    pub fn render_or_raw(&self, markdown: &str) -> String {
        match self.render(markdown) {
            Ok(html) => html,
            Err(e) => {
                tracing::error!("Failed to render markdown: {}", e);
                markdown.to_string()
            }
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_single_newline_is_line_break() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("first line\nsecond line").unwrap();
        assert!(html.contains("first line<br />"));
        assert!(html.contains("second line"));
    }

    #[test]
    fn test_render_highlighted_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```python\nprint('hi')\n```").unwrap();
        assert!(html.contains(r#"<pre class="language-python"><code class="language-python">"#));
        assert!(html.contains("hl-"));
    }

    #[test]
    fn test_render_plain_code_blocks() {
        let renderer = MarkdownRenderer::new();

        let html = renderer.render("```\n<tag>\n```").unwrap();
        assert!(html.contains("<pre><code>&lt;tag&gt;\n</code></pre>"));

        let html = renderer.render("    indented <code>").unwrap();
        assert!(html.contains("<pre><code>indented &lt;code&gt;\n</code></pre>"));

        let html = renderer.render("```nosuchlang\nx\n```").unwrap();
        assert!(html.contains("<pre><code>x\n</code></pre>"));
    }

    #[test]
    fn test_render_gfm_table_and_strikethrough() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~")
            .unwrap();
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_text_after_code_block_is_kept() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("```rust\nfn main() {}\n```\n\nAfter the code.")
            .unwrap();
        assert!(html.contains("<p>After the code.</p>"));
    }
}
