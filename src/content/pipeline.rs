//! Front-matter -> markdown -> safe HTML

use super::frontmatter::FrontMatter;
use super::highlight::Highlighter;
use super::markdown::MarkdownRenderer;
use super::sanitize::Sanitizer;
use crate::config::HighlightConfig;

/// A document run through the whole pipeline
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub frontmatter: FrontMatter,
    /// Markdown body without the front-matter block
    pub body: String,
    /// Sanitized HTML
    pub html: String,
}

/// The markdown pipeline shared by the post and about loaders.
///
/// Building one loads every grammar, so create it once and share it.
pub struct MarkdownPipeline {
    renderer: MarkdownRenderer,
    sanitizer: Sanitizer,
}

impl MarkdownPipeline {
    pub fn new(highlight: &HighlightConfig) -> Self {
        let highlighter = Highlighter::with_options(highlight.enable, &highlight.exclude_languages);
        Self {
            renderer: MarkdownRenderer::with_highlighter(highlighter),
            sanitizer: Sanitizer::new(),
        }
    }

    pub fn renderer(&self) -> &MarkdownRenderer {
        &self.renderer
    }

    /// Markdown body to sanitized HTML
    pub fn to_html(&self, markdown: &str) -> String {
        let html = self.renderer.render_or_raw(markdown);
        self.sanitizer.sanitize(&html)
    }

    pub fn sanitize(&self, html: &str) -> String {
        self.sanitizer.sanitize(html)
    }

    /// Run a full document: split front-matter, render the body, sanitize
    pub fn process(&self, content: &str) -> RenderedDocument {
        let (frontmatter, body) = FrontMatter::parse(content);
        let html = self.to_html(body);
        RenderedDocument {
            frontmatter,
            body: body.to_string(),
            html,
        }
    }
}

impl Default for MarkdownPipeline {
    fn default() -> Self {
        Self::new(&HighlightConfig::default())
    }
}
