//! Syntax highlighting for fenced code blocks

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Token spans are tagged `hl-<scope>` so stylesheets can target them
const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// Fence aliases and their canonical language names
const ALIASES: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ts", "typescript"),
    ("py", "python"),
    ("sh", "bash"),
    ("shell", "bash"),
    ("md", "markdown"),
    ("htm", "html"),
];

/// Grammar token to look up for canonical names that need one.
/// TypeScript has no bundled grammar and borrows JavaScript's.
const GRAMMARS: &[(&str, &str)] = &[
    ("javascript", "js"),
    ("typescript", "js"),
    ("python", "py"),
    ("bash", "sh"),
    ("markdown", "md"),
];

/// Highlights code into class-tagged spans
pub struct Highlighter {
    syntax_set: SyntaxSet,
    enabled: bool,
    excluded: Vec<String>,
}

impl Highlighter {
    /// Create a highlighter with the bundled grammars
    pub fn new() -> Self {
        Self::with_options(true, &[])
    }

    /// Create with custom settings
    pub fn with_options(enabled: bool, exclude_languages: &[String]) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            enabled,
            excluded: exclude_languages
                .iter()
                .map(|lang| normalize_language(lang))
                .collect(),
        }
    }

    /// Whether `lang` (or one of its aliases) gets highlighted
    pub fn is_language_supported(&self, lang: &str) -> bool {
        self.find_syntax(lang).is_some()
    }

    fn find_syntax(&self, lang: &str) -> Option<(String, &SyntaxReference)> {
        if !self.enabled {
            return None;
        }

        let name = normalize_language(lang);
        if name.is_empty() || self.excluded.contains(&name) {
            return None;
        }

        let token = GRAMMARS
            .iter()
            .find(|(canonical, _)| *canonical == name)
            .map(|(_, token)| *token)
            .unwrap_or(name.as_str());

        let syntax = self.syntax_set.find_syntax_by_token(token)?;
        Some((name, syntax))
    }

    /// Render a code block.
    ///
    /// Recognized languages produce
    /// `<pre class="language-X"><code class="language-X">` with highlighted
    /// spans; anything else is escaped into a plain `<pre><code>` block.
    pub fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        let Some((name, syntax)) = lang.and_then(|lang| self.find_syntax(lang)) else {
            return plain_block(code);
        };

        match self.highlight_spans(code, syntax) {
            Ok(spans) => {
                let class = html_escape(&name);
                format!(
                    r#"<pre class="language-{class}"><code class="language-{class}">{spans}</code></pre>"#
                )
            }
            Err(e) => {
                tracing::warn!("Failed to highlight {} code block: {}", name, e);
                plain_block(code)
            }
        }
    }

    fn highlight_spans(
        &self,
        code: &str,
        syntax: &SyntaxReference,
    ) -> Result<String, syntect::Error> {
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);
        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }
        Ok(generator.finalize())
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase a fence language and resolve aliases.
/// Only the first word of the info string counts (`rust,ignore` -> `rust`).
pub fn normalize_language(lang: &str) -> String {
    let first = lang
        .split(|c: char| c.is_whitespace() || c == ',' || c == '{')
        .find(|part| !part.is_empty())
        .unwrap_or("")
        .to_lowercase();

    ALIASES
        .iter()
        .find(|(alias, _)| *alias == first)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(first)
}

fn plain_block(code: &str) -> String {
    format!("<pre><code>{}</code></pre>", html_escape(code))
}

/// Simple HTML escaping
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_language() {
        assert_eq!(normalize_language("JS"), "javascript");
        assert_eq!(normalize_language(" ts "), "typescript");
        assert_eq!(normalize_language("Shell"), "bash");
        assert_eq!(normalize_language("htm"), "html");
        assert_eq!(normalize_language("rust,ignore"), "rust");
        assert_eq!(normalize_language(""), "");
    }

    #[test]
    fn test_supported_languages() {
        let highlighter = Highlighter::new();
        for lang in [
            "javascript", "js", "typescript", "ts", "python", "py", "bash", "sh", "shell", "json",
            "markdown", "md", "html", "htm", "css", "sql", "PYTHON",
        ] {
            assert!(highlighter.is_language_supported(lang), "{lang}");
        }
        assert!(!highlighter.is_language_supported("klingon"));
        assert!(!highlighter.is_language_supported(""));
    }

    #[test]
    fn test_highlight_recognized_language() {
        let highlighter = Highlighter::new();
        let html = highlighter.highlight("const x = 1;\n", Some("JS"));
        assert!(html.starts_with(
            r#"<pre class="language-javascript"><code class="language-javascript">"#
        ));
        assert!(html.contains("<span class=\"hl-"));
        assert!(html.ends_with("</code></pre>"));
    }

    #[test]
    fn test_unrecognized_language_is_plain_and_escaped() {
        let highlighter = Highlighter::new();
        let html = highlighter.highlight("<b>\"hi\"</b>", Some("klingon"));
        assert_eq!(
            html,
            "<pre><code>&lt;b&gt;&quot;hi&quot;&lt;/b&gt;</code></pre>"
        );
        assert_eq!(highlighter.highlight("a & b", None), "<pre><code>a &amp; b</code></pre>");
    }

    #[test]
    fn test_disabled_and_excluded() {
        let disabled = Highlighter::with_options(false, &[]);
        assert_eq!(disabled.highlight("x", Some("python")), "<pre><code>x</code></pre>");

        let excluded = Highlighter::with_options(true, &["SQL".to_string()]);
        assert!(!excluded.is_language_supported("sql"));
        assert!(excluded.is_language_supported("python"));
    }
}
