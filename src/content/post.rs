//! Post and about page models

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::frontmatter::Metadata;
use super::pipeline::MarkdownPipeline;
use super::scanner::should_ignore_file;
use super::source::SourceDocument;
use crate::error::{AboutError, DocumentError};
use crate::posts::{generate_slug, normalize_tag, normalize_tags, title_from_filename};

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Stable identifier (same as the slug)
    pub id: String,

    /// URL-safe name, unique within a collection
    pub slug: String,

    /// Post title
    pub title: String,

    /// Sanitized HTML content
    pub content: String,

    /// Markdown body without front-matter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_content: Option<String>,

    /// Publication date
    pub publication_date: DateTime<Utc>,

    pub author: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Tags as authored
    #[serde(default)]
    pub tags: Vec<String>,

    /// Identifier of the source document
    pub source_file: String,

    /// All front-matter fields
    #[serde(default)]
    pub metadata: Metadata,
}

/// Values used when a document's front-matter leaves them out
#[derive(Debug, Clone)]
pub struct PostDefaults {
    pub author: String,
    /// Timezone for dates written without an offset
    pub timezone: Tz,
}

impl Default for PostDefaults {
    fn default() -> Self {
        Self {
            author: "John Doe".to_string(),
            timezone: Tz::UTC,
        }
    }
}

impl Post {
    /// Build a post from a source document.
    ///
    /// Returns `Ok(None)` for documents that aren't publishable sources
    /// (hidden, temporary or non-markdown files, or blank content). `now`
    /// stands in for a missing or unparseable date.
    pub fn from_document(
        doc: &SourceDocument,
        pipeline: &MarkdownPipeline,
        defaults: &PostDefaults,
        now: DateTime<Utc>,
    ) -> Result<Option<Post>, DocumentError> {
        let filename = file_name(&doc.identifier);
        if should_ignore_file(filename) || doc.content.trim().is_empty() {
            return Ok(None);
        }

        let rendered = pipeline.process(&doc.content);
        let fm = &rendered.frontmatter;

        let title = fm.title().unwrap_or_else(|| title_from_filename(filename));
        let slug = generate_slug(&fm.slug().unwrap_or_else(|| title.clone()));
        if slug.is_empty() {
            return Err(DocumentError::EmptySlug { title });
        }

        let publication_date = match fm.parse_date(defaults.timezone) {
            Some(date) => date,
            None => {
                if fm.get("date").is_some() {
                    tracing::warn!(
                        "Unparseable date in {}, using load time",
                        doc.identifier
                    );
                }
                now
            }
        };

        Ok(Some(Post {
            id: slug.clone(),
            slug,
            title,
            content: rendered.html,
            raw_content: Some(rendered.body),
            publication_date,
            author: fm.author().unwrap_or_else(|| defaults.author.clone()),
            excerpt: fm.excerpt(),
            tags: fm.tags(),
            source_file: doc.identifier.clone(),
            metadata: rendered.frontmatter.metadata,
        }))
    }

    /// Normalized, de-duplicated tags
    pub fn normalized_tags(&self) -> Vec<String> {
        normalize_tags(&self.tags)
    }

    /// Whether any tag matches `tag` after normalization
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = normalize_tag(tag);
        !wanted.is_empty() && self.tags.iter().any(|t| normalize_tag(t) == wanted)
    }
}

/// The about page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutPage {
    pub title: String,
    /// Sanitized HTML content
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_content: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl AboutPage {
    /// Default title when the front-matter has none
    pub const DEFAULT_TITLE: &'static str = "About";

    /// Build the about page from its markdown source
    pub fn parse(
        path: &str,
        content: &str,
        pipeline: &MarkdownPipeline,
    ) -> Result<AboutPage, AboutError> {
        if content.trim().is_empty() {
            return Err(AboutError::Empty {
                path: path.to_string(),
            });
        }

        let rendered = pipeline.process(content);
        let title = rendered
            .frontmatter
            .title()
            .unwrap_or_else(|| Self::DEFAULT_TITLE.to_string());

        Ok(AboutPage {
            title,
            content: rendered.html,
            raw_content: Some(rendered.body),
            metadata: rendered.frontmatter.metadata,
        })
    }
}

/// Last path segment of a document identifier
fn file_name(identifier: &str) -> &str {
    Path::new(identifier)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(identifier)
}
