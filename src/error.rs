//! Typed errors for the content layer

use thiserror::Error;

/// Why a single source document could not become a post
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("cannot derive a slug from title {title:?}")]
    EmptySlug { title: String },

    #[error("slug {slug:?} is already used by {kept}")]
    DuplicateSlug { slug: String, kept: String },
}

/// Failure of a whole batch fetch from a document source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("invalid source pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("document source unavailable: {0}")]
    Unavailable(String),
}

/// Errors while rendering markdown to HTML
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write rendered HTML")]
    Format(#[from] std::fmt::Error),
}

/// Errors while loading the about page
#[derive(Debug, Error)]
pub enum AboutError {
    #[error("Failed to load about page: {path} not found")]
    NotFound { path: String },

    #[error("Failed to load about page: {path} is empty")]
    Empty { path: String },

    #[error("Failed to load about page: cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}
