//! Content module - markdown pipeline, posts and the about page

mod about;
mod frontmatter;
mod highlight;
pub mod loader;
mod markdown;
mod pipeline;
mod post;
mod sanitize;
mod scanner;
mod source;

pub use about::AboutLoader;
pub use frontmatter::{value_to_string, FrontMatter, Metadata};
pub use highlight::{normalize_language, Highlighter};
pub use loader::{DocumentFailure, LoadReport, PostLoader, WatchHandle};
pub use markdown::MarkdownRenderer;
pub use pipeline::{MarkdownPipeline, RenderedDocument};
pub use post::{AboutPage, Post, PostDefaults};
pub use sanitize::Sanitizer;
pub use scanner::should_ignore_file;
pub use source::{DocumentSource, GlobSource, MemorySource, SourceDocument};
