//! Where raw documents come from

use std::future::Future;
use std::path::{Path, PathBuf};

use crate::error::SourceError;

/// A raw document: identifier plus full text, front-matter included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub identifier: String,
    pub content: String,
}

impl SourceDocument {
    pub fn new(identifier: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            content: content.into(),
        }
    }
}

/// Supplies every document of a content location in one batch
pub trait DocumentSource: Send + Sync {
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<SourceDocument>, SourceError>> + Send;
}

/// Documents matching a glob under a base directory
#[derive(Debug, Clone)]
pub struct GlobSource {
    base_dir: PathBuf,
    pattern: String,
}

impl GlobSource {
    pub fn new<P: AsRef<Path>>(base_dir: P, pattern: &str) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            pattern: pattern.to_string(),
        }
    }

    /// Expand the pattern into matching file paths, sorted
    fn matching_paths(&self) -> Result<Vec<PathBuf>, SourceError> {
        let base = glob::Pattern::escape(&self.base_dir.to_string_lossy());
        let pattern = format!("{}/{}", base.trim_end_matches('/'), self.pattern);

        let entries = glob::glob(&pattern).map_err(|source| SourceError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::warn!("Skipping unreadable path: {}", e);
                    None
                }
            })
            .filter(|path| path.is_file())
            .collect();
        paths.sort();
        Ok(paths)
    }

    /// Identifier of a path: relative to the base dir, `/`-separated
    fn identifier_for(&self, path: &Path) -> String {
        path.strip_prefix(&self.base_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

impl DocumentSource for GlobSource {
    async fn fetch_all(&self) -> Result<Vec<SourceDocument>, SourceError> {
        let paths = self.matching_paths()?;

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            match tokio::fs::read_to_string(&path).await {
                Ok(content) => documents.push(SourceDocument::new(self.identifier_for(&path), content)),
                Err(e) => tracing::warn!("Failed to read {:?}: {}", path, e),
            }
        }

        tracing::debug!("Fetched {} documents matching {}", documents.len(), self.pattern);
        Ok(documents)
    }
}

/// A fixed set of documents held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: Vec<SourceDocument>,
}

impl MemorySource {
    pub fn new(documents: Vec<SourceDocument>) -> Self {
        Self { documents }
    }
}

impl DocumentSource for MemorySource {
    async fn fetch_all(&self) -> Result<Vec<SourceDocument>, SourceError> {
        Ok(self.documents.clone())
    }
}
