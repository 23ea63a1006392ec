//! About page loader

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{AboutPage, MarkdownPipeline};
use crate::error::AboutError;

/// Loads the about page from its markdown file on every call
pub struct AboutLoader {
    path: PathBuf,
    pipeline: Arc<MarkdownPipeline>,
}

impl AboutLoader {
    pub fn new<P: AsRef<Path>>(path: P, pipeline: Arc<MarkdownPipeline>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            pipeline,
        }
    }

    pub async fn load_about_page(&self) -> Result<AboutPage, AboutError> {
        let path = self.path.display().to_string();
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(AboutError::NotFound { path });
            }
            Err(source) => return Err(AboutError::Io { path, source }),
        };

        AboutPage::parse(&path, &content, &self.pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn loader(path: &Path) -> AboutLoader {
        AboutLoader::new(path, Arc::new(MarkdownPipeline::default()))
    }

    #[tokio::test]
    async fn test_load_about_page() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("about.md");
        fs::write(&path, "---\ntitle: About Me\nrole: writer\n---\n\nI write <script>x()</script>things.").unwrap();

        let page = loader(&path).load_about_page().await.unwrap();
        assert_eq!(page.title, "About Me");
        assert!(page.content.contains("I write"));
        assert!(!page.content.contains("<script"));
        assert!(page.metadata.contains_key("role"));
    }

    #[tokio::test]
    async fn test_about_page_is_reloaded_each_call() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("about.md");
        let loader = loader(&path);

        fs::write(&path, "first").unwrap();
        assert!(loader.load_about_page().await.unwrap().content.contains("first"));

        fs::write(&path, "second").unwrap();
        assert!(loader.load_about_page().await.unwrap().content.contains("second"));
    }

    #[tokio::test]
    async fn test_missing_about_page() {
        let dir = TempDir::new().unwrap();
        let err = loader(&dir.path().join("about.md"))
            .load_about_page()
            .await
            .unwrap_err();
        assert!(matches!(err, AboutError::NotFound { .. }));
    }
}
