//! blog-rs: the content pipeline behind a personal markdown blog
//!
//! Markdown posts with YAML front-matter are rendered to sanitized,
//! syntax-highlighted HTML and served to the reader through a small
//! JSON API and a CLI.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod posts;
pub mod server;
pub mod theme;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use content::{AboutLoader, GlobSource, MarkdownPipeline, PostDefaults, PostLoader};
use theme::ThemeStore;

/// The main blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    pipeline: Arc<MarkdownPipeline>,
}

impl Blog {
    /// Create a blog from a directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let pipeline = Arc::new(MarkdownPipeline::new(&config.highlight));
        Self {
            config,
            base_dir: base_dir.as_ref().to_path_buf(),
            pipeline,
        }
    }

    pub fn pipeline(&self) -> Arc<MarkdownPipeline> {
        self.pipeline.clone()
    }

    pub fn post_defaults(&self) -> PostDefaults {
        PostDefaults {
            author: self.config.author.clone(),
            timezone: self.config.tz(),
        }
    }

    /// Loader over the posts matched by the configured glob
    pub fn post_loader(&self) -> PostLoader<GlobSource> {
        PostLoader::new(
            GlobSource::new(&self.base_dir, &self.config.posts_glob),
            self.pipeline(),
            self.post_defaults(),
        )
    }

    pub fn about_loader(&self) -> AboutLoader {
        AboutLoader::new(self.base_dir.join(&self.config.about_file), self.pipeline())
    }

    pub fn theme_store(&self) -> ThemeStore {
        ThemeStore::new(self.base_dir.join(&self.config.preferences_file))
    }
}
