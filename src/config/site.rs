//! Site configuration (_config.yml)

use anyhow::Result;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    /// Author used for posts that don't name one
    pub author: String,
    pub language: String,
    /// IANA timezone used for frontmatter dates without an offset
    pub timezone: String,

    // Content
    /// Glob (relative to the site root) matching post sources
    pub posts_glob: String,
    pub about_file: String,
    pub preferences_file: String,

    // Reading
    pub related_limit: usize,
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub watch: WatchConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),
            timezone: String::new(),

            posts_glob: "content/posts/*.md".to_string(),
            about_file: "content/about.md".to_string(),
            preferences_file: ".blog/preferences.json".to_string(),

            related_limit: 5,
            highlight: HighlightConfig::default(),
            watch: WatchConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the configured timezone, falling back to UTC
    pub fn tz(&self) -> Tz {
        if self.timezone.trim().is_empty() {
            return Tz::UTC;
        }
        match self.timezone.trim().parse::<Tz>() {
            Ok(tz) => tz,
            Err(e) => {
                tracing::warn!("Unknown timezone {:?} ({}), using UTC", self.timezone, e);
                Tz::UTC
            }
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    /// Languages rendered as plain code even when recognized
    #[serde(default)]
    pub exclude_languages: Vec<String>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            exclude_languages: Vec::new(),
        }
    }
}

/// Development polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub interval_secs: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { interval_secs: 5 }
    }
}

impl WatchConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}
