//! Theme preference persistence

use anyhow::Result;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::Theme;

/// Key holding the theme in the preferences file
pub const STORAGE_KEY: &str = "blog-theme";

/// A JSON preferences file holding the theme under [`STORAGE_KEY`].
///
/// Reads treat anything missing or invalid as "not set"; writes are
/// best-effort and only log failures.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored theme, if there is a valid one
    pub fn load(&self) -> Option<Theme> {
        let prefs = self.read_prefs()?;
        let stored = prefs.get(STORAGE_KEY)?;

        match stored.as_str().map(str::parse::<Theme>) {
            Some(Ok(theme)) => Some(theme),
            _ => {
                tracing::warn!("Invalid theme {} found in preferences, ignoring", stored);
                None
            }
        }
    }

    /// Persist the theme; failures are logged and swallowed
    pub fn save(&self, theme: Theme) {
        if let Err(e) = self.try_save(theme) {
            tracing::warn!(
                "Failed to save theme preference to {:?}: {}",
                self.path,
                e
            );
        }
    }

    fn try_save(&self, theme: Theme) -> Result<()> {
        let mut prefs = self.read_prefs().unwrap_or_default();
        prefs.insert(STORAGE_KEY.to_string(), Value::String(theme.to_string()));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&prefs)?)?;
        Ok(())
    }

    fn read_prefs(&self) -> Option<Map<String, Value>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read preferences {:?}: {}", self.path, e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(prefs) => Some(prefs),
            Err(e) => {
                tracing::warn!("Ignoring malformed preferences {:?}: {}", self.path, e);
                None
            }
        }
    }
}
