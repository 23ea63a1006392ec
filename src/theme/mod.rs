//! Reader theme: light/dark preference and seasonal decorations

mod storage;

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use storage::{ThemeStore, STORAGE_KEY};

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The other theme
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme {0:?} (expected light or dark)")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

/// The active theme, persisted best-effort through a [`ThemeStore`]
#[derive(Debug)]
pub struct ThemeState {
    current: Theme,
    store: ThemeStore,
}

impl ThemeState {
    /// Start from the stored preference, or the default theme
    pub fn load(store: ThemeStore) -> Self {
        let current = store.load().unwrap_or_default();
        Self { current, store }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Switch to the theme named `name`.
    ///
    /// Unknown names are rejected with a warning and the current theme stays.
    pub fn set(&mut self, name: &str) -> Result<Theme, UnknownTheme> {
        match name.parse::<Theme>() {
            Ok(theme) => {
                self.apply(theme);
                Ok(theme)
            }
            Err(e) => {
                tracing::warn!("Invalid theme {:?} cannot be set", name);
                Err(e)
            }
        }
    }

    pub fn toggle(&mut self) -> Theme {
        let next = self.current.toggled();
        self.apply(next);
        next
    }

    fn apply(&mut self, theme: Theme) {
        self.current = theme;
        self.store.save(theme);
    }
}

/// Seasonal page decorations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decoration {
    Halloween,
    Christmas,
}

/// Decoration for a month (1 = January)
pub fn seasonal_decoration(month: u32) -> Option<Decoration> {
    match month {
        10 => Some(Decoration::Halloween),
        12 => Some(Decoration::Christmas),
        _ => None,
    }
}

/// Decoration for the current local month
pub fn current_decoration() -> Option<Decoration> {
    seasonal_decoration(Local::now().month())
}
