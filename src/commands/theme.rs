//! Read or change the reader theme

use anyhow::Result;

use crate::theme::{current_decoration, Theme, ThemeState};
use crate::Blog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeAction {
    Get,
    Set(String),
    Toggle,
}

/// Apply `action` to the stored preference and return the resulting theme
pub fn run(blog: &Blog, action: &ThemeAction) -> Result<Theme> {
    let mut state = ThemeState::load(blog.theme_store());

    let theme = match action {
        ThemeAction::Get => state.current(),
        ThemeAction::Set(name) => state.set(name)?,
        ThemeAction::Toggle => state.toggle(),
    };

    match current_decoration() {
        Some(decoration) => println!("{} ({:?} decorations)", theme, decoration),
        None => println!("{}", theme),
    }

    Ok(theme)
}
