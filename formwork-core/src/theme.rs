//! Light/dark theme provider persisted under a single store key.

use tracing::{info, warn};

use crate::store::KeyValueStore;
use crate::types::Theme;

/// Store key holding `"light"` or `"dark"`.
pub const THEME_KEY: &str = "theme";

/// Holds the current [`Theme`] and writes every change through to the store.
#[derive(Debug)]
pub struct ThemeProvider<S: KeyValueStore> {
    store: S,
    theme: Theme,
}

impl<S: KeyValueStore> ThemeProvider<S> {
    /// Read the persisted theme; absent or unrecognised values mean [`Theme::Light`].
    pub fn load(store: S) -> Result<Self, S::Error> {
        let theme = match store.get(THEME_KEY)? {
            None => Theme::default(),
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                warn!(value = %raw, error = %err, "ignoring unrecognised stored theme");
                Theme::default()
            }),
        };
        Ok(Self { store, theme })
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set(&mut self, theme: Theme) -> Result<(), S::Error> {
        self.store.set(THEME_KEY, theme.as_str())?;
        if theme != self.theme {
            info!(from = %self.theme, to = %theme, "theme changed");
        }
        self.theme = theme;
        Ok(())
    }

    /// Flip the theme and persist it; returns the new theme.
    pub fn toggle(&mut self) -> Result<Theme, S::Error> {
        let next = self.theme.toggled();
        self.set(next)?;
        Ok(next)
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
