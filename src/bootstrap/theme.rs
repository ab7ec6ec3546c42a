//! Light/dark theme preference

use std::fmt;

use super::THEME_STORAGE_KEY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a persisted value. Anything other than `"dark"` reads as light.
    pub fn from_stored(value: &str) -> Self {
        if value == "dark" {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(self) -> Self {
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

/// Key/value storage that outlives a page load
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// The operating environment's colour scheme signal
pub trait ColorSchemeSignal: Send {
    fn prefers_dark(&self) -> bool;
}

/// Resolves the initial theme and persists toggles
pub struct ThemeController<P, S> {
    store: P,
    signal: S,
    current: Theme,
}

impl<P: PreferenceStore, S: ColorSchemeSignal> ThemeController<P, S> {
    /// Saved preference first, environment preference otherwise
    pub fn load(store: P, signal: S) -> Self {
        let current = match store.get(THEME_STORAGE_KEY) {
            Some(saved) => Theme::from_stored(&saved),
            None if signal.prefers_dark() => Theme::Dark,
            None => Theme::Light,
        };
        Self {
            store,
            signal,
            current,
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        self.store.set(THEME_STORAGE_KEY, self.current.as_str());
        tracing::debug!("Theme switched to {}", self.current);
        self.current
    }

    /// Hand back the store and signal, e.g. to simulate a reload
    pub fn into_parts(self) -> (P, S) {
        (self.store, self.signal)
    }
}
