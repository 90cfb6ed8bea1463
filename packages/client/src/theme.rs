//! Light/dark preference, kept in persistent storage under [`THEME_KEY`] so
//! every tab picks it up.

use std::fmt;

use crate::storage::{KeyValueStore, THEME_KEY};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Toggle button face: offers the opposite theme.
    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }

    /// Saved preference wins; otherwise follow the system colour scheme.
    pub fn resolve(saved: Option<&str>, prefers_dark: bool) -> Self {
        match saved.and_then(Theme::parse) {
            Some(theme) => theme,
            None if prefers_dark => Theme::Dark,
            None => Theme::Light,
        }
    }

    pub fn load(store: &dyn KeyValueStore, prefers_dark: bool) -> Self {
        Self::resolve(store.get(THEME_KEY).as_deref(), prefers_dark)
    }

    pub fn save(&self, store: &dyn KeyValueStore) {
        store.set(THEME_KEY, self.as_str());
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
