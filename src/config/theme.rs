//! Light/dark preference

use std::fmt;

use crate::error::StorageError;
use crate::storage::{KeyValueStore, THEME_KEY};

/// Preferred colour scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Read the stored preference; anything unrecognised is light
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        match store.get(THEME_KEY) {
            Ok(Some(value)) if value == "dark" => ThemeMode::Dark,
            Ok(_) => ThemeMode::Light,
            Err(e) => {
                tracing::warn!("Failed to read theme preference: {}", e);
                ThemeMode::Light
            }
        }
    }

    /// Persist this preference
    pub fn save<S: KeyValueStore>(self, store: &mut S) -> Result<(), StorageError> {
        store.set(THEME_KEY, self.as_str())
    }

    /// Flip the stored preference and return the new mode
    ///
    /// Nothing is returned unless the write succeeded.
    pub fn toggle<S: KeyValueStore>(store: &mut S) -> Result<Self, StorageError> {
        let mode = Self::load(&*store).toggled();
        mode.save(store)?;
        tracing::debug!("Theme switched to {}", mode);
        Ok(mode)
    }

    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
