//! Dashboard preferences
//!
//! Persisted in LocalStorage as plain strings so the page's own scripts can
//! read them too.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage rejected write: {0}")]
    Rejected(String),
}

/// Durable string key-value storage
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// User preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Chosen theme; `None` until the user toggles once
    pub theme: Option<Theme>,
}

impl Preferences {
    /// LocalStorage key
    pub const THEME_KEY: &'static str = "theme";

    /// Read preferences; unknown stored values count as unset
    pub fn load<S: PreferenceStore + ?Sized>(store: &S) -> Self {
        let theme = store
            .get(Self::THEME_KEY)
            .and_then(|value| Theme::from_str(&value));
        Self { theme }
    }

    /// Write every preference that has been set
    pub fn save<S: PreferenceStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        if let Some(theme) = self.theme {
            store.set(Self::THEME_KEY, theme.as_str())?;
        }
        Ok(())
    }
}

/// In-memory store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
