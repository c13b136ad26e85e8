//! Persisted outfit-style list: four built-in styles plus user additions.

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleItem {
    pub name: String,
    pub icon: String,
    pub removable: bool,
}

/// The user's style list. Built-ins cannot be removed; user-added styles can.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleBook {
    styles: Vec<StyleItem>,
}

impl Default for StyleBook {
    fn default() -> Self {
        let builtin = |name: &str, icon: &str| StyleItem {
            name: name.to_string(),
            icon: icon.to_string(),
            removable: false,
        };
        Self {
            styles: vec![
                builtin("Casual", "walk"),
                builtin("Sport", "run"),
                builtin("Classic", "crown"),
                builtin("Business", "briefcase"),
            ],
        }
    }
}

impl StyleBook {
    pub fn items(&self) -> &[StyleItem] {
        &self.styles
    }

    pub fn contains(&self, name: &str) -> bool {
        self.styles.iter().any(|s| s.name == name)
    }

    /// Add a user style. Name is trimmed; empty names and duplicates are
    /// rejected. Returns whether the list changed.
    pub fn add(&mut self, name: &str, icon: &str) -> bool {
        let clean = name.trim();
        if clean.is_empty() || self.contains(clean) {
            return false;
        }
        self.styles.push(StyleItem {
            name: clean.to_string(),
            icon: icon.to_string(),
            removable: true,
        });
        true
    }

    /// Remove a style by name. Built-ins stay. Returns whether the list changed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.styles.len();
        self.styles.retain(|s| !(s.removable && s.name == name));
        self.styles.len() != before
    }

    /// Load the style list from disk, or the built-in defaults if the file
    /// doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read styles file: {}", path.display()))?;

        let book: StyleBook = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse styles file: {}", path.display()))?;

        Ok(book)
    }

    /// Save the style list to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize styles")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write styles file: {}", path.display()))?;

        Ok(())
    }

    fn file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "stylecast", "stylecast")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(dirs.data_dir().join("styles.json"))
    }
}
