//! Preference store implementations.

use super::{PreferenceError, Theme};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Persistence port for the theme preference.
pub trait PreferenceStore: Send + Sync {
    /// Returns the stored theme, or `None` if nothing was saved yet.
    fn load_preference(&self) -> Result<Option<Theme>, PreferenceError>;

    /// Stores `theme`, replacing any previous value.
    fn save_preference(&self, theme: Theme) -> Result<(), PreferenceError>;
}

/// On-disk shape: `{"darkMode": true}`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredPreference {
    dark_mode: bool,
}

/// Stores the preference as a small JSON file.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PreferenceError {
        PreferenceError::IoError {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn json_error(&self, source: serde_json::Error) -> PreferenceError {
        PreferenceError::JsonError {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load_preference(&self) -> Result<Option<Theme>, PreferenceError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        let stored: StoredPreference =
            serde_json::from_str(&content).map_err(|e| self.json_error(e))?;
        Ok(Some(Theme::from_dark_mode(stored.dark_mode)))
    }

    fn save_preference(&self, theme: Theme) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let stored = StoredPreference {
            dark_mode: theme.is_dark(),
        };
        let content = serde_json::to_string(&stored).map_err(|e| self.json_error(e))?;
        std::fs::write(&self.path, content).map_err(|e| self.io_error(e))
    }
}

/// Keeps the preference in memory for the life of the process.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    theme: Mutex<Option<Theme>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `theme`.
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme: Mutex::new(Some(theme)),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load_preference(&self) -> Result<Option<Theme>, PreferenceError> {
        Ok(*self.theme.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn save_preference(&self, theme: Theme) -> Result<(), PreferenceError> {
        *self.theme.lock().unwrap_or_else(PoisonError::into_inner) = Some(theme);
        Ok(())
    }
}
