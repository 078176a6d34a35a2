//! Theme preference and the application state that carries it.
//!
//! The theme lives in an explicit [`AppState`] passed to whatever renders the
//! page; persistence goes through an injected [`PreferenceStore`].

mod error;
mod store;

pub use error::PreferenceError;
pub use store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Colour scheme of the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// Returns the other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// State handed to the rendering layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppState {
    pub theme: Theme,
}

impl AppState {
    /// Restores state from `store`.
    ///
    /// A store that cannot be read is logged and treated as empty.
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let theme = match store.load_preference() {
            Ok(theme) => theme.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Failed to read theme preference, using default");
                Theme::default()
            }
        };
        Self { theme }
    }

    /// Switches the theme and persists it.
    ///
    /// The switch stands even if saving fails; the failure is logged.
    pub fn toggle_theme(&mut self, store: &dyn PreferenceStore) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(e) = store.save_preference(self.theme) {
            warn!(error = %e, "Failed to save theme preference");
        }
        self.theme
    }
}
