//! Preference persistence error types.

use thiserror::Error;

/// Errors reading or writing the stored theme preference.
#[derive(Debug, Error)]
pub enum PreferenceError {
    /// Failed to read or write the preference file.
    #[error("Failed to access preference file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The stored preference could not be parsed or serialized.
    #[error("Invalid preference data in '{path}': {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
