//! Errors raised while reading `portfolio.toml`.

use thiserror::Error;

/// Why `portfolio.toml` could not be turned into a [`PortfolioConfig`](super::PortfolioConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The portfolio config exists but could not be read.
    #[error("Cannot read portfolio config '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The portfolio config is not valid TOML or has wrongly typed keys.
    #[error("Malformed portfolio config '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A `[github]` or `[[projects]]` value is out of range.
    #[error("Invalid setting in portfolio config '{path}': {message}")]
    ValidationError { path: String, message: String },

    /// No portfolio config at the given path.
    #[error("Portfolio config not found: {path}")]
    MissingFile { path: String },
}
