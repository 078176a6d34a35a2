//! `portfolio.toml` deserialization.

use super::fetch::{usable_credential, FetchConfiguration, DEFAULT_MAX_STARRED};
use super::ConfigError;
use crate::client::GITHUB_API_BASE;
use crate::projects::ManualProject;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Environment variable consulted when the config carries no usable token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Largest page size the starred endpoint accepts.
const MAX_PAGE_SIZE: u32 = 100;

/// Parsed contents of `portfolio.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PortfolioConfig {
    /// GitHub integration settings.
    #[serde(default)]
    pub github: GitHubSettings,

    /// Hand-authored projects listed alongside fetched repositories.
    #[serde(default)]
    pub projects: Vec<ManualProject>,
}

/// The `[github]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitHubSettings {
    /// Whether to fetch anything at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether to list the starred repositories of `username`.
    #[serde(default)]
    pub fetch_starred_repos: bool,

    /// Account whose stars are listed.
    #[serde(default)]
    pub username: String,

    /// Personal access token (optional).
    #[serde(default)]
    pub personal_access_token: Option<String>,

    /// Repositories fetched individually, as `owner/name`.
    #[serde(default)]
    pub selected_repos: Vec<String>,

    /// Repositories to mark as featured, as `owner/name`.
    #[serde(default)]
    pub featured_repos: Vec<String>,

    /// Page size for the starred listing.
    #[serde(default = "default_max_starred")]
    pub max_starred_repos: u32,

    /// List fetched repositories before the manual projects.
    #[serde(default = "default_true")]
    pub show_github_repos_first: bool,

    /// Per-source timeout; `0` disables it.
    #[serde(default = "default_source_timeout_secs")]
    pub source_timeout_secs: u64,

    /// API root (override for GitHub Enterprise or tests).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            fetch_starred_repos: false,
            username: String::new(),
            personal_access_token: None,
            selected_repos: Vec::new(),
            featured_repos: Vec::new(),
            max_starred_repos: default_max_starred(),
            show_github_repos_first: true,
            source_timeout_secs: default_source_timeout_secs(),
            api_base_url: default_api_base_url(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_starred() -> u32 {
    DEFAULT_MAX_STARRED
}

fn default_source_timeout_secs() -> u64 {
    30
}

fn default_api_base_url() -> String {
    GITHUB_API_BASE.to_string()
}

impl PortfolioConfig {
    /// Loads and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unreadable, malformed
    /// or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::parse(&content, &path.display().to_string())
    }

    /// Parses and validates config text; `origin` labels errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TomlError`] or [`ConfigError::ValidationError`].
    pub fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::TomlError {
            path: origin.to_string(),
            source: e,
        })?;
        config.validate(origin)?;
        Ok(config)
    }

    /// Checks values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first problem.
    pub fn validate(&self, origin: &str) -> Result<(), ConfigError> {
        let github = &self.github;
        let invalid = |message: String| ConfigError::ValidationError {
            path: origin.to_string(),
            message,
        };

        if github.max_starred_repos == 0 || github.max_starred_repos > MAX_PAGE_SIZE {
            return Err(invalid(format!(
                "max-starred-repos must be between 1 and {MAX_PAGE_SIZE}, got {}",
                github.max_starred_repos
            )));
        }

        let base = Url::parse(&github.api_base_url)
            .map_err(|e| invalid(format!("api-base-url '{}': {e}", github.api_base_url)))?;
        if base.cannot_be_a_base() {
            return Err(invalid(format!(
                "api-base-url '{}' cannot be used as a base URL",
                github.api_base_url
            )));
        }

        for (index, project) in self.projects.iter().enumerate() {
            if project.title.trim().is_empty() {
                return Err(invalid(format!("projects[{index}] has an empty title")));
            }
        }

        Ok(())
    }
}

impl GitHubSettings {
    /// Resolves the token: a usable config value, else [`TOKEN_ENV`].
    pub fn resolve_token(&self) -> Option<String> {
        usable_credential(self.personal_access_token.as_deref())
            .map(str::to_owned)
            .or_else(|| {
                std::env::var(TOKEN_ENV)
                    .ok()
                    .filter(|token| usable_credential(Some(token.as_str())).is_some())
            })
    }

    /// Returns the per-source timeout, if enabled.
    pub fn source_timeout(&self) -> Option<Duration> {
        (self.source_timeout_secs > 0).then(|| Duration::from_secs(self.source_timeout_secs))
    }

    /// Builds the configuration for one fetch cycle.
    ///
    /// A usable `credential` overrides the token resolved from the
    /// config/environment; a placeholder one is ignored.
    pub fn fetch_configuration(&self, credential: Option<String>) -> FetchConfiguration {
        let starred_of = self
            .fetch_starred_repos
            .then(|| self.username.clone())
            .filter(|name| !name.trim().is_empty());

        FetchConfiguration {
            credential: usable_credential(credential.as_deref())
                .map(str::to_owned)
                .or_else(|| self.resolve_token()),
            named_repos: self.selected_repos.clone(),
            starred_of,
            max_starred: self.max_starred_repos,
            featured_set: self.featured_repos.iter().cloned().collect(),
            source_timeout: self.source_timeout(),
        }
    }
}
