//! Configuration loading.
//!
//! `portfolio.toml` describes which repositories to fetch and the manual
//! projects to list beside them:
//!
//! ```toml
//! [github]
//! fetch-starred-repos = true
//! username = "octocat"
//! selected-repos = ["facebook/react", "vercel/next.js"]
//! featured-repos = ["facebook/react"]
//!
//! [[projects]]
//! title = "Portfolio Website"
//! description = "This site."
//! tech = ["Rust"]
//! ```

mod error;
mod fetch;
mod settings;

pub use error::ConfigError;
pub use fetch::{
    is_active_account, usable_credential, FetchConfiguration, DEFAULT_MAX_STARRED,
    PLACEHOLDER_TOKENS, PLACEHOLDER_USERNAME,
};
pub use settings::{GitHubSettings, PortfolioConfig, TOKEN_ENV};
