//! Wire shapes returned by the GitHub REST API.
//!
//! Only the fields the portfolio consumes are declared; everything else in
//! the payload is ignored.

use serde::Deserialize;

/// A repository object from `/repos/{owner}/{name}` or `/users/{user}/starred`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRepository {
    pub id: u64,
    pub name: String,
    pub owner: Option<ApiOwner>,
    pub description: Option<String>,
    pub html_url: String,
    pub homepage: Option<String>,
    pub topics: Option<Vec<String>>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub language: Option<String>,
    pub updated_at: Option<String>,
}

/// The owning account of a repository.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiOwner {
    pub login: String,
}

impl ApiRepository {
    /// Returns `owner/name` when the payload carries an owner.
    pub fn full_name(&self) -> Option<String> {
        self.owner
            .as_ref()
            .map(|owner| format!("{}/{}", owner.login, self.name))
    }
}
