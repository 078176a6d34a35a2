//! Per-run fetch configuration and placeholder handling.

use std::collections::HashSet;
use std::time::Duration;

/// Token values shipped in example configs; treated as "no token".
pub const PLACEHOLDER_TOKENS: &[&str] = &["your-github-pat-here", "ghp_your_token_here"];

/// Username shipped in the example config; treated as "not configured".
pub const PLACEHOLDER_USERNAME: &str = "your-github-username";

/// Default cap on the starred-repository page size.
pub const DEFAULT_MAX_STARRED: u32 = 30;

/// Returns the credential if it is set and not a placeholder.
pub fn usable_credential(credential: Option<&str>) -> Option<&str> {
    credential
        .map(str::trim)
        .filter(|token| !token.is_empty() && !PLACEHOLDER_TOKENS.contains(token))
}

/// Returns true if `account` names a real account to list stars for.
pub fn is_active_account(account: &str) -> bool {
    let account = account.trim();
    !account.is_empty() && account != PLACEHOLDER_USERNAME
}

/// What one fetch-merge cycle should query.
///
/// Built fresh per run and not modified afterwards.
#[derive(Debug, Clone)]
pub struct FetchConfiguration {
    /// Token sent as `Authorization: token ...` when usable.
    pub credential: Option<String>,

    /// `owner/name` entries to fetch individually.
    pub named_repos: Vec<String>,

    /// Account whose starred repositories are listed.
    pub starred_of: Option<String>,

    /// Page size for the starred listing.
    pub max_starred: u32,

    /// `owner/name` entries to mark as featured.
    pub featured_set: HashSet<String>,

    /// Upper bound on how long one source may take.
    pub source_timeout: Option<Duration>,
}

impl Default for FetchConfiguration {
    fn default() -> Self {
        Self {
            credential: None,
            named_repos: Vec::new(),
            starred_of: None,
            max_starred: DEFAULT_MAX_STARRED,
            featured_set: HashSet::new(),
            source_timeout: None,
        }
    }
}

impl FetchConfiguration {
    /// Creates an empty configuration with the default starred cap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the credential if it is usable.
    pub fn credential(&self) -> Option<&str> {
        usable_credential(self.credential.as_deref())
    }

    /// Returns the starred account if it is set and not a placeholder.
    pub fn active_starred_account(&self) -> Option<&str> {
        self.starred_of
            .as_deref()
            .map(str::trim)
            .filter(|account| is_active_account(account))
    }

    /// Returns true if at least one source would be queried.
    pub fn has_sources(&self) -> bool {
        self.active_starred_account().is_some() || !self.named_repos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_tokens_are_not_usable() {
        assert_eq!(usable_credential(None), None);
        assert_eq!(usable_credential(Some("")), None);
        assert_eq!(usable_credential(Some("   ")), None);
        assert_eq!(usable_credential(Some("your-github-pat-here")), None);
        assert_eq!(usable_credential(Some("ghp_your_token_here")), None);
        assert_eq!(usable_credential(Some("ghp_real")), Some("ghp_real"));
    }

    #[test]
    fn placeholder_username_is_inactive() {
        assert!(!is_active_account(""));
        assert!(!is_active_account(PLACEHOLDER_USERNAME));
        assert!(is_active_account("octocat"));
    }

    #[test]
    fn default_uses_starred_cap() {
        assert_eq!(FetchConfiguration::default().max_starred, DEFAULT_MAX_STARRED);
    }

    #[test]
    fn has_sources_requires_named_or_active_account() {
        let mut config = FetchConfiguration::new();
        assert_eq!(config.max_starred, DEFAULT_MAX_STARRED);
        assert!(!config.has_sources());

        config.starred_of = Some(PLACEHOLDER_USERNAME.to_string());
        assert!(!config.has_sources());

        config.starred_of = Some("octocat".to_string());
        assert!(config.has_sources());
        assert_eq!(config.active_starred_account(), Some("octocat"));

        config.starred_of = None;
        config.named_repos = vec!["acme/widget".to_string()];
        assert!(config.has_sources());
    }
}
