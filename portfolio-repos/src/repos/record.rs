//! The normalized repository record handed to callers.

use super::api::ApiRepository;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashSet;

/// Description used when the upstream repository has none.
pub const NO_DESCRIPTION: &str = "No description available";

/// One repository, normalized from the upstream payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRecord {
    /// Upstream identifier.
    pub id: u64,

    /// Repository short name.
    pub title: String,

    /// `owner/name`; the de-duplication key.
    pub full_name: String,

    /// Upstream description, or [`NO_DESCRIPTION`].
    pub description: String,

    /// Web URL of the repository.
    pub code_url: String,

    /// Homepage if set, otherwise the same as `code_url`.
    pub live_url: String,

    /// Topic tags.
    pub topics: Vec<String>,

    /// Whether `full_name` is in the caller's featured set.
    pub featured: bool,

    /// Popularity and metadata.
    pub stats: RepoStats,
}

/// Upstream popularity/metadata for a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoStats {
    pub stars: u64,
    pub forks: u64,
    pub language: Option<String>,
    /// Upstream `updated_at`, passed through verbatim.
    pub updated_at: String,
}

impl RepositoryRecord {
    /// Normalizes an API payload under the given `full_name`.
    ///
    /// `featured` is computed from `featured_set`; nothing upstream affects it.
    pub fn from_api(repo: ApiRepository, full_name: String, featured_set: &HashSet<String>) -> Self {
        let description = repo
            .description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());
        let live_url = repo
            .homepage
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| repo.html_url.clone());
        let featured = featured_set.contains(&full_name);

        Self {
            id: repo.id,
            title: repo.name,
            full_name,
            description,
            code_url: repo.html_url,
            live_url,
            topics: repo.topics.unwrap_or_default(),
            featured,
            stats: RepoStats {
                stars: repo.stargazers_count,
                forks: repo.forks_count,
                language: repo.language,
                updated_at: repo.updated_at.unwrap_or_default(),
            },
        }
    }

    /// Key used to drop duplicates: `full_name`, or `{title}-{id}` when empty.
    pub fn dedup_key(&self) -> Cow<'_, str> {
        if self.full_name.is_empty() {
            Cow::Owned(format!("{}-{}", self.title, self.id))
        } else {
            Cow::Borrowed(&self.full_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> ApiRepository {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "widget",
            "owner": { "login": "acme" },
            "description": null,
            "html_url": "https://x/acme/widget",
            "homepage": null,
            "topics": [],
            "stargazers_count": 5,
            "forks_count": 1,
            "language": "TS",
            "updated_at": "2024-01-01"
        }))
        .unwrap()
    }

    #[test]
    fn normalizes_with_fallbacks() {
        let record = RepositoryRecord::from_api(widget(), "acme/widget".to_string(), &HashSet::new());

        assert_eq!(
            record,
            RepositoryRecord {
                id: 1,
                title: "widget".to_string(),
                full_name: "acme/widget".to_string(),
                description: NO_DESCRIPTION.to_string(),
                code_url: "https://x/acme/widget".to_string(),
                live_url: "https://x/acme/widget".to_string(),
                topics: vec![],
                featured: false,
                stats: RepoStats {
                    stars: 5,
                    forks: 1,
                    language: Some("TS".to_string()),
                    updated_at: "2024-01-01".to_string(),
                },
            }
        );
    }

    #[test]
    fn empty_strings_fall_back_like_nulls() {
        let mut repo = widget();
        repo.description = Some(String::new());
        repo.homepage = Some(String::new());

        let record = RepositoryRecord::from_api(repo, "acme/widget".to_string(), &HashSet::new());
        assert_eq!(record.description, NO_DESCRIPTION);
        assert_eq!(record.live_url, record.code_url);
    }

    #[test]
    fn homepage_and_topics_are_kept() {
        let mut repo = widget();
        repo.homepage = Some("https://widget.dev".to_string());
        repo.topics = Some(vec!["rust".to_string(), "cli".to_string()]);
        repo.description = Some("Widgets".to_string());

        let record = RepositoryRecord::from_api(repo, "acme/widget".to_string(), &HashSet::new());
        assert_eq!(record.live_url, "https://widget.dev");
        assert_eq!(record.topics, vec!["rust", "cli"]);
        assert_eq!(record.description, "Widgets");
    }

    #[test]
    fn featured_follows_membership_only() {
        let featured: HashSet<String> = ["acme/widget".to_string()].into_iter().collect();
        let record = RepositoryRecord::from_api(widget(), "acme/widget".to_string(), &featured);
        assert!(record.featured);

        let record = RepositoryRecord::from_api(widget(), "other/widget".to_string(), &featured);
        assert!(!record.featured);
    }

    #[test]
    fn dedup_key_falls_back_to_title_and_id() {
        let mut record =
            RepositoryRecord::from_api(widget(), "acme/widget".to_string(), &HashSet::new());
        assert_eq!(record.dedup_key(), "acme/widget");

        record.full_name.clear();
        assert_eq!(record.dedup_key(), "widget-1");
    }

    #[test]
    fn serializes_camel_case() {
        let record = RepositoryRecord::from_api(widget(), "acme/widget".to_string(), &HashSet::new());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["fullName"], "acme/widget");
        assert_eq!(json["liveUrl"], "https://x/acme/widget");
        assert_eq!(json["stats"]["updatedAt"], "2024-01-01");
        assert_eq!(json["stats"]["language"], "TS");
    }
}
