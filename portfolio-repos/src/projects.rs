//! Combining fetched repositories with hand-authored projects.

use crate::repos::RepositoryRecord;
use serde::{Deserialize, Serialize};

/// A project written by hand in `portfolio.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all(deserialize = "kebab-case", serialize = "camelCase"))]
pub struct ManualProject {
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Technologies shown as tags.
    #[serde(default)]
    pub tech: Vec<String>,

    #[serde(default = "default_link")]
    pub code_url: String,

    #[serde(default = "default_link")]
    pub live_url: String,

    #[serde(default)]
    pub featured: bool,

    /// Cover image URL.
    #[serde(default)]
    pub image: Option<String>,
}

fn default_link() -> String {
    "#".to_string()
}

/// One entry in the rendered project list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum Project {
    /// Fetched from GitHub.
    GitHub(RepositoryRecord),
    /// Written by hand.
    Manual(ManualProject),
}

impl Project {
    pub fn title(&self) -> &str {
        match self {
            Self::GitHub(record) => &record.title,
            Self::Manual(project) => &project.title,
        }
    }

    pub fn is_featured(&self) -> bool {
        match self {
            Self::GitHub(record) => record.featured,
            Self::Manual(project) => project.featured,
        }
    }
}

/// Lists fetched repositories and manual projects together; fetched ones
/// come first when `fetched_first` is set.
pub fn compose_projects(
    fetched: Vec<RepositoryRecord>,
    manual: &[ManualProject],
    fetched_first: bool,
) -> Vec<Project> {
    let fetched = fetched.into_iter().map(Project::GitHub);
    let manual = manual.iter().cloned().map(Project::Manual);

    if fetched_first {
        fetched.chain(manual).collect()
    } else {
        manual.chain(fetched).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::RepoStats;

    fn fetched(title: &str) -> RepositoryRecord {
        RepositoryRecord {
            id: 1,
            title: title.to_string(),
            full_name: format!("me/{title}"),
            description: String::new(),
            code_url: String::new(),
            live_url: String::new(),
            topics: Vec::new(),
            featured: false,
            stats: RepoStats {
                stars: 0,
                forks: 0,
                language: None,
                updated_at: String::new(),
            },
        }
    }

    fn manual(title: &str) -> ManualProject {
        ManualProject {
            title: title.to_string(),
            description: String::new(),
            tech: Vec::new(),
            code_url: default_link(),
            live_url: default_link(),
            featured: true,
            image: None,
        }
    }

    #[test]
    fn fetched_first_ordering() {
        let projects = compose_projects(vec![fetched("repo")], &[manual("hand")], true);
        let titles: Vec<_> = projects.iter().map(Project::title).collect();
        assert_eq!(titles, vec!["repo", "hand"]);
    }

    #[test]
    fn manual_first_ordering() {
        let projects = compose_projects(vec![fetched("repo")], &[manual("hand")], false);
        let titles: Vec<_> = projects.iter().map(Project::title).collect();
        assert_eq!(titles, vec!["hand", "repo"]);
        assert!(projects[0].is_featured());
        assert!(!projects[1].is_featured());
    }

    #[test]
    fn manual_project_defaults_links() {
        let project: ManualProject = toml::from_str("title = \"Solo\"\n").unwrap();
        assert_eq!(project.code_url, "#");
        assert_eq!(project.live_url, "#");
        assert!(!project.featured);
    }

    #[test]
    fn serializes_with_source_tag() {
        let projects = compose_projects(vec![fetched("repo")], &[manual("hand")], true);
        let json = serde_json::to_value(&projects).unwrap();

        assert_eq!(json[0]["source"], "github");
        assert_eq!(json[0]["fullName"], "me/repo");
        assert_eq!(json[1]["source"], "manual");
        assert_eq!(json[1]["codeUrl"], "#");
    }
}
