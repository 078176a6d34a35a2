//! Validated `owner/name` repository identifiers.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing an `owner/name` string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoNameError {
    /// No `/` between owner and name.
    #[error("Invalid repo format: '{input}'. Expected format: \"owner/repo-name\"")]
    MissingSeparator { input: String },

    /// More than one `/`.
    #[error("Invalid repo format: '{input}'. Expected exactly one '/'")]
    TooManySeparators { input: String },

    /// Owner or name is empty.
    #[error("Invalid repo format: '{input}'. Owner and name must be non-empty")]
    EmptySegment { input: String },
}

/// A repository identified by owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoName {
    owner: String,
    name: String,
}

impl RepoName {
    /// Parses `owner/name`, ignoring surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`RepoNameError`] unless the input splits on exactly one `/`
    /// into two non-empty parts.
    pub fn parse(input: &str) -> Result<Self, RepoNameError> {
        let trimmed = input.trim();
        let mut parts = trimmed.split('/');
        let (owner, name) = match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) => (owner, name),
            (_, None, _) => {
                return Err(RepoNameError::MissingSeparator {
                    input: input.to_string(),
                })
            }
            _ => {
                return Err(RepoNameError::TooManySeparators {
                    input: input.to_string(),
                })
            }
        };

        if owner.is_empty() || name.is_empty() {
            return Err(RepoNameError::EmptySegment {
                input: input.to_string(),
            });
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `owner/name`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoName {
    type Err = RepoNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_and_name() {
        let name = RepoName::parse("vercel/next.js").unwrap();
        assert_eq!(name.owner(), "vercel");
        assert_eq!(name.name(), "next.js");
        assert_eq!(name.full_name(), "vercel/next.js");
        assert_eq!(name.to_string(), "vercel/next.js");
    }

    #[test]
    fn trims_whitespace() {
        let name: RepoName = "  acme/widget \n".parse().unwrap();
        assert_eq!(name.full_name(), "acme/widget");
    }

    #[test]
    fn rejects_missing_separator() {
        assert!(matches!(
            RepoName::parse("just-a-name"),
            Err(RepoNameError::MissingSeparator { .. })
        ));
        assert!(matches!(
            RepoName::parse(""),
            Err(RepoNameError::MissingSeparator { .. })
        ));
    }

    #[test]
    fn rejects_extra_separators() {
        assert!(matches!(
            RepoName::parse("a/b/c"),
            Err(RepoNameError::TooManySeparators { .. })
        ));
    }

    #[test]
    fn rejects_empty_segments() {
        for input in ["/widget", "acme/", "/"] {
            assert!(
                matches!(RepoName::parse(input), Err(RepoNameError::EmptySegment { .. })),
                "{input} should be rejected"
            );
        }
    }
}
