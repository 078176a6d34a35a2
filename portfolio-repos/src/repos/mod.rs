//! Repository identifiers, API payloads and normalized records.

mod api;
mod name;
mod record;

pub use api::{ApiOwner, ApiRepository};
pub use name::{RepoName, RepoNameError};
pub use record::{RepoStats, RepositoryRecord, NO_DESCRIPTION};
