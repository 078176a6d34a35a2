#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod batch;
pub mod client;
pub mod config;
pub mod http;
pub mod merge;
pub mod preferences;
pub mod projects;
pub mod repos;

pub use batch::{fetch_all, BatchError, BatchReport, ErrorAffordance, SourceFailure};
pub use client::{
    ApiErrorKind, ClientError, FetchError, RepositoryFetchClient, SourceKind, SourceOutcome,
    GITHUB_API_BASE,
};
pub use config::{ConfigError, FetchConfiguration, GitHubSettings, PortfolioConfig};
pub use http::{
    HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, RetryPolicy, TransportError,
};
pub use merge::merge_sources;
pub use preferences::{
    AppState, FilePreferenceStore, MemoryPreferenceStore, PreferenceError, PreferenceStore, Theme,
};
pub use projects::{compose_projects, ManualProject, Project};
pub use repos::{RepoName, RepositoryRecord};
