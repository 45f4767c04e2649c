//! GitHub API implementation.

mod auth;
mod errors;
mod service;

pub use auth::Credentials;
pub use errors::GitHubError;
pub use service::GithubApiService;
