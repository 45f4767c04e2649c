//! Domain models.

mod comment;
mod deploy;
mod pull_request;
mod pull_request_state;
mod repository;
mod repository_path;
mod sync_report;
mod team;
mod user;

pub use comment::Comment;
pub use deploy::Deploy;
pub use pull_request::PullRequest;
pub use pull_request_state::{PullRequestState, PullRequestStateError};
pub use repository::Repository;
pub use repository_path::{RepositoryPath, RepositoryPathError};
pub use sync_report::{SyncReport, SyncStatus};
pub use team::Team;
pub use user::User;
