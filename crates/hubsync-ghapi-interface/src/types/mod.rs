//! Wire types for GitHub payloads.

mod common;
mod hooks;
mod issues;
mod ping;
mod pulls;
mod rate_limit;
mod teams;

pub use common::{GhLabel, GhRepository, GhUser};
pub use hooks::{GhHookConfig, GhHookSettings};
pub use issues::{GhIssue, GhIssueComment, GhIssueCommentAction, GhIssueCommentEvent};
pub use ping::GhPingEvent;
pub use pulls::{GhPullRequest, GhPullRequestAction, GhPullRequestEvent, GhPullRequestState};
pub use rate_limit::GhRateLimit;
pub use teams::GhTeam;
