use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use time::OffsetDateTime;

use super::common::{GhRepository, GhUser};

/// GitHub Issue comment action.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GhIssueCommentAction {
    /// Created.
    #[default]
    Created,
    /// Edited.
    Edited,
    /// Deleted.
    Deleted,
}

/// GitHub Issue, the comment anchor in issue comment events.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhIssue {
    /// Upstream numeric ID.
    pub id: u64,
    /// Number.
    pub number: u64,
}

/// GitHub Issue comment.
#[derive(Debug, Deserialize, Serialize, Clone, SmartDefault, PartialEq, Eq)]
pub struct GhIssueComment {
    /// Upstream numeric ID.
    pub id: u64,
    /// Author.
    pub user: GhUser,
    /// Body.
    #[serde(default)]
    pub body: String,
    /// Created at.
    #[default(OffsetDateTime::UNIX_EPOCH)]
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Updated at.
    #[default(OffsetDateTime::UNIX_EPOCH)]
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// GitHub Issue comment event.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhIssueCommentEvent {
    /// Action.
    pub action: GhIssueCommentAction,
    /// Issue.
    pub issue: GhIssue,
    /// Comment.
    pub comment: GhIssueComment,
    /// Repository.
    pub repository: GhRepository,
    /// Sender.
    #[serde(default)]
    pub sender: GhUser,
}
