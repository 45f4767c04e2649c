use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use time::OffsetDateTime;

use super::common::{GhLabel, GhRepository, GhUser};

/// GitHub Pull request state.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GhPullRequestState {
    /// Open.
    #[default]
    Open,
    /// Closed.
    Closed,
}

/// GitHub Pull request action.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GhPullRequestAction {
    /// Opened.
    #[default]
    Opened,
    /// Edited.
    Edited,
    /// Closed.
    Closed,
    /// Reopened.
    Reopened,
    /// Synchronize.
    Synchronize,
    /// Labeled.
    Labeled,
    /// Unlabeled.
    Unlabeled,
    /// Ready for review.
    ReadyForReview,
    /// Converted to draft.
    ConvertedToDraft,
    /// Any other action.
    #[serde(other)]
    Other,
}

/// GitHub Pull request.
#[derive(Debug, Deserialize, Serialize, Clone, SmartDefault, PartialEq, Eq)]
pub struct GhPullRequest {
    /// Upstream numeric ID.
    pub id: u64,
    /// Number.
    pub number: u64,
    /// State.
    pub state: GhPullRequestState,
    /// Title.
    pub title: String,
    /// Author.
    pub user: GhUser,
    /// Added lines.
    #[serde(default)]
    pub additions: u64,
    /// Removed lines.
    #[serde(default)]
    pub deletions: u64,
    /// Created at.
    #[default(OffsetDateTime::UNIX_EPOCH)]
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Updated at.
    #[default(OffsetDateTime::UNIX_EPOCH)]
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    /// Closed at.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub closed_at: Option<OffsetDateTime>,
    /// Merged at.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub merged_at: Option<OffsetDateTime>,
    /// Merged?
    #[serde(default)]
    pub merged: Option<bool>,
    /// Merged by.
    #[serde(default)]
    pub merged_by: Option<GhUser>,
    /// Labels.
    #[serde(default)]
    pub labels: Vec<GhLabel>,
}

/// GitHub Pull request event.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhPullRequestEvent {
    /// Action.
    pub action: GhPullRequestAction,
    /// Number.
    pub number: u64,
    /// Pull request.
    pub pull_request: GhPullRequest,
    /// Repository.
    pub repository: GhRepository,
    /// Sender.
    #[serde(default)]
    pub sender: GhUser,
}

#[cfg(test)]
mod tests {
    use super::{GhPullRequestAction, GhPullRequestEvent};

    #[test]
    fn unknown_action_deserializes_as_other() {
        let body = serde_json::json!({
            "action": "auto_merge_enabled",
            "number": 1,
            "pull_request": {
                "id": 1,
                "number": 1,
                "state": "open",
                "title": "Test",
                "user": { "id": 1, "login": "me" },
                "created_at": "2023-01-01T00:00:00Z",
                "updated_at": "2023-01-01T00:00:00Z"
            },
            "repository": {
                "id": 1,
                "name": "test",
                "full_name": "me/test",
                "owner": { "id": 1, "login": "me" }
            }
        });

        let event: GhPullRequestEvent = serde_json::from_value(body).unwrap();
        assert_eq!(event.action, GhPullRequestAction::Other);
    }
}
