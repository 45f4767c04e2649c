use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use time::OffsetDateTime;

/// Recorded deploy of a git revision for a repository.
///
/// Unlike the other entities, deploys are keyed locally: a deploy is unique
/// per `(repository_id, git_revision)`. The deploy user is the merger of the
/// earliest-created linked pull request; a deploy without a merged linked
/// pull request is rejected at ingress, so `user_id` always names a real
/// user.
#[derive(Debug, Clone, SmartDefault, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deploy {
    pub id: u64,
    pub repository_id: u64,
    pub user_id: u64,
    pub git_revision: String,
    #[default(OffsetDateTime::UNIX_EPOCH)]
    #[serde(with = "time::serde::rfc3339")]
    pub deployed_at: OffsetDateTime,
}
