use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use time::OffsetDateTime;

use crate::{PullRequestState, Repository};

/// Mirrored GitHub pull request, keyed by its upstream numeric ID.
///
/// `(repository_id, number)` is unique.
#[derive(Debug, Clone, SmartDefault, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    pub id: u64,
    pub repository_id: u64,
    pub number: u64,
    pub state: PullRequestState,
    pub title: String,
    pub additions: u64,
    pub deletions: u64,
    pub author_id: u64,
    pub merged_by_id: Option<u64>,
    pub team_id: Option<u64>,
    pub deploy_id: Option<u64>,
    pub labels: Vec<String>,
    #[default(OffsetDateTime::UNIX_EPOCH)]
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[default(OffsetDateTime::UNIX_EPOCH)]
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub closed_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub merged_at: Option<OffsetDateTime>,
}

impl PullRequest {
    pub fn with_repository(mut self, repository: &Repository) -> Self {
        self.repository_id = repository.id;
        self
    }

    pub fn net_additions(&self) -> i64 {
        self.additions as i64 - self.deletions as i64
    }
}
