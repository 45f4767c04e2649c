use serde::{Deserialize, Serialize};

/// Outcome of a full sync cycle.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Copy, Clone, Default)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// Cycle ran to completion, tombstoning included.
    #[default]
    Completed,
    /// Remaining rate limit quota was below the safety threshold, nothing
    /// was touched.
    Deferred,
    /// A previous cycle was still holding the run lock.
    AlreadyRunning,
}

/// Report produced by a full sync cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncReport {
    pub status: SyncStatus,
    pub teams_synced: u64,
    pub teams_failed: u64,
    pub users_synced: u64,
    pub teams_tombstoned: u64,
    pub rate_limit_remaining: u64,
}

impl SyncReport {
    pub fn deferred(remaining: u64) -> Self {
        Self {
            status: SyncStatus::Deferred,
            rate_limit_remaining: remaining,
            ..Default::default()
        }
    }

    pub fn already_running() -> Self {
        Self {
            status: SyncStatus::AlreadyRunning,
            ..Default::default()
        }
    }
}
