use serde::{Deserialize, Serialize};

/// GitHub core rate limit status.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct GhRateLimit {
    /// Maximum request quota.
    pub limit: u64,
    /// Remaining request quota.
    pub remaining: u64,
}
