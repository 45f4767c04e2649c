use serde::{Deserialize, Serialize};

use super::common::GhRepository;

/// GitHub Ping event.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhPingEvent {
    /// Zen message.
    #[serde(default)]
    pub zen: String,
    /// Repository.
    #[serde(default)]
    pub repository: Option<GhRepository>,
}
