use serde::{Deserialize, Serialize};

/// Mirrored GitHub team.
///
/// Teams are tombstoned through the `active` flag, never deleted, so
/// historical pull request and deploy references stay valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub active: bool,
}
