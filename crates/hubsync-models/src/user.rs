use serde::{Deserialize, Serialize};

/// Mirrored GitHub user, keyed by its upstream numeric ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub login: String,
}
