use serde::{Deserialize, Serialize};

/// GitHub Team.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhTeam {
    /// Upstream numeric ID.
    pub id: u64,
    /// Name.
    pub name: String,
    /// URL slug.
    pub slug: String,
}
