use serde::{Deserialize, Serialize};

use crate::RepositoryPath;

/// Mirrored GitHub repository, keyed by its upstream numeric ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Repository {
    pub id: u64,
    pub owner: String,
    pub name: String,
}

impl Repository {
    pub fn path(&self) -> RepositoryPath {
        RepositoryPath::new_from_components(&self.owner, &self.name)
    }

    pub fn full_name(&self) -> String {
        self.path().full_name()
    }
}
