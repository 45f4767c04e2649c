use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PullRequestStateError {
    /// Unknown pull request state.
    #[error("Unknown pull request state: {}", state)]
    UnknownState { state: String },
}

/// Pull request state.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Copy, Clone, Default)]
#[serde(rename_all = "snake_case")]
pub enum PullRequestState {
    /// Open.
    #[default]
    Open,
    /// Closed without merging.
    Closed,
    /// Merged.
    Merged,
}

impl PullRequestState {
    /// Convert state to static str.
    pub fn to_str(self) -> &'static str {
        self.into()
    }
}

impl Display for PullRequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

impl From<PullRequestState> for &'static str {
    fn from(state: PullRequestState) -> Self {
        match state {
            PullRequestState::Open => "open",
            PullRequestState::Closed => "closed",
            PullRequestState::Merged => "merged",
        }
    }
}

impl TryFrom<&str> for PullRequestState {
    type Error = PullRequestStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "merged" => Ok(Self::Merged),
            state => Err(PullRequestStateError::UnknownState {
                state: state.into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PullRequestState;

    #[test]
    fn state_as_str() {
        assert_eq!(PullRequestState::Open.to_str(), "open");
        assert_eq!(PullRequestState::Merged.to_str(), "merged");
        assert!(PullRequestState::try_from("reopened").is_err());
    }
}
