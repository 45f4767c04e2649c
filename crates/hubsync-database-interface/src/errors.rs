use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Unknown user ID '{0}'")]
    UnknownUserId(u64),

    #[error("Unknown team ID '{0}'")]
    UnknownTeamId(u64),

    #[error("Unknown repository ID '{0}'")]
    UnknownRepositoryId(u64),

    #[error("Unknown repository '{0}'")]
    UnknownRepository(String),

    #[error("Unknown pull request ID '{0}'")]
    UnknownPullRequestId(u64),

    #[error("Unknown pull request '#{1}' for repository ID '{0}'")]
    UnknownPullRequest(u64, u64),

    #[error("Unknown comment ID '{0}'")]
    UnknownCommentId(u64),

    #[error("Unknown deploy ID '{0}'")]
    UnknownDeployId(u64),

    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

pub type Result<T, E = DatabaseError> = core::result::Result<T, E>;
