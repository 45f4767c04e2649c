use hubsync_ghapi_interface::ApiError;
use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum GitHubError {
    #[error(transparent)]
    HttpError { source: reqwest::Error },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Unexpected HTTP status: {status}")]
    StatusError { status: StatusCode },

    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl From<reqwest::Error> for GitHubError {
    fn from(e: reqwest::Error) -> Self {
        GitHubError::HttpError { source: e }
    }
}

impl From<GitHubError> for ApiError {
    fn from(e: GitHubError) -> Self {
        match e {
            GitHubError::Unauthorized { message } => ApiError::Authentication { message },
            GitHubError::HttpError { source } if source.is_timeout() || source.is_connect() => {
                ApiError::Transient {
                    message: source.to_string(),
                }
            }
            GitHubError::StatusError { status } if status.is_server_error() => {
                ApiError::Transient {
                    message: format!("server error: {status}"),
                }
            }
            e => ApiError::ImplementationError { source: e.into() },
        }
    }
}
