use thiserror::Error;

/// API error.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid or missing credential; fatal, never retried.
    #[error("Authentication error: {message}")]
    Authentication { message: String },

    /// Timeout or upstream server error; retried with bounded backoff
    /// before surfacing.
    #[error("Transient API error: {message}")]
    Transient { message: String },

    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl ApiError {
    /// Whether the error should abort a whole sync cycle instead of a
    /// single unit of work.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}

/// Result alias for `ApiError`.
pub type Result<T, E = ApiError> = core::result::Result<T, E>;
