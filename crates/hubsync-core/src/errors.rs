//! Logic errors.

use thiserror::Error;

/// Logic error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum DomainError {
    /// Wraps [`hubsync_ghapi_interface::ApiError`].
    #[error("API error: {source}")]
    ApiError {
        source: hubsync_ghapi_interface::ApiError,
    },

    /// Wraps [`hubsync_database_interface::DatabaseError`].
    #[error("Database error: {source}")]
    DatabaseError {
        source: hubsync_database_interface::DatabaseError,
    },

    #[error("Lock service error: {source}")]
    LockError {
        source: hubsync_lock_interface::LockError,
    },

    /// Rejected inbound payload.
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl From<hubsync_ghapi_interface::ApiError> for DomainError {
    fn from(e: hubsync_ghapi_interface::ApiError) -> Self {
        Self::ApiError { source: e }
    }
}

impl From<hubsync_database_interface::DatabaseError> for DomainError {
    fn from(e: hubsync_database_interface::DatabaseError) -> Self {
        Self::DatabaseError { source: e }
    }
}

impl From<hubsync_lock_interface::LockError> for DomainError {
    fn from(e: hubsync_lock_interface::LockError) -> Self {
        Self::LockError { source: e }
    }
}

/// Result alias for `DomainError`.
pub type Result<T> = core::result::Result<T, DomainError>;
