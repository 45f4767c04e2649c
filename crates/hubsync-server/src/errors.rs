//! Server errors.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use hubsync_core::DomainError;
use thiserror::Error;

use crate::event_type::EventType;

/// Server error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Error while parsing webhook event for type {event_type},\n  caused by: {source}")]
    EventParseError {
        event_type: EventType,
        source: serde_json::Error,
    },

    #[error("Missing webhook signature.")]
    MissingWebhookSignature,

    #[error("Invalid webhook signature.")]
    InvalidWebhookSignature,

    #[error("I/O error,\n  caused by: {source}")]
    IoError { source: std::io::Error },

    #[error("Domain error,\n  caused by: {source}")]
    DomainError { source: DomainError },
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            // Bad signatures are rejected before any processing.
            ServerError::MissingWebhookSignature | ServerError::InvalidWebhookSignature => {
                StatusCode::UNAUTHORIZED
            }
            ServerError::EventParseError { .. } => StatusCode::BAD_REQUEST,
            ServerError::DomainError {
                source: DomainError::Validation { .. },
            } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

/// Result alias for `ServerError`.
pub type Result<T> = core::result::Result<T, ServerError>;
