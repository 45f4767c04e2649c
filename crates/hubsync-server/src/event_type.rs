//! Event types.

use std::convert::TryFrom;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventTypeError {
    /// Unsupported event.
    #[error("Unsupported event: {}", event)]
    UnsupportedEvent { event: String },
}

/// Event type.
#[derive(Debug, Clone, Copy)]
pub enum EventType {
    /// Issue comment event.
    IssueComment,
    /// Ping event.
    Ping,
    /// Pull request event.
    PullRequest,
}

impl EventType {
    /// Convert event type to static str.
    pub fn to_str(self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

impl TryFrom<&str> for EventType {
    type Error = EventTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "issue_comment" => Ok(Self::IssueComment),
            "ping" => Ok(Self::Ping),
            "pull_request" => Ok(Self::PullRequest),
            name => Err(EventTypeError::UnsupportedEvent {
                event: name.to_owned(),
            }),
        }
    }
}

impl From<EventType> for &'static str {
    fn from(event_type: EventType) -> Self {
        match event_type {
            EventType::IssueComment => "issue_comment",
            EventType::Ping => "ping",
            EventType::PullRequest => "pull_request",
        }
    }
}
