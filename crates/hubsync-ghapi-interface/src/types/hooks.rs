use serde::{Deserialize, Serialize};

/// Webhook endpoint settings.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhHookSettings {
    /// Callback URL.
    pub url: String,
    /// Payload content type.
    pub content_type: String,
    /// Shared secret used for payload signatures.
    pub secret: String,
}

/// Webhook registration request.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhHookConfig {
    /// Hook name, `web` for webhooks.
    pub name: String,
    /// Active flag.
    pub active: bool,
    /// Subscribed event types.
    pub events: Vec<String>,
    /// Endpoint settings.
    pub config: GhHookSettings,
}

impl GhHookConfig {
    /// Webhook subscribed to the event types this system tracks.
    pub fn for_tracked_events(url: &str, secret: &str) -> Self {
        Self {
            name: "web".into(),
            active: true,
            events: vec!["pull_request".into(), "issue_comment".into()],
            config: GhHookSettings {
                url: url.into(),
                content_type: "json".into(),
                secret: secret.into(),
            },
        }
    }
}
