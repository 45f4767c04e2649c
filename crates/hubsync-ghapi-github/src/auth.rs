//! Auth.

use std::{env, time::Duration};

use http::{header, HeaderMap};
use hubsync_config::Config;
use reqwest::ClientBuilder;

use crate::errors::GitHubError;

const ENV_TOKEN: &str = "GITHUB_API_TOKEN";

/// Resolved GitHub credential.
///
/// Resolution precedence: explicit token, then the `GITHUB_API_TOKEN`
/// environment variable, then a client-id/client-secret pair. A missing
/// credential is only fatal at first use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Personal access token.
    Token(String),
    /// OAuth application credentials.
    App {
        client_id: String,
        client_secret: String,
    },
    /// No credential could be resolved.
    Missing,
}

impl Credentials {
    /// Resolve a credential from the configuration.
    pub fn resolve(config: &Config) -> Self {
        Self::resolve_with(None, config)
    }

    /// Resolve a credential, preferring an explicitly passed token.
    pub fn resolve_with(explicit_token: Option<&str>, config: &Config) -> Self {
        if let Some(token) = explicit_token.filter(|t| !t.is_empty()) {
            return Self::Token(token.into());
        }

        if !config.api.github.token.is_empty() {
            return Self::Token(config.api.github.token.clone());
        }

        if let Ok(token) = env::var(ENV_TOKEN) {
            if !token.is_empty() {
                return Self::Token(token);
            }
        }

        let github = &config.api.github;
        if !github.client_id.is_empty() && !github.client_secret.is_empty() {
            return Self::App {
                client_id: github.client_id.clone(),
                client_secret: github.client_secret.clone(),
            };
        }

        Self::Missing
    }
}

/// Get an anonymous GitHub client builder.
pub fn get_anonymous_client_builder(config: &Config) -> Result<ClientBuilder, GitHubError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/vnd.github+json"),
    );

    Ok(ClientBuilder::new()
        .connect_timeout(Duration::from_millis(config.api.github.connect_timeout))
        .user_agent(format!("hubsync/{}", config.version))
        .default_headers(headers))
}

/// Build a GitHub URL.
pub fn build_github_url<T: Into<String>>(config: &Config, path: T) -> String {
    format!("{}{}", config.api.github.root_url, path.into())
}

#[cfg(test)]
mod tests {
    use hubsync_config::Config;

    use super::Credentials;

    #[test]
    fn explicit_token_wins_over_configuration() {
        let mut config = Config::from_env_no_version();
        config.api.github.token = "configured".into();

        assert_eq!(
            Credentials::resolve_with(Some("explicit"), &config),
            Credentials::Token("explicit".into())
        );
    }

    #[test]
    fn client_pair_is_the_last_resort() {
        let mut config = Config::from_env_no_version();
        config.api.github.token = String::new();
        config.api.github.client_id = "id".into();
        config.api.github.client_secret = "secret".into();

        // Only relevant when the environment token is unset.
        if std::env::var(super::ENV_TOKEN).is_err() {
            assert_eq!(
                Credentials::resolve(&config),
                Credentials::App {
                    client_id: "id".into(),
                    client_secret: "secret".into(),
                }
            );
        }
    }

    #[test]
    fn no_credentials_resolve_to_missing() {
        let mut config = Config::from_env_no_version();
        config.api.github.token = String::new();
        config.api.github.client_id = String::new();
        config.api.github.client_secret = String::new();

        if std::env::var(super::ENV_TOKEN).is_err() {
            assert_eq!(Credentials::resolve(&config), Credentials::Missing);
        }
    }
}
