//! GitHub API adapter.

use std::time::Duration;

use async_trait::async_trait;
use backoff::ExponentialBackoff;
use hubsync_config::Config;
use hubsync_ghapi_interface::{
    types::{GhHookConfig, GhRateLimit, GhTeam, GhUser},
    ApiError, ApiService, Result,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use tokio::sync::OnceCell;
use tracing::info;

use crate::{
    auth::{build_github_url, get_anonymous_client_builder, Credentials},
    errors::GitHubError,
};

const PAGE_SIZE: usize = 100;
const RETRY_MAX_ELAPSED: Duration = Duration::from_secs(30);

/// GitHub API adapter implementation.
pub struct GithubApiService {
    config: Config,
    credentials: Credentials,
    client: Client,
    identity: OnceCell<GhUser>,
}

impl GithubApiService {
    /// Creates a new GitHub API adapter. The credential is resolved now and
    /// validated with an identity check at first use.
    pub fn new(config: Config) -> Self {
        let credentials = Credentials::resolve(&config);
        Self::with_credentials(config, credentials)
    }

    /// Creates a new GitHub API adapter with pre-resolved credentials.
    pub fn with_credentials(config: Config, credentials: Credentials) -> Self {
        let client = get_anonymous_client_builder(&config)
            .and_then(|builder| builder.build().map_err(GitHubError::from))
            .unwrap_or_default();

        Self {
            config,
            credentials,
            client,
            identity: OnceCell::new(),
        }
    }

    fn build_url(&self, path: String) -> String {
        build_github_url(&self.config, path)
    }

    fn apply_credentials(&self, request: RequestBuilder) -> Result<RequestBuilder, GitHubError> {
        match &self.credentials {
            Credentials::Token(token) => Ok(request.bearer_auth(token)),
            Credentials::App {
                client_id,
                client_secret,
            } => Ok(request.basic_auth(client_id, Some(client_secret))),
            Credentials::Missing => Err(GitHubError::Unauthorized {
                message: "no credential resolved: set a token or a client-id/client-secret pair"
                    .into(),
            }),
        }
    }

    fn get(&self, path: String) -> Result<RequestBuilder, GitHubError> {
        self.apply_credentials(self.client.get(self.build_url(path)))
    }

    fn post(&self, path: String) -> Result<RequestBuilder, GitHubError> {
        self.apply_credentials(self.client.post(self.build_url(path)))
    }

    /// Sends a request, retrying transient failures (timeouts and server
    /// errors) with bounded exponential backoff. Client errors are never
    /// retried.
    async fn send_with_retry(&self, request: RequestBuilder) -> Result<Response, GitHubError> {
        let policy = ExponentialBackoff {
            max_elapsed_time: Some(RETRY_MAX_ELAPSED),
            ..Default::default()
        };

        backoff::future::retry(policy, || async {
            let request = request
                .try_clone()
                .ok_or_else(|| {
                    backoff::Error::permanent(GitHubError::ImplementationError {
                        source: "request body is not replayable".into(),
                    })
                })?;

            let response = request.send().await.map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    backoff::Error::transient(GitHubError::from(e))
                } else {
                    backoff::Error::permanent(GitHubError::from(e))
                }
            })?;

            let status = response.status();
            if status.is_server_error() {
                Err(backoff::Error::transient(GitHubError::StatusError {
                    status,
                }))
            } else {
                Ok(response)
            }
        })
        .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: String,
        query: &[(&str, String)],
    ) -> Result<T, GitHubError> {
        let response = self.send_with_retry(self.get(path)?.query(query)).await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GitHubError::Unauthorized {
                message: format!("credential rejected with status {}", response.status()),
            }),
            status if !status.is_success() => Err(GitHubError::StatusError { status }),
            _ => Ok(response.json::<T>().await?),
        }
    }

    async fn get_paginated<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Vec<T>, GitHubError> {
        let mut items = Vec::new();

        for page in 1u64.. {
            let chunk: Vec<T> = self
                .get_json(
                    path.to_string(),
                    &[
                        ("per_page", PAGE_SIZE.to_string()),
                        ("page", page.to_string()),
                    ],
                )
                .await?;

            let last_page = chunk.len() < PAGE_SIZE;
            items.extend(chunk);
            if last_page {
                break;
            }
        }

        Ok(items)
    }

    /// Validates the resolved credential once with a lightweight identity
    /// check. An invalid credential surfaces as a fatal authentication
    /// error on every subsequent call.
    async fn ensure_authenticated(&self) -> Result<&GhUser, GitHubError> {
        self.identity
            .get_or_try_init(|| async {
                if self.credentials == Credentials::Missing {
                    return Err(GitHubError::Unauthorized {
                        message:
                            "no credential resolved: set a token or a client-id/client-secret pair"
                                .into(),
                    });
                }

                let user: GhUser = self.get_json("/user".into(), &[]).await?;
                info!(login = %user.login, message = "GitHub credential validated");
                Ok(user)
            })
            .await
    }

    async fn hooks_create(&self, path: String, hook: &GhHookConfig) -> Result<(), GitHubError> {
        let response = self.send_with_retry(self.post(path)?.json(hook)).await?;
        Self::hook_creation_status(response.status(), hook)
    }

    fn hook_creation_status(status: StatusCode, hook: &GhHookConfig) -> Result<(), GitHubError> {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GitHubError::Unauthorized {
                message: format!("credential rejected with status {status}"),
            }),
            // The hook already exists: the desired end state is satisfied.
            StatusCode::UNPROCESSABLE_ENTITY => {
                info!(url = %hook.config.url, message = "Hook already registered");
                Ok(())
            }
            status if !status.is_success() => Err(GitHubError::StatusError { status }),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ApiService for GithubApiService {
    #[tracing::instrument(skip(self), ret)]
    async fn authenticated_user(&self) -> Result<GhUser> {
        Ok(self
            .ensure_authenticated()
            .await
            .map_err(ApiError::from)?
            .clone())
    }

    #[tracing::instrument(skip(self))]
    async fn org_teams_list(&self, org: &str) -> Result<Vec<GhTeam>> {
        self.ensure_authenticated().await.map_err(ApiError::from)?;
        Ok(self
            .get_paginated(&format!("/orgs/{org}/teams"))
            .await
            .map_err(ApiError::from)?)
    }

    #[tracing::instrument(skip(self))]
    async fn team_members_list(&self, org: &str, team_slug: &str) -> Result<Vec<GhUser>> {
        self.ensure_authenticated().await.map_err(ApiError::from)?;
        Ok(self
            .get_paginated(&format!("/orgs/{org}/teams/{team_slug}/members"))
            .await
            .map_err(ApiError::from)?)
    }

    #[tracing::instrument(skip(self), ret)]
    async fn issue_labels_list(
        &self,
        owner: &str,
        name: &str,
        issue_number: u64,
    ) -> Result<Vec<String>> {
        #[derive(Deserialize)]
        struct Label {
            name: String,
        }

        self.ensure_authenticated().await.map_err(ApiError::from)?;
        let labels: Vec<Label> = self
            .get_paginated(&format!(
                "/repos/{owner}/{name}/issues/{issue_number}/labels"
            ))
            .await
            .map_err(ApiError::from)?;

        Ok(labels.into_iter().map(|x| x.name).collect())
    }

    #[tracing::instrument(skip(self), ret)]
    async fn rate_limit_get(&self) -> Result<GhRateLimit> {
        #[derive(Deserialize)]
        struct Resources {
            core: GhRateLimit,
        }

        #[derive(Deserialize)]
        struct RateLimitResponse {
            resources: Resources,
        }

        self.ensure_authenticated().await.map_err(ApiError::from)?;
        let response: RateLimitResponse = self
            .get_json("/rate_limit".into(), &[])
            .await
            .map_err(ApiError::from)?;

        Ok(response.resources.core)
    }

    #[tracing::instrument(skip(self, hook))]
    async fn repo_hooks_create(&self, owner: &str, name: &str, hook: &GhHookConfig) -> Result<()> {
        self.ensure_authenticated().await.map_err(ApiError::from)?;
        Ok(self
            .hooks_create(format!("/repos/{owner}/{name}/hooks"), hook)
            .await
            .map_err(ApiError::from)?)
    }

    #[tracing::instrument(skip(self, hook))]
    async fn org_hooks_create(&self, org: &str, hook: &GhHookConfig) -> Result<()> {
        self.ensure_authenticated().await.map_err(ApiError::from)?;
        Ok(self
            .hooks_create(format!("/orgs/{org}/hooks"), hook)
            .await
            .map_err(ApiError::from)?)
    }
}

#[cfg(test)]
mod tests {
    use hubsync_ghapi_interface::types::GhHookConfig;
    use reqwest::StatusCode;

    use super::GithubApiService;
    use crate::GitHubError;

    fn hook() -> GhHookConfig {
        GhHookConfig::for_tracked_events("https://hubsync.example.com/webhook", "secret")
    }

    #[test]
    fn hook_creation_succeeds() {
        assert!(GithubApiService::hook_creation_status(StatusCode::CREATED, &hook()).is_ok());
    }

    #[test]
    fn already_registered_hook_is_success() {
        assert!(
            GithubApiService::hook_creation_status(StatusCode::UNPROCESSABLE_ENTITY, &hook())
                .is_ok()
        );
    }

    #[test]
    fn rejected_credential_is_an_authentication_error() {
        assert!(matches!(
            GithubApiService::hook_creation_status(StatusCode::UNAUTHORIZED, &hook()),
            Err(GitHubError::Unauthorized { .. })
        ));
        assert!(matches!(
            GithubApiService::hook_creation_status(StatusCode::FORBIDDEN, &hook()),
            Err(GitHubError::Unauthorized { .. })
        ));
    }

    #[test]
    fn other_client_errors_are_status_errors() {
        assert!(matches!(
            GithubApiService::hook_creation_status(StatusCode::NOT_FOUND, &hook()),
            Err(GitHubError::StatusError { status }) if status == StatusCode::NOT_FOUND
        ));
    }
}
