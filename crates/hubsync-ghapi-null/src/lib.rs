//! Null driver for GH API.

#![warn(missing_docs)]
#![warn(clippy::all)]

use async_trait::async_trait;
use hubsync_ghapi_interface::{
    types::{GhHookConfig, GhRateLimit, GhTeam, GhUser},
    ApiService, Result,
};

/// Null API service.
#[derive(Clone, Default)]
pub struct NullApiService {
    _private: (),
}

impl NullApiService {
    /// Build a null API service.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl ApiService for NullApiService {
    #[tracing::instrument(skip(self), ret)]
    async fn authenticated_user(&self) -> Result<GhUser> {
        Ok(GhUser {
            id: 0,
            login: "null".into(),
        })
    }

    #[tracing::instrument(skip(self), ret)]
    async fn org_teams_list(&self, org: &str) -> Result<Vec<GhTeam>> {
        Ok(vec![])
    }

    #[tracing::instrument(skip(self), ret)]
    async fn team_members_list(&self, org: &str, team_slug: &str) -> Result<Vec<GhUser>> {
        Ok(vec![])
    }

    #[tracing::instrument(skip(self), ret)]
    async fn issue_labels_list(
        &self,
        owner: &str,
        name: &str,
        _issue_number: u64,
    ) -> Result<Vec<String>> {
        Ok(vec![])
    }

    #[tracing::instrument(skip(self), ret)]
    async fn rate_limit_get(&self) -> Result<GhRateLimit> {
        Ok(GhRateLimit {
            limit: 5000,
            remaining: 5000,
        })
    }

    #[tracing::instrument(skip(self, _hook))]
    async fn repo_hooks_create(
        &self,
        owner: &str,
        name: &str,
        _hook: &GhHookConfig,
    ) -> Result<()> {
        Ok(())
    }

    #[tracing::instrument(skip(self, _hook))]
    async fn org_hooks_create(&self, org: &str, _hook: &GhHookConfig) -> Result<()> {
        Ok(())
    }
}
