use async_trait::async_trait;

use crate::{
    types::{GhHookConfig, GhRateLimit, GhTeam, GhUser},
    Result,
};

/// Outbound GitHub API surface consumed by the core.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ApiService: Send + Sync {
    /// Identity check for the resolved credential.
    async fn authenticated_user(&self) -> Result<GhUser>;
    /// List organization teams (paginated internally).
    async fn org_teams_list(&self, org: &str) -> Result<Vec<GhTeam>>;
    /// List team members (paginated internally).
    async fn team_members_list(&self, org: &str, team_slug: &str) -> Result<Vec<GhUser>>;
    /// List label names for an issue or pull request.
    async fn issue_labels_list(
        &self,
        owner: &str,
        name: &str,
        issue_number: u64,
    ) -> Result<Vec<String>>;
    /// Current core rate limit status.
    async fn rate_limit_get(&self) -> Result<GhRateLimit>;
    /// Create a repository-scoped webhook. An already-registered hook is
    /// success.
    async fn repo_hooks_create(&self, owner: &str, name: &str, hook: &GhHookConfig) -> Result<()>;
    /// Create an organization-scoped webhook. An already-registered hook is
    /// success.
    async fn org_hooks_create(&self, org: &str, hook: &GhHookConfig) -> Result<()>;
}
