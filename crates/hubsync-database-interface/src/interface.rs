use async_trait::async_trait;
use hubsync_models::{Comment, Deploy, PullRequest, Repository, Team, User};

use crate::{DatabaseError, Result};

/// Persistence boundary for mirrored entities.
///
/// The ingestion path only ever creates or merges rows; teams are tombstoned
/// through `teams_tombstone_not_in`, nothing is deleted.
#[async_trait]
pub trait DbService: Send + Sync {
    async fn users_create(&self, instance: User) -> Result<User>;
    async fn users_update(&self, instance: User) -> Result<User>;
    async fn users_get(&self, id: u64) -> Result<Option<User>>;
    async fn users_get_expect(&self, id: u64) -> Result<User> {
        self.users_get(id)
            .await?
            .ok_or(DatabaseError::UnknownUserId(id))
    }
    async fn users_get_by_login(&self, login: &str) -> Result<Option<User>>;
    async fn users_all(&self) -> Result<Vec<User>>;

    async fn teams_create(&self, instance: Team) -> Result<Team>;
    async fn teams_update(&self, instance: Team) -> Result<Team>;
    async fn teams_get(&self, id: u64) -> Result<Option<Team>>;
    async fn teams_get_expect(&self, id: u64) -> Result<Team> {
        self.teams_get(id)
            .await?
            .ok_or(DatabaseError::UnknownTeamId(id))
    }
    async fn teams_all(&self) -> Result<Vec<Team>>;
    async fn teams_list_active(&self) -> Result<Vec<Team>>;
    /// Clears the active flag on every active team whose ID is not in
    /// `observed_ids`, and returns the tombstoned teams.
    async fn teams_tombstone_not_in(&self, observed_ids: &[u64]) -> Result<Vec<Team>>;

    /// Replaces a team's full membership edge set with `user_ids`.
    async fn memberships_replace(&self, team_id: u64, user_ids: &[u64]) -> Result<()>;
    async fn memberships_list(&self, team_id: u64) -> Result<Vec<u64>>;

    async fn repositories_create(&self, instance: Repository) -> Result<Repository>;
    async fn repositories_update(&self, instance: Repository) -> Result<Repository>;
    async fn repositories_get(&self, id: u64) -> Result<Option<Repository>>;
    async fn repositories_get_expect(&self, id: u64) -> Result<Repository> {
        self.repositories_get(id)
            .await?
            .ok_or(DatabaseError::UnknownRepositoryId(id))
    }
    async fn repositories_get_by_path(&self, owner: &str, name: &str)
        -> Result<Option<Repository>>;
    async fn repositories_all(&self) -> Result<Vec<Repository>>;

    async fn pull_requests_create(&self, instance: PullRequest) -> Result<PullRequest>;
    async fn pull_requests_update(&self, instance: PullRequest) -> Result<PullRequest>;
    async fn pull_requests_get(&self, id: u64) -> Result<Option<PullRequest>>;
    async fn pull_requests_get_expect(&self, id: u64) -> Result<PullRequest> {
        self.pull_requests_get(id)
            .await?
            .ok_or(DatabaseError::UnknownPullRequestId(id))
    }
    async fn pull_requests_get_by_number(
        &self,
        repository_id: u64,
        number: u64,
    ) -> Result<Option<PullRequest>>;
    async fn pull_requests_list_for_repository(
        &self,
        repository_id: u64,
    ) -> Result<Vec<PullRequest>>;
    async fn pull_requests_list_for_deploy(&self, deploy_id: u64) -> Result<Vec<PullRequest>>;
    async fn pull_requests_all(&self) -> Result<Vec<PullRequest>>;
    /// Replaces the attached label set.
    async fn pull_requests_set_labels(&self, id: u64, labels: &[String]) -> Result<PullRequest>;
    async fn pull_requests_attach_deploy(&self, id: u64, deploy_id: u64) -> Result<PullRequest>;

    async fn comments_create(&self, instance: Comment) -> Result<Comment>;
    async fn comments_update(&self, instance: Comment) -> Result<Comment>;
    async fn comments_get(&self, id: u64) -> Result<Option<Comment>>;
    async fn comments_get_expect(&self, id: u64) -> Result<Comment> {
        self.comments_get(id)
            .await?
            .ok_or(DatabaseError::UnknownCommentId(id))
    }
    async fn comments_list_for_pull_request(&self, pull_request_id: u64) -> Result<Vec<Comment>>;

    /// Creates a deploy; an instance with a zero ID is assigned the next
    /// local ID.
    async fn deploys_create(&self, instance: Deploy) -> Result<Deploy>;
    async fn deploys_update(&self, instance: Deploy) -> Result<Deploy>;
    async fn deploys_get(&self, id: u64) -> Result<Option<Deploy>>;
    async fn deploys_get_expect(&self, id: u64) -> Result<Deploy> {
        self.deploys_get(id)
            .await?
            .ok_or(DatabaseError::UnknownDeployId(id))
    }
    async fn deploys_get_by_revision(
        &self,
        repository_id: u64,
        git_revision: &str,
    ) -> Result<Option<Deploy>>;
    async fn deploys_all(&self) -> Result<Vec<Deploy>>;

    async fn health_check(&self) -> Result<()>;
}
