use async_trait::async_trait;
use hubsync_ghapi_interface::types::{GhPullRequest, GhPullRequestState, GhRepository};
use hubsync_models::{PullRequest, PullRequestState};
use shaku::{Component, HasComponent, Interface};
use tracing::{info, warn};

use super::{UpsertRepositoryInterface, UpsertUserInterface};
use crate::{CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait UpsertPullRequestInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        gh_repository: &GhRepository,
        gh_pull_request: &GhPullRequest,
    ) -> Result<Option<PullRequest>>;
}

#[derive(Component)]
#[shaku(interface = UpsertPullRequestInterface)]
pub(crate) struct UpsertPullRequest;

fn state_of(gh_pull_request: &GhPullRequest) -> PullRequestState {
    if gh_pull_request.merged == Some(true) || gh_pull_request.merged_at.is_some() {
        PullRequestState::Merged
    } else {
        match gh_pull_request.state {
            GhPullRequestState::Open => PullRequestState::Open,
            GhPullRequestState::Closed => PullRequestState::Closed,
        }
    }
}

#[async_trait]
impl UpsertPullRequestInterface for UpsertPullRequest {
    #[tracing::instrument(skip_all, fields(
        pr_id = gh_pull_request.id,
        pr_number = gh_pull_request.number,
        repository_path = %gh_repository.full_name
    ))]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        gh_repository: &GhRepository,
        gh_pull_request: &GhPullRequest,
    ) -> Result<Option<PullRequest>> {
        if gh_pull_request.id == 0 || gh_pull_request.number == 0 {
            warn!(
                pr_id = gh_pull_request.id,
                pr_number = gh_pull_request.number,
                message = "Rejecting pull request payload, keeping prior state"
            );
            return Ok(ctx.db_service.pull_requests_get(gh_pull_request.id).await?);
        }

        let upsert_repository: &dyn UpsertRepositoryInterface = ctx.core_module.resolve_ref();
        let repository = match upsert_repository.run(ctx, gh_repository).await? {
            Some(repository) => repository,
            None => {
                warn!(
                    pr_id = gh_pull_request.id,
                    message = "Pull request payload carries no usable repository, skipping"
                );
                return Ok(ctx.db_service.pull_requests_get(gh_pull_request.id).await?);
            }
        };

        let upsert_user: &dyn UpsertUserInterface = ctx.core_module.resolve_ref();
        let author = match upsert_user.run(ctx, &gh_pull_request.user).await? {
            Some(author) => author,
            None => {
                warn!(
                    pr_id = gh_pull_request.id,
                    message = "Pull request payload carries no usable author, skipping"
                );
                return Ok(ctx.db_service.pull_requests_get(gh_pull_request.id).await?);
            }
        };

        let merged_by_id = match &gh_pull_request.merged_by {
            Some(gh_user) => upsert_user.run(ctx, gh_user).await?.map(|u| u.id),
            None => None,
        };

        match ctx.db_service.pull_requests_get(gh_pull_request.id).await? {
            Some(existing) if existing.updated_at > gh_pull_request.updated_at => {
                // A stale retry of an already superseded delivery.
                info!(
                    pr_id = existing.id,
                    message = "Ignoring out-of-date pull request payload"
                );
                Ok(Some(existing))
            }
            Some(existing) => Ok(Some(
                ctx.db_service
                    .pull_requests_update(PullRequest {
                        repository_id: repository.id,
                        number: gh_pull_request.number,
                        state: state_of(gh_pull_request),
                        title: gh_pull_request.title.clone(),
                        additions: gh_pull_request.additions,
                        deletions: gh_pull_request.deletions,
                        author_id: author.id,
                        merged_by_id: merged_by_id.or(existing.merged_by_id),
                        updated_at: gh_pull_request.updated_at,
                        closed_at: gh_pull_request.closed_at,
                        merged_at: gh_pull_request.merged_at,
                        ..existing
                    })
                    .await?,
            )),
            None => Ok(Some(
                ctx.db_service
                    .pull_requests_create(PullRequest {
                        id: gh_pull_request.id,
                        repository_id: repository.id,
                        number: gh_pull_request.number,
                        state: state_of(gh_pull_request),
                        title: gh_pull_request.title.clone(),
                        additions: gh_pull_request.additions,
                        deletions: gh_pull_request.deletions,
                        author_id: author.id,
                        merged_by_id,
                        team_id: None,
                        deploy_id: None,
                        labels: gh_pull_request
                            .labels
                            .iter()
                            .map(|l| l.name.clone())
                            .collect(),
                        created_at: gh_pull_request.created_at,
                        updated_at: gh_pull_request.updated_at,
                        closed_at: gh_pull_request.closed_at,
                        merged_at: gh_pull_request.merged_at,
                    })
                    .await?,
            )),
        }
    }
}
