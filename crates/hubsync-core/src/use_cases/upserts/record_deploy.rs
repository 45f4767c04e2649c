use async_trait::async_trait;
use hubsync_models::{Deploy, RepositoryPath};
use serde::Deserialize;
use shaku::{Component, Interface};
use time::OffsetDateTime;
use tracing::warn;

use crate::{CoreContext, DomainError, Result};

/// Inbound deploy notification.
#[derive(Debug, Clone, Deserialize)]
pub struct DeployPayload {
    pub git_revision: String,
    /// Repository path in `owner/name` form.
    pub repository: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub deployed_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub pull_request_numbers: Vec<u64>,
}

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait RecordDeployInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, payload: &DeployPayload) -> Result<Deploy>;
}

#[derive(Component)]
#[shaku(interface = RecordDeployInterface)]
pub(crate) struct RecordDeploy;

#[async_trait]
impl RecordDeployInterface for RecordDeploy {
    #[tracing::instrument(skip(self, ctx), fields(
        git_revision = %payload.git_revision,
        repository = %payload.repository
    ))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, payload: &DeployPayload) -> Result<Deploy> {
        if payload.git_revision.is_empty() {
            return Err(DomainError::Validation {
                message: "missing git revision".into(),
            });
        }

        let path: RepositoryPath =
            payload
                .repository
                .parse()
                .map_err(|_| DomainError::Validation {
                    message: format!("invalid repository path: {}", payload.repository),
                })?;

        let repository = ctx
            .db_service
            .repositories_get_by_path(path.owner(), path.name())
            .await?
            .ok_or_else(|| DomainError::Validation {
                message: format!("unknown repository: {path}"),
            })?;

        if payload.pull_request_numbers.is_empty() {
            return Err(DomainError::Validation {
                message: "a deploy must reference at least one pull request".into(),
            });
        }

        let mut linked = Vec::new();
        for number in &payload.pull_request_numbers {
            match ctx
                .db_service
                .pull_requests_get_by_number(repository.id, *number)
                .await?
            {
                Some(pull_request) => linked.push(pull_request),
                None => {
                    warn!(
                        pr_number = number,
                        message = "Deploy references an unmirrored pull request, skipping link"
                    );
                }
            }
        }

        // The deploy user is the merger of the earliest-created linked pull
        // request. A deploy without a merged pull request has no user to
        // attribute, so nothing is stored.
        linked.sort_by_key(|pr| pr.created_at);
        let user_id = linked
            .iter()
            .find_map(|pr| pr.merged_by_id)
            .ok_or_else(|| DomainError::Validation {
                message: "no linked pull request has been merged".into(),
            })?;

        let deployed_at = payload.deployed_at.unwrap_or_else(OffsetDateTime::now_utc);

        // Re-posting the same revision updates the recorded deploy instead
        // of duplicating it.
        let deploy = match ctx
            .db_service
            .deploys_get_by_revision(repository.id, &payload.git_revision)
            .await?
        {
            Some(existing) => {
                ctx.db_service
                    .deploys_update(Deploy {
                        user_id,
                        deployed_at,
                        ..existing
                    })
                    .await?
            }
            None => {
                ctx.db_service
                    .deploys_create(Deploy {
                        id: 0,
                        repository_id: repository.id,
                        user_id,
                        git_revision: payload.git_revision.clone(),
                        deployed_at,
                    })
                    .await?
            }
        };

        for pull_request in &linked {
            ctx.db_service
                .pull_requests_attach_deploy(pull_request.id, deploy.id)
                .await?;
        }

        Ok(deploy)
    }
}

#[cfg(test)]
mod tests {
    use hubsync_database_interface::DbService;
    use hubsync_models::{PullRequest, Repository};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::context::tests::CoreContextTest;

    fn payload() -> DeployPayload {
        DeployPayload {
            git_revision: "abc123".into(),
            repository: "me/mirror".into(),
            deployed_at: Some(OffsetDateTime::from_unix_timestamp(10_000).unwrap()),
            pull_request_numbers: vec![1, 2],
        }
    }

    async fn seed(ctx: &CoreContextTest) {
        let repo = ctx
            .db_service
            .repositories_create(Repository {
                id: 10,
                owner: "me".into(),
                name: "mirror".into(),
            })
            .await
            .unwrap();

        ctx.db_service
            .pull_requests_create(
                PullRequest {
                    id: 100,
                    number: 1,
                    merged_by_id: Some(7),
                    created_at: OffsetDateTime::from_unix_timestamp(2_000).unwrap(),
                    ..Default::default()
                }
                .with_repository(&repo),
            )
            .await
            .unwrap();
        ctx.db_service
            .pull_requests_create(
                PullRequest {
                    id: 101,
                    number: 2,
                    merged_by_id: Some(8),
                    created_at: OffsetDateTime::from_unix_timestamp(1_000).unwrap(),
                    ..Default::default()
                }
                .with_repository(&repo),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn deploy_links_pull_requests_and_derives_user() {
        let ctx = CoreContextTest::new();
        seed(&ctx).await;

        let deploy = RecordDeploy
            .run(&ctx.as_context(), &payload())
            .await
            .unwrap();

        // PR 101 was created first, its merger owns the deploy.
        assert_eq!(deploy.user_id, 8);

        let pr = ctx.db_service.pull_requests_get(100).await.unwrap().unwrap();
        assert_eq!(pr.deploy_id, Some(deploy.id));
    }

    #[tokio::test]
    async fn same_revision_updates_instead_of_duplicating() {
        let ctx = CoreContextTest::new();
        seed(&ctx).await;

        let first = RecordDeploy
            .run(&ctx.as_context(), &payload())
            .await
            .unwrap();
        let second = RecordDeploy
            .run(
                &ctx.as_context(),
                &DeployPayload {
                    deployed_at: Some(OffsetDateTime::from_unix_timestamp(20_000).unwrap()),
                    ..payload()
                },
            )
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(ctx.db_service.deploys_all().await.unwrap().len(), 1);
        assert_eq!(
            second.deployed_at,
            OffsetDateTime::from_unix_timestamp(20_000).unwrap()
        );
    }

    #[tokio::test]
    async fn unknown_pull_request_numbers_are_skipped() {
        let ctx = CoreContextTest::new();
        seed(&ctx).await;

        let deploy = RecordDeploy
            .run(
                &ctx.as_context(),
                &DeployPayload {
                    pull_request_numbers: vec![1, 999],
                    ..payload()
                },
            )
            .await
            .unwrap();

        assert_eq!(
            ctx.db_service
                .pull_requests_list_for_deploy(deploy.id)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn deploy_without_pull_requests_is_rejected() {
        let ctx = CoreContextTest::new();
        seed(&ctx).await;

        let result = RecordDeploy
            .run(
                &ctx.as_context(),
                &DeployPayload {
                    pull_request_numbers: vec![],
                    ..payload()
                },
            )
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert!(ctx.db_service.deploys_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deploy_without_a_merged_pull_request_is_rejected() {
        let ctx = CoreContextTest::new();
        let repo = ctx
            .db_service
            .repositories_create(Repository {
                id: 10,
                owner: "me".into(),
                name: "mirror".into(),
            })
            .await
            .unwrap();
        ctx.db_service
            .pull_requests_create(
                PullRequest {
                    id: 100,
                    number: 1,
                    merged_by_id: None,
                    ..Default::default()
                }
                .with_repository(&repo),
            )
            .await
            .unwrap();

        // An open pull request and an unknown number: neither yields a user
        // to attribute the deploy to.
        let result = RecordDeploy
            .run(
                &ctx.as_context(),
                &DeployPayload {
                    pull_request_numbers: vec![1, 999],
                    ..payload()
                },
            )
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert!(ctx.db_service.deploys_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_revision_is_rejected() {
        let ctx = CoreContextTest::new();

        let result = RecordDeploy
            .run(
                &ctx.as_context(),
                &DeployPayload {
                    git_revision: String::new(),
                    ..payload()
                },
            )
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn unknown_repository_is_rejected() {
        let ctx = CoreContextTest::new();

        let result = RecordDeploy.run(&ctx.as_context(), &payload()).await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }
}
