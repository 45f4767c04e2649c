use async_trait::async_trait;
use hubsync_ghapi_interface::types::{GhIssueCommentAction, GhIssueCommentEvent};
use hubsync_lock_interface::LockStatus;
use hubsync_models::Comment;
use shaku::{Component, HasComponent, Interface};
use tracing::{info, warn};

use crate::{use_cases::upserts::UpsertCommentInterface, CoreContext, Result};

const LOCK_TIMEOUT_MS: u64 = 10_000;

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait HandleCommentEventInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        event: GhIssueCommentEvent,
    ) -> Result<Option<Comment>>;
}

#[derive(Component)]
#[shaku(interface = HandleCommentEventInterface)]
pub(crate) struct HandleCommentEvent;

#[async_trait]
impl HandleCommentEventInterface for HandleCommentEvent {
    #[tracing::instrument(skip_all, fields(
        action = ?event.action,
        comment_id = event.comment.id,
        pr_number = event.issue.number,
        repository_path = %event.repository.full_name
    ))]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        event: GhIssueCommentEvent,
    ) -> Result<Option<Comment>> {
        if event.action == GhIssueCommentAction::Deleted {
            // Mirrored data is never deleted by ingestion.
            info!(
                comment_id = event.comment.id,
                message = "Ignoring comment deletion"
            );
            return Ok(None);
        }

        let lock_name = format!("comment/{}", event.comment.id);
        let instance = match ctx
            .lock_service
            .wait_lock_resource(&lock_name, LOCK_TIMEOUT_MS)
            .await?
        {
            LockStatus::SuccessfullyLocked(instance) => instance,
            LockStatus::AlreadyLocked => {
                warn!(message = "Could not obtain comment lock, dropping delivery");
                return Ok(None);
            }
        };

        let upsert_comment: &dyn UpsertCommentInterface = ctx.core_module.resolve_ref();
        let result = upsert_comment
            .run(ctx, &event.repository, &event.issue, &event.comment)
            .await;

        instance.release().await?;
        result
    }
}

#[cfg(test)]
mod tests {
    use hubsync_database_interface::DbService;
    use hubsync_ghapi_interface::types::{GhIssue, GhIssueComment, GhRepository, GhUser};
    use hubsync_lock_interface::{LockInstance, MockLockService};
    use hubsync_models::{PullRequest, Repository};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::context::tests::CoreContextTest;

    fn event(action: GhIssueCommentAction) -> GhIssueCommentEvent {
        GhIssueCommentEvent {
            action,
            issue: GhIssue { id: 99, number: 1 },
            comment: GhIssueComment {
                id: 500,
                user: GhUser {
                    id: 2,
                    login: "alice".into(),
                },
                body: "Looks good".into(),
                ..Default::default()
            },
            repository: GhRepository {
                id: 10,
                name: "mirror".into(),
                full_name: "me/mirror".into(),
                owner: GhUser {
                    id: 1,
                    login: "me".into(),
                },
            },
            ..Default::default()
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
                    ..Default::default()
                }
                .with_repository(&repo),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn created_action_upserts_under_lock() {
        let mut ctx = CoreContextTest::new();
        seed(&ctx).await;
        ctx.lock_service = {
            let mut svc = MockLockService::new();
            svc.expect_wait_lock_resource()
                .once()
                .withf(|name, timeout| name == "comment/500" && timeout == &10_000)
                .return_once(|_, _| {
                    Ok(LockStatus::SuccessfullyLocked(LockInstance::new_dummy(
                        "dummy",
                    )))
                });
            svc
        };

        let comment = HandleCommentEvent
            .run(&ctx.as_context(), event(GhIssueCommentAction::Created))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(comment.id, 500);
        assert_eq!(comment.pull_request_id, 100);
    }

    #[tokio::test]
    async fn deleted_action_is_a_no_op() {
        let ctx = CoreContextTest::new();

        let result = HandleCommentEvent
            .run(&ctx.as_context(), event(GhIssueCommentAction::Deleted))
            .await
            .unwrap();

        assert_eq!(result, None);
    }
}
