use async_trait::async_trait;
use hubsync_ghapi_interface::types::GhPullRequestEvent;
use hubsync_lock_interface::LockStatus;
use shaku::{Component, HasComponent, Interface};
use tracing::warn;

use crate::{use_cases::upserts::UpsertPullRequestInterface, CoreContext, Result};

const LOCK_TIMEOUT_MS: u64 = 10_000;

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait HandlePullRequestEventInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, event: GhPullRequestEvent) -> Result<()>;
}

#[derive(Component)]
#[shaku(interface = HandlePullRequestEventInterface)]
pub(crate) struct HandlePullRequestEvent;

#[async_trait]
impl HandlePullRequestEventInterface for HandlePullRequestEvent {
    #[tracing::instrument(skip_all, fields(
        action = ?event.action,
        pr_id = event.pull_request.id,
        pr_number = event.number,
        repository_path = %event.repository.full_name
    ))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, event: GhPullRequestEvent) -> Result<()> {
        // Deliveries for the same pull request are serialized; deliveries
        // for distinct pull requests proceed in parallel.
        let lock_name = format!("pull-request/{}", event.pull_request.id);
        let instance = match ctx
            .lock_service
            .wait_lock_resource(&lock_name, LOCK_TIMEOUT_MS)
            .await?
        {
            LockStatus::SuccessfullyLocked(instance) => instance,
            LockStatus::AlreadyLocked => {
                // The sender redelivers, the next attempt will get through.
                warn!(message = "Could not obtain pull request lock, dropping delivery");
                return Ok(());
            }
        };

        let result = self.process(ctx, &event).await;
        instance.release().await?;
        result
    }
}

impl HandlePullRequestEvent {
    async fn process(&self, ctx: &CoreContext<'_>, event: &GhPullRequestEvent) -> Result<()> {
        let upsert_pull_request: &dyn UpsertPullRequestInterface = ctx.core_module.resolve_ref();
        let pull_request = match upsert_pull_request
            .run(ctx, &event.repository, &event.pull_request)
            .await?
        {
            Some(pull_request) => pull_request,
            None => return Ok(()),
        };

        // The payload label set can lag behind; the API is authoritative.
        let labels = match ctx
            .api_service
            .issue_labels_list(
                &event.repository.owner.login,
                &event.repository.name,
                pull_request.number,
            )
            .await
        {
            Ok(labels) => labels,
            Err(e) if !e.is_fatal() => {
                // The payload labels are already stored; the next delivery
                // refreshes them.
                warn!(error = %e, message = "Label fetch failed, keeping stored labels");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        ctx.db_service
            .pull_requests_set_labels(pull_request.id, &labels)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use hubsync_database_interface::DbService;
    use hubsync_ghapi_interface::{
        types::{GhLabel, GhPullRequest, GhRepository, GhUser},
        ApiError,
    };
    use hubsync_lock_interface::{LockInstance, MockLockService};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::context::tests::CoreContextTest;

    fn event() -> GhPullRequestEvent {
        GhPullRequestEvent {
            number: 1,
            pull_request: GhPullRequest {
                id: 100,
                number: 1,
                user: GhUser {
                    id: 2,
                    login: "alice".into(),
                },
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

    fn locking_service() -> MockLockService {
        let mut svc = MockLockService::new();
        svc.expect_wait_lock_resource()
            .once()
            .withf(|name, timeout| name == "pull-request/100" && timeout == &10_000)
            .return_once(|_, _| {
                Ok(LockStatus::SuccessfullyLocked(LockInstance::new_dummy(
                    "dummy",
                )))
            });
        svc
    }

    #[tokio::test]
    async fn delivery_upserts_and_replaces_labels() {
        let mut ctx = CoreContextTest::new();
        ctx.lock_service = locking_service();
        ctx.api_service
            .expect_issue_labels_list()
            .once()
            .withf(|owner, name, number| owner == "me" && name == "mirror" && number == &1)
            .return_once(|_, _, _| Ok(vec!["bug".into()]));

        HandlePullRequestEvent
            .run(&ctx.as_context(), event())
            .await
            .unwrap();

        let pr = ctx.db_service.pull_requests_get(100).await.unwrap().unwrap();
        assert_eq!(pr.labels, vec!["bug".to_string()]);
    }

    #[tokio::test]
    async fn label_fetch_failure_does_not_fail_the_delivery() {
        let mut ctx = CoreContextTest::new();
        ctx.lock_service = locking_service();
        ctx.api_service
            .expect_issue_labels_list()
            .once()
            .return_once(|_, _, _| {
                Err(ApiError::Transient {
                    message: "timeout".into(),
                })
            });

        let mut event = event();
        event.pull_request.labels = vec![GhLabel {
            name: "bug".into(),
        }];

        HandlePullRequestEvent
            .run(&ctx.as_context(), event)
            .await
            .unwrap();

        // The payload labels survive until the next successful fetch.
        let pr = ctx.db_service.pull_requests_get(100).await.unwrap().unwrap();
        assert_eq!(pr.labels, vec!["bug".to_string()]);
    }

    #[tokio::test]
    async fn lock_timeout_drops_the_delivery() {
        let mut ctx = CoreContextTest::new();
        ctx.lock_service = {
            let mut svc = MockLockService::new();
            svc.expect_wait_lock_resource()
                .once()
                .return_once(|_, _| Ok(LockStatus::AlreadyLocked));
            svc
        };

        HandlePullRequestEvent
            .run(&ctx.as_context(), event())
            .await
            .unwrap();

        assert!(ctx.db_service.pull_requests_get(100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn invalid_payload_skips_label_fetch() {
        let mut ctx = CoreContextTest::new();
        ctx.lock_service = {
            let mut svc = MockLockService::new();
            svc.expect_wait_lock_resource().once().return_once(|_, _| {
                Ok(LockStatus::SuccessfullyLocked(LockInstance::new_dummy(
                    "dummy",
                )))
            });
            svc
        };

        let mut event = event();
        event.pull_request.id = 0;

        HandlePullRequestEvent
            .run(&ctx.as_context(), event)
            .await
            .unwrap();
    }
}
