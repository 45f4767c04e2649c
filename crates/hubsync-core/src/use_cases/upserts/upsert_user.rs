use async_trait::async_trait;
use hubsync_ghapi_interface::types::GhUser;
use hubsync_models::User;
use shaku::{Component, Interface};
use tracing::warn;

use crate::{CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait UpsertUserInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, gh_user: &GhUser) -> Result<Option<User>>;
}

#[derive(Component)]
#[shaku(interface = UpsertUserInterface)]
pub(crate) struct UpsertUser;

#[async_trait]
impl UpsertUserInterface for UpsertUser {
    #[tracing::instrument(skip(self, ctx), fields(user_id = gh_user.id, login = %gh_user.login))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, gh_user: &GhUser) -> Result<Option<User>> {
        if gh_user.id == 0 || gh_user.login.is_empty() {
            warn!(
                user_id = gh_user.id,
                login = %gh_user.login,
                message = "Rejecting user payload, keeping prior state"
            );
            return Ok(ctx.db_service.users_get(gh_user.id).await?);
        }

        match ctx.db_service.users_get(gh_user.id).await? {
            Some(existing) if existing.login == gh_user.login => Ok(Some(existing)),
            Some(existing) => Ok(Some(
                ctx.db_service
                    .users_update(User {
                        login: gh_user.login.clone(),
                        ..existing
                    })
                    .await?,
            )),
            None => Ok(Some(
                ctx.db_service
                    .users_create(User {
                        id: gh_user.id,
                        login: gh_user.login.clone(),
                    })
                    .await?,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use hubsync_database_interface::DbService;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::context::tests::CoreContextTest;

    #[tokio::test]
    async fn first_sighting_creates() {
        let ctx = CoreContextTest::new();

        let user = UpsertUser
            .run(
                &ctx.as_context(),
                &GhUser {
                    id: 1,
                    login: "alice".into(),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            user,
            User {
                id: 1,
                login: "alice".into()
            }
        );
    }

    #[tokio::test]
    async fn replay_is_idempotent() {
        let ctx = CoreContextTest::new();
        let gh_user = GhUser {
            id: 1,
            login: "alice".into(),
        };

        let first = UpsertUser
            .run(&ctx.as_context(), &gh_user)
            .await
            .unwrap()
            .unwrap();
        let second = UpsertUser
            .run(&ctx.as_context(), &gh_user)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(ctx.db_service.users_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn login_rename_is_merged() {
        let ctx = CoreContextTest::new();

        UpsertUser
            .run(
                &ctx.as_context(),
                &GhUser {
                    id: 1,
                    login: "alice".into(),
                },
            )
            .await
            .unwrap();

        let renamed = UpsertUser
            .run(
                &ctx.as_context(),
                &GhUser {
                    id: 1,
                    login: "alice-2".into(),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(renamed.login, "alice-2");
        assert_eq!(ctx.db_service.users_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_payload_keeps_prior_state() {
        let ctx = CoreContextTest::new();
        ctx.db_service
            .users_create(User {
                id: 1,
                login: "alice".into(),
            })
            .await
            .unwrap();

        let result = UpsertUser
            .run(
                &ctx.as_context(),
                &GhUser {
                    id: 1,
                    login: String::new(),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.login, "alice");
    }

    #[tokio::test]
    async fn invalid_payload_without_prior_state_yields_none() {
        let ctx = CoreContextTest::new();

        let result = UpsertUser
            .run(
                &ctx.as_context(),
                &GhUser {
                    id: 0,
                    login: "ghost".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(result, None);
    }
}
