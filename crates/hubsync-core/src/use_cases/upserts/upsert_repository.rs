use async_trait::async_trait;
use hubsync_ghapi_interface::types::GhRepository;
use hubsync_models::Repository;
use shaku::{Component, Interface};
use tracing::warn;

use crate::{CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait UpsertRepositoryInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        gh_repository: &GhRepository,
    ) -> Result<Option<Repository>>;
}

#[derive(Component)]
#[shaku(interface = UpsertRepositoryInterface)]
pub(crate) struct UpsertRepository;

#[async_trait]
impl UpsertRepositoryInterface for UpsertRepository {
    #[tracing::instrument(skip(self, ctx), fields(repository_id = gh_repository.id, full_name = %gh_repository.full_name))]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        gh_repository: &GhRepository,
    ) -> Result<Option<Repository>> {
        if gh_repository.id == 0
            || gh_repository.name.is_empty()
            || gh_repository.owner.login.is_empty()
        {
            warn!(
                repository_id = gh_repository.id,
                full_name = %gh_repository.full_name,
                message = "Rejecting repository payload, keeping prior state"
            );
            return Ok(ctx.db_service.repositories_get(gh_repository.id).await?);
        }

        let incoming = Repository {
            id: gh_repository.id,
            owner: gh_repository.owner.login.clone(),
            name: gh_repository.name.clone(),
        };

        match ctx.db_service.repositories_get(gh_repository.id).await? {
            Some(existing) if existing == incoming => Ok(Some(existing)),
            Some(_) => Ok(Some(ctx.db_service.repositories_update(incoming).await?)),
            None => Ok(Some(ctx.db_service.repositories_create(incoming).await?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use hubsync_database_interface::DbService;
    use hubsync_ghapi_interface::types::GhUser;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::context::tests::CoreContextTest;

    fn gh_repository() -> GhRepository {
        GhRepository {
            id: 10,
            name: "mirror".into(),
            full_name: "me/mirror".into(),
            owner: GhUser {
                id: 1,
                login: "me".into(),
            },
        }
    }

    #[tokio::test]
    async fn first_sighting_creates() {
        let ctx = CoreContextTest::new();

        let repository = UpsertRepository
            .run(&ctx.as_context(), &gh_repository())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(repository.full_name(), "me/mirror");
    }

    #[tokio::test]
    async fn rename_is_merged_in_place() {
        let ctx = CoreContextTest::new();

        UpsertRepository
            .run(&ctx.as_context(), &gh_repository())
            .await
            .unwrap();

        let renamed = UpsertRepository
            .run(
                &ctx.as_context(),
                &GhRepository {
                    name: "mirror-2".into(),
                    ..gh_repository()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(renamed.name, "mirror-2");
        assert_eq!(ctx.db_service.repositories_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_payload_without_prior_state_yields_none() {
        let ctx = CoreContextTest::new();

        let result = UpsertRepository
            .run(
                &ctx.as_context(),
                &GhRepository {
                    id: 0,
                    ..gh_repository()
                },
            )
            .await
            .unwrap();

        assert_eq!(result, None);
    }
}
