use async_trait::async_trait;
use hubsync_ghapi_interface::types::GhTeam;
use hubsync_models::Team;
use shaku::{Component, Interface};
use tracing::warn;

use crate::{CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait UpsertTeamInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, gh_team: &GhTeam) -> Result<Option<Team>>;
}

#[derive(Component)]
#[shaku(interface = UpsertTeamInterface)]
pub(crate) struct UpsertTeam;

#[async_trait]
impl UpsertTeamInterface for UpsertTeam {
    #[tracing::instrument(skip(self, ctx), fields(team_id = gh_team.id, name = %gh_team.name))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, gh_team: &GhTeam) -> Result<Option<Team>> {
        if gh_team.id == 0 || gh_team.name.is_empty() {
            warn!(
                team_id = gh_team.id,
                name = %gh_team.name,
                message = "Rejecting team payload, keeping prior state"
            );
            return Ok(ctx.db_service.teams_get(gh_team.id).await?);
        }

        // A re-sighted team is always reactivated.
        let incoming = Team {
            id: gh_team.id,
            name: gh_team.name.clone(),
            slug: gh_team.slug.clone(),
            active: true,
        };

        match ctx.db_service.teams_get(gh_team.id).await? {
            Some(existing) if existing == incoming => Ok(Some(existing)),
            Some(_) => Ok(Some(ctx.db_service.teams_update(incoming).await?)),
            None => Ok(Some(ctx.db_service.teams_create(incoming).await?)),
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
    async fn first_sighting_creates_active() {
        let ctx = CoreContextTest::new();

        let team = UpsertTeam
            .run(
                &ctx.as_context(),
                &GhTeam {
                    id: 1,
                    name: "Platform".into(),
                    slug: "platform".into(),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert!(team.active);
    }

    #[tokio::test]
    async fn tombstoned_team_is_reactivated_on_sighting() {
        let ctx = CoreContextTest::new();
        ctx.db_service
            .teams_create(Team {
                id: 1,
                name: "Platform".into(),
                slug: "platform".into(),
                active: false,
            })
            .await
            .unwrap();

        let team = UpsertTeam
            .run(
                &ctx.as_context(),
                &GhTeam {
                    id: 1,
                    name: "Platform".into(),
                    slug: "platform".into(),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert!(team.active);
        assert_eq!(ctx.db_service.teams_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_payload_without_prior_state_yields_none() {
        let ctx = CoreContextTest::new();

        let result = UpsertTeam
            .run(
                &ctx.as_context(),
                &GhTeam {
                    id: 1,
                    name: String::new(),
                    slug: "x".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(result, None);
    }
}
