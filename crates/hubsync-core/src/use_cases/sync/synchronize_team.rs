use async_trait::async_trait;
use hubsync_ghapi_interface::types::GhTeam;
use shaku::{Component, HasComponent, Interface};
use tracing::info;

use crate::{
    use_cases::upserts::{UpsertTeamInterface, UpsertUserInterface},
    CoreContext, Result,
};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait SynchronizeTeamInterface: Interface {
    /// Mirrors one team: the team row, its members, and the membership edge
    /// set. Returns the number of synchronized users.
    async fn run<'a>(&self, ctx: &CoreContext<'a>, gh_team: &GhTeam) -> Result<u64>;
}

#[derive(Component)]
#[shaku(interface = SynchronizeTeamInterface)]
pub(crate) struct SynchronizeTeam;

#[async_trait]
impl SynchronizeTeamInterface for SynchronizeTeam {
    #[tracing::instrument(skip(self, ctx), fields(team_id = gh_team.id, name = %gh_team.name))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, gh_team: &GhTeam) -> Result<u64> {
        let upsert_team: &dyn UpsertTeamInterface = ctx.core_module.resolve_ref();
        let team = match upsert_team.run(ctx, gh_team).await? {
            Some(team) => team,
            None => return Ok(0),
        };

        let members = ctx
            .api_service
            .team_members_list(&ctx.config.organization, &gh_team.slug)
            .await?;

        let upsert_user: &dyn UpsertUserInterface = ctx.core_module.resolve_ref();
        let mut member_ids = Vec::with_capacity(members.len());
        for member in &members {
            if let Some(user) = upsert_user.run(ctx, member).await? {
                member_ids.push(user.id);
            }
        }

        // The freshly observed set replaces the stored membership wholesale.
        ctx.db_service
            .memberships_replace(team.id, &member_ids)
            .await?;

        info!(
            team_id = team.id,
            members = member_ids.len(),
            message = "Team synchronized"
        );

        Ok(member_ids.len() as u64)
    }
}
