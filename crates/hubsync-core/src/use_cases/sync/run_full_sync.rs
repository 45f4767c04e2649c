use async_trait::async_trait;
use hubsync_lock_interface::LockStatus;
use hubsync_models::{SyncReport, SyncStatus};
use shaku::{Component, HasComponent, Interface};
use tracing::{info, warn};

use super::SynchronizeTeamInterface;
use crate::{CoreContext, DomainError, Result};

const SYNC_LOCK_NAME: &str = "full-sync";

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait RunFullSyncInterface: Interface {
    /// Runs one full reconciliation cycle against the configured
    /// organization.
    async fn run<'a>(&self, ctx: &CoreContext<'a>) -> Result<SyncReport>;
}

#[derive(Component)]
#[shaku(interface = RunFullSyncInterface)]
pub(crate) struct RunFullSync;

#[async_trait]
impl RunFullSyncInterface for RunFullSync {
    #[tracing::instrument(skip_all, fields(organization = %ctx.config.organization), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>) -> Result<SyncReport> {
        // At most one cycle at a time, cluster wide.
        let instance = match ctx.lock_service.try_lock_resource(SYNC_LOCK_NAME).await? {
            LockStatus::SuccessfullyLocked(instance) => instance,
            LockStatus::AlreadyLocked => {
                info!(message = "A previous sync cycle is still running");
                return Ok(SyncReport::already_running());
            }
        };

        let result = self.run_locked(ctx).await;
        instance.release().await?;
        result
    }
}

impl RunFullSync {
    async fn run_locked(&self, ctx: &CoreContext<'_>) -> Result<SyncReport> {
        let rate_limit = ctx.api_service.rate_limit_get().await?;
        if rate_limit.remaining < ctx.config.sync.rate_limit_threshold {
            warn!(
                remaining = rate_limit.remaining,
                threshold = ctx.config.sync.rate_limit_threshold,
                message = "Rate limit quota below threshold, deferring sync cycle"
            );
            return Ok(SyncReport::deferred(rate_limit.remaining));
        }

        let teams = ctx
            .api_service
            .org_teams_list(&ctx.config.organization)
            .await?;

        let allow_list = &ctx.config.teams.allow_list;
        let selected = teams
            .iter()
            .filter(|t| allow_list.is_empty() || allow_list.contains(&t.name));

        let mut report = SyncReport {
            status: SyncStatus::Completed,
            rate_limit_remaining: rate_limit.remaining,
            ..Default::default()
        };
        let mut observed_ids = Vec::new();

        let synchronize_team: &dyn SynchronizeTeamInterface = ctx.core_module.resolve_ref();
        for team in selected {
            match synchronize_team.run(ctx, team).await {
                Ok(users_synced) => {
                    report.teams_synced += 1;
                    report.users_synced += users_synced;
                }
                Err(DomainError::ApiError { source }) if source.is_fatal() => {
                    return Err(DomainError::ApiError { source });
                }
                Err(e) => {
                    // A fetch failure never tombstones: the team stays in the
                    // observed set.
                    warn!(
                        team_id = team.id,
                        name = %team.name,
                        error = %e,
                        message = "Team synchronization failed, continuing"
                    );
                    report.teams_failed += 1;
                }
            }
            observed_ids.push(team.id);
        }

        let tombstoned = ctx
            .db_service
            .teams_tombstone_not_in(&observed_ids)
            .await?;
        report.teams_tombstoned = tombstoned.len() as u64;

        info!(
            teams_synced = report.teams_synced,
            teams_failed = report.teams_failed,
            users_synced = report.users_synced,
            teams_tombstoned = report.teams_tombstoned,
            message = "Sync cycle completed"
        );

        Ok(report)
    }
}
