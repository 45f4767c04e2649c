use async_trait::async_trait;
use clap::Parser;
use hubsync_core::use_cases::sync::RunFullSyncInterface;
use shaku::HasComponent;

use super::{Command, CommandContext};
use crate::Result;

/// Run a full synchronization cycle, then exit
#[derive(Parser)]
pub(crate) struct SyncCommand;

#[async_trait]
impl Command for SyncCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let run_full_sync: &dyn RunFullSyncInterface = ctx.core_module.resolve_ref();
        let report = run_full_sync.run(&ctx.as_core_context()).await?;

        writeln!(
            ctx.writer.write().await,
            "{}",
            serde_json::to_string_pretty(&report)?
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use hubsync_ghapi_interface::types::GhRateLimit;
    use hubsync_lock_interface::{LockInstance, LockStatus};

    use crate::testutils::{test_command, CommandContextTest};

    #[tokio::test]
    async fn sync_command_prints_the_cycle_report() {
        let mut ctx = CommandContextTest::new();
        ctx.lock_service
            .expect_try_lock_resource()
            .once()
            .return_once(|_| {
                Ok(LockStatus::SuccessfullyLocked(LockInstance::new_dummy(
                    "dummy",
                )))
            });
        ctx.api_service.expect_rate_limit_get().once().return_once(|| {
            Ok(GhRateLimit {
                limit: 5000,
                remaining: 4200,
            })
        });
        ctx.api_service
            .expect_org_teams_list()
            .once()
            .return_once(|_| Ok(vec![]));

        let output = test_command(ctx, &["sync"]).await;
        assert_eq!(
            output,
            "{\n  \"status\": \"completed\",\n  \"teams_synced\": 0,\n  \"teams_failed\": 0,\n  \"users_synced\": 0,\n  \"teams_tombstoned\": 0,\n  \"rate_limit_remaining\": 4200\n}\n"
        );
    }
}
