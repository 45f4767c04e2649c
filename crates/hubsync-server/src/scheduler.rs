//! Periodic full sync scheduler.

use std::time::Duration;

use actix_web::web::Data;
use hubsync_core::use_cases::sync::RunFullSyncInterface;
use shaku::HasComponent;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::server::AppContext;

/// Spawn the reconciliation loop. The returned handle aborts the loop on
/// shutdown; overlap between cycles is prevented by the run lock, not by
/// the scheduler.
pub fn spawn_sync_scheduler(context: Data<AppContext>) -> JoinHandle<()> {
    let period = context.config.sync.interval_seconds;

    tokio::spawn(async move {
        if period == 0 {
            info!(message = "Sync scheduler disabled");
            return;
        }

        let mut interval = tokio::time::interval(Duration::from_secs(period));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            let ctx = context.as_core_context();
            let run_full_sync: &dyn RunFullSyncInterface = ctx.core_module.resolve_ref();
            match run_full_sync.run(&ctx).await {
                Ok(report) => {
                    info!(?report, message = "Scheduled sync cycle finished");
                }
                Err(e) => {
                    error!(error = %e, message = "Scheduled sync cycle failed");
                }
            }
        }
    })
}
