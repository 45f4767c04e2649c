use std::sync::Arc;

use clap::Parser;
use hubsync_config::{ApiDriver, Config, LockDriver};
use hubsync_core::CoreModule;
use hubsync_database_interface::DbService;
use hubsync_database_memory::MemoryDb;
use hubsync_ghapi_github::GithubApiService;
use hubsync_ghapi_interface::ApiService;
use hubsync_ghapi_null::NullApiService;
use hubsync_lock_interface::LockService;
use hubsync_lock_local::LocalLockService;
use hubsync_lock_null::NullLockService;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    commands::{Command, CommandContext, SubCommand},
    Result,
};

#[derive(Parser)]
#[command(about = None, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    cmd: SubCommand,
}

pub struct CommandExecutor;

impl CommandExecutor {
    pub fn parse_args(config: Config, args: Args) -> Result<()> {
        let sync = |config: Config, args: Args| async move {
            let core_module = CoreModule::builder().build();
            let db_service: Box<dyn DbService + Send + Sync + 'static> = {
                info!("Using MemoryDb database driver");
                Box::new(MemoryDb::new())
            };

            let api_service: Box<dyn ApiService + Send + Sync + 'static> = {
                if config.api.driver == ApiDriver::GitHub {
                    info!("Using GithubApiService API driver");
                    Box::new(GithubApiService::new(config.clone()))
                } else {
                    info!("Using NullApiService API driver");
                    Box::new(NullApiService::new())
                }
            };

            let lock_service: Box<dyn LockService + Send + Sync + 'static> = {
                if config.lock.driver == LockDriver::Local {
                    info!("Using LocalLockService lock driver");
                    Box::new(LocalLockService::new())
                } else {
                    info!("Using NullLockService lock driver");
                    Box::new(NullLockService::new())
                }
            };

            let ctx = CommandContext {
                config: config.clone(),
                db_service,
                api_service,
                lock_service,
                core_module,
                writer: Arc::new(RwLock::new(std::io::stdout())),
            };

            Self::parse_args_async(args, ctx).await
        };

        actix_rt::System::with_tokio_rt(|| {
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .unwrap()
        })
        .block_on(sync(config, args))?;

        Ok(())
    }

    pub(crate) async fn parse_args_async(args: Args, ctx: CommandContext) -> Result<()> {
        args.cmd.execute(ctx).await
    }
}
