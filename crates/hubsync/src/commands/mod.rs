//! Commands.

use std::{io::Write, sync::Arc};

use async_trait::async_trait;
use clap::Subcommand;
use hubsync_config::Config;
use hubsync_core::{CoreContext, CoreModule};
use hubsync_database_interface::DbService;
use hubsync_ghapi_interface::ApiService;
use hubsync_lock_interface::LockService;
use tokio::sync::RwLock;

use self::{hooks::HooksCommand, server::ServerCommand, sync::SyncCommand};
use crate::Result;

mod hooks;
mod server;
mod sync;

pub(crate) struct CommandContext {
    pub config: Config,
    pub db_service: Box<dyn DbService + Send + Sync>,
    pub api_service: Box<dyn ApiService + Send + Sync>,
    pub lock_service: Box<dyn LockService + Send + Sync>,
    pub core_module: CoreModule,
    pub writer: Arc<RwLock<dyn Write + Send + Sync>>,
}

impl CommandContext {
    pub fn as_core_context(&self) -> CoreContext {
        CoreContext {
            config: &self.config,
            core_module: &self.core_module,
            api_service: self.api_service.as_ref(),
            db_service: self.db_service.as_ref(),
            lock_service: self.lock_service.as_ref(),
        }
    }
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, ctx: CommandContext) -> Result<()>;
}

/// Command
#[derive(Subcommand)]
pub(crate) enum SubCommand {
    Server(ServerCommand),
    Sync(SyncCommand),
    Hooks(HooksCommand),
}

#[async_trait]
impl Command for SubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Server(sub) => sub.execute(ctx).await,
            Self::Sync(sub) => sub.execute(ctx).await,
            Self::Hooks(sub) => sub.execute(ctx).await,
        }
    }
}
