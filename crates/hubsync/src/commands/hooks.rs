use async_trait::async_trait;
use clap::{Parser, Subcommand};
use hubsync_core::use_cases::hooks::{
    RegisterOrganizationHookInterface, RegisterRepositoryHookInterface,
};
use hubsync_models::RepositoryPath;
use shaku::HasComponent;

use super::{Command, CommandContext};
use crate::Result;

/// Manage webhook registrations
#[derive(Parser)]
pub(crate) struct HooksCommand {
    #[command(subcommand)]
    inner: HooksSubCommand,
}

#[async_trait]
impl Command for HooksCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        self.inner.execute(ctx).await
    }
}

#[derive(Subcommand)]
enum HooksSubCommand {
    AddRepository(HooksAddRepositoryCommand),
    AddOrganization(HooksAddOrganizationCommand),
}

#[async_trait]
impl Command for HooksSubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::AddRepository(sub) => sub.execute(ctx).await,
            Self::AddOrganization(sub) => sub.execute(ctx).await,
        }
    }
}

/// Register the webhook on a single repository
#[derive(Parser)]
struct HooksAddRepositoryCommand {
    /// Repository path (e.g. 'MyOrganization/my-project')
    repository_path: RepositoryPath,
}

#[async_trait]
impl Command for HooksAddRepositoryCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let register_hook: &dyn RegisterRepositoryHookInterface = ctx.core_module.resolve_ref();
        register_hook
            .run(&ctx.as_core_context(), &self.repository_path)
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Webhook registered on repository '{}'.",
            self.repository_path
        )?;
        Ok(())
    }
}

/// Register the webhook on the whole organization
#[derive(Parser)]
struct HooksAddOrganizationCommand;

#[async_trait]
impl Command for HooksAddOrganizationCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let register_hook: &dyn RegisterOrganizationHookInterface = ctx.core_module.resolve_ref();
        register_hook.run(&ctx.as_core_context()).await?;

        writeln!(
            ctx.writer.write().await,
            "Webhook registered on organization '{}'.",
            ctx.config.organization
        )?;
        Ok(())
    }
}
