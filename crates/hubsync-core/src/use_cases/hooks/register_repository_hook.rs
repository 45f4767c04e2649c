use async_trait::async_trait;
use hubsync_ghapi_interface::types::GhHookConfig;
use hubsync_models::RepositoryPath;
use shaku::{Component, Interface};

use crate::{CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait RegisterRepositoryHookInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, path: &RepositoryPath) -> Result<()>;
}

#[derive(Component)]
#[shaku(interface = RegisterRepositoryHookInterface)]
pub(crate) struct RegisterRepositoryHook;

#[async_trait]
impl RegisterRepositoryHookInterface for RegisterRepositoryHook {
    #[tracing::instrument(skip(self, ctx), fields(repository_path = %path))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, path: &RepositoryPath) -> Result<()> {
        if ctx.config.server.webhook_endpoint.is_empty() {
            return Err(DomainError::Validation {
                message: "no webhook endpoint configured".into(),
            });
        }

        let hook = GhHookConfig::for_tracked_events(
            &ctx.config.server.webhook_endpoint,
            &ctx.config.server.webhook_secret,
        );

        ctx.api_service
            .repo_hooks_create(path.owner(), path.name(), &hook)
            .await?;

        Ok(())
    }
}
