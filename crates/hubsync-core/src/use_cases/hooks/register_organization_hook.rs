use async_trait::async_trait;
use hubsync_ghapi_interface::types::GhHookConfig;
use shaku::{Component, Interface};

use crate::{CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait RegisterOrganizationHookInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>) -> Result<()>;
}

#[derive(Component)]
#[shaku(interface = RegisterOrganizationHookInterface)]
pub(crate) struct RegisterOrganizationHook;

#[async_trait]
impl RegisterOrganizationHookInterface for RegisterOrganizationHook {
    #[tracing::instrument(skip_all, fields(organization = %ctx.config.organization))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>) -> Result<()> {
        if ctx.config.organization.is_empty() {
            return Err(DomainError::Validation {
                message: "no organization configured".into(),
            });
        }
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
            .org_hooks_create(&ctx.config.organization, &hook)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::CoreContextTest;

    #[tokio::test]
    async fn hook_targets_the_configured_organization() {
        let mut ctx = CoreContextTest::new();
        ctx.config.organization = "acme".into();
        ctx.config.server.webhook_endpoint = "https://mirror.example.com/webhook".into();

        ctx.api_service
            .expect_org_hooks_create()
            .once()
            .withf(|org, hook| org == "acme" && hook.active)
            .return_once(|_, _| Ok(()));

        RegisterOrganizationHook
            .run(&ctx.as_context())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn missing_organization_is_rejected() {
        let mut ctx = CoreContextTest::new();
        ctx.config.organization = String::new();
        ctx.config.server.webhook_endpoint = "https://mirror.example.com/webhook".into();

        let result = RegisterOrganizationHook.run(&ctx.as_context()).await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }
}
