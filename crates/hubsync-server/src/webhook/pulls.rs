//! Pull request webhook handlers.

use actix_web::HttpResponse;
use hubsync_core::use_cases::events::HandlePullRequestEventInterface;
use hubsync_ghapi_interface::types::GhPullRequestEvent;
use shaku::HasComponent;

use super::parse_event_type;
use crate::{event_type::EventType, server::AppContext, Result, ServerError};

pub(crate) fn parse_pull_request_event(body: &str) -> Result<GhPullRequestEvent> {
    parse_event_type(EventType::PullRequest, body)
}

#[tracing::instrument(skip_all, fields(
    action = ?event.action,
    repo_owner = event.repository.owner.login,
    repo_name = event.repository.name,
    pr_number = event.pull_request.number,
))]
pub(crate) async fn pull_request_event(
    ctx: &AppContext,
    event: GhPullRequestEvent,
) -> Result<HttpResponse> {
    let core_ctx = ctx.as_core_context();

    let handle_pull_request_event: &dyn HandlePullRequestEventInterface =
        core_ctx.core_module.resolve_ref();
    handle_pull_request_event
        .run(&core_ctx, event)
        .await
        .map_err(|e| ServerError::DomainError { source: e })?;

    Ok(HttpResponse::Ok().body("Pull request."))
}
