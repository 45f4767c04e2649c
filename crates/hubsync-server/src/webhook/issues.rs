//! Issue comment webhook handlers.

use actix_web::HttpResponse;
use hubsync_core::use_cases::events::HandleCommentEventInterface;
use hubsync_ghapi_interface::types::GhIssueCommentEvent;
use shaku::HasComponent;

use super::parse_event_type;
use crate::{event_type::EventType, server::AppContext, Result, ServerError};

pub(crate) fn parse_issue_comment_event(body: &str) -> Result<GhIssueCommentEvent> {
    parse_event_type(EventType::IssueComment, body)
}

#[tracing::instrument(skip_all, fields(
    action = ?event.action,
    repo_owner = event.repository.owner.login,
    repo_name = event.repository.name,
    pr_number = event.issue.number,
))]
pub(crate) async fn issue_comment_event(
    ctx: &AppContext,
    event: GhIssueCommentEvent,
) -> Result<HttpResponse> {
    let core_ctx = ctx.as_core_context();

    let handle_comment_event: &dyn HandleCommentEventInterface = core_ctx.core_module.resolve_ref();
    handle_comment_event
        .run(&core_ctx, event)
        .await
        .map_err(|e| ServerError::DomainError { source: e })?;

    Ok(HttpResponse::Ok().body("Issue comment."))
}
