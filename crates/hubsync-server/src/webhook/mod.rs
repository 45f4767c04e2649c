//! Webhook handlers.

mod deploys;
mod issues;
mod ping;
mod pulls;

use std::convert::TryFrom;

use actix_web::{web, HttpRequest, HttpResponse, Result as ActixResult};
use serde::Deserialize;
use tracing::info;

use crate::{
    constants::GITHUB_EVENT_HEADER, event_type::EventType, server::AppContext,
    utils::convert_payload_to_string, Result, ServerError,
};

#[tracing::instrument(skip_all, fields(event_type = %event_type))]
async fn parse_event(
    ctx: &AppContext,
    event_type: EventType,
    body: &str,
) -> Result<HttpResponse> {
    match event_type {
        EventType::Ping => Ok(ping::ping_event(ping::parse_ping_event(body)?)),
        EventType::PullRequest => {
            pulls::pull_request_event(ctx, pulls::parse_pull_request_event(body)?).await
        }
        EventType::IssueComment => {
            issues::issue_comment_event(ctx, issues::parse_issue_comment_event(body)?).await
        }
    }
}

fn parse_event_type<'de, T>(event_type: EventType, body: &'de str) -> Result<T>
where
    T: Deserialize<'de>,
{
    serde_json::from_str(body).map_err(|e| ServerError::EventParseError {
        event_type,
        source: e,
    })
}

fn extract_event_from_request(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(GITHUB_EVENT_HEADER)
        .and_then(|x| x.to_str().ok())
}

#[tracing::instrument(skip_all)]
pub(crate) async fn event_handler(
    req: HttpRequest,
    mut payload: web::Payload,
    ctx: web::Data<AppContext>,
) -> ActixResult<HttpResponse> {
    // Route event depending on header
    match extract_event_from_request(&req) {
        Some(event_name) => match EventType::try_from(event_name) {
            Ok(event_type) => {
                if let Ok(body) = convert_payload_to_string(&mut payload).await {
                    parse_event(&ctx, event_type, &body).await.map_err(Into::into)
                } else {
                    let event_type: &str = event_type.into();
                    Ok(HttpResponse::BadRequest().json(serde_json::json!({
                        "error": format!("Bad payload for event '{}'.", event_type)
                    })))
                }
            }
            Err(_) => {
                // Senders must not be penalized for event types this mirror
                // does not track.
                info!(event = event_name, message = "Ignoring untracked event");
                Ok(HttpResponse::Ok().body("Event ignored."))
            }
        },
        None => Ok(HttpResponse::BadRequest()
            .json(serde_json::json!({"error": "Missing event header."}))),
    }
}

/// Configure webhook handlers.
pub fn configure_webhook_handlers(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(event_handler)))
        .service(web::resource("/deploys").route(web::post().to(deploys::deploy_handler)));
}
