//! Deploy ingress handlers.

use actix_web::{web, HttpResponse, Result as ActixResult};
use hubsync_core::use_cases::upserts::{DeployPayload, RecordDeployInterface};
use shaku::HasComponent;

use crate::{server::AppContext, ServerError};

#[tracing::instrument(skip_all, fields(
    git_revision = %payload.git_revision,
    repository = %payload.repository,
))]
pub(crate) async fn deploy_handler(
    payload: web::Json<DeployPayload>,
    ctx: web::Data<AppContext>,
) -> ActixResult<HttpResponse> {
    let core_ctx = ctx.as_core_context();

    let record_deploy: &dyn RecordDeployInterface = core_ctx.core_module.resolve_ref();
    let deploy = record_deploy
        .run(&core_ctx, &payload)
        .await
        .map_err(|e| ServerError::DomainError { source: e })?;

    Ok(HttpResponse::Ok().json(deploy))
}
