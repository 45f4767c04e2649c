use actix_web::{http::StatusCode, web, HttpResponse, Responder};

use crate::server::AppContext;

pub async fn health_check_route(ctx: web::Data<AppContext>) -> impl Responder {
    let database_status = ctx.db_service.health_check().await.is_ok();
    let lock_status = ctx.lock_service.health_check().await.is_ok();
    let all_good = database_status && lock_status;
    let status_code = if all_good {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    HttpResponse::build(status_code).json(serde_json::json!({
        "database": database_status,
        "lock": lock_status,
    }))
}
