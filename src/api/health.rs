use actix_web::{HttpResponse, Responder, web};
use serde_json::json;

use crate::store::RecordStore;

/// Store connectivity status. Always answers 200; a degraded store is
/// reported in the body, never as a failed request.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Connectivity report", body = Object, example = json!({
            "status": "healthy",
            "database": "connected"
        }))
    ),
    tag = "Health"
)]
pub async fn health(store: web::Data<dyn RecordStore>) -> impl Responder {
    match store.ping().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "healthy",
            "database": "connected"
        })),
        Err(e) => HttpResponse::Ok().json(json!({
            "status": "unhealthy",
            "database": "disconnected",
            "error": e.to_string()
        })),
    }
}
