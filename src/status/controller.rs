use actix_web::{HttpResponse, web};
use log::info;
use serde_json::json;

use crate::status::model::{RequestCounter, ServerStatus, StatusQuery, StatusResponse};
use crate::utils::config::service_name;

/// GET /status?status=available|unavailable
pub async fn check_status(
    query: web::Query<StatusQuery>,
    server_status: web::Data<ServerStatus>,
    counter: web::Data<RequestCounter>,
) -> HttpResponse {
    counter.increment();

    let was_available = server_status.is_available();
    server_status.apply(query.status.as_deref());
    if was_available != server_status.is_available() {
        info!(
            "Service availability switched to {}",
            if server_status.is_available() {
                "available"
            } else {
                "unavailable"
            }
        );
    }

    HttpResponse::Ok().json(StatusResponse::from_state(&server_status, &counter))
}

/// GET /api/stats/requests
pub async fn get_request_count(counter: web::Data<RequestCounter>) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "totalRequests": counter.get() }))
}

/// POST /api/stats/requests/reset
pub async fn reset_request_count(counter: web::Data<RequestCounter>) -> HttpResponse {
    counter.reset();
    info!("Request counter reset");
    HttpResponse::NoContent().finish()
}

/// GET /health
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Blog posts service is running",
        "httpStatusCode": 200,
        "service": service_name(),
    }))
}
