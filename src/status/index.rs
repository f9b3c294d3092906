use super::controller::{check_status, get_request_count, health, reset_request_count};
use actix_web::web;

pub fn status_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/status", web::get().to(check_status))
        .service(
            web::scope("/api/stats")
                .route("/requests", web::get().to(get_request_count))
                .route("/requests/reset", web::post().to(reset_request_count)),
        );
}
