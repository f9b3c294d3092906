use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, web};

use crate::status::model::ServerStatus;

const INDEX_HTML: &str = include_str!("../../static/index.html");
const UNAVAILABLE_HTML: &str = include_str!("../../static/unavailable.html");
const SCRIPT_JS: &str = include_str!("../../static/script.js");
const STYLES_CSS: &str = include_str!("../../static/styles.css");

/// GET /
pub async fn index(server_status: web::Data<ServerStatus>) -> HttpResponse {
    if !server_status.is_available() {
        return HttpResponse::ServiceUnavailable()
            .content_type(ContentType::html())
            .body(UNAVAILABLE_HTML);
    }

    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX_HTML)
}

/// GET /static/script.js
pub async fn script() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/javascript; charset=utf-8")
        .body(SCRIPT_JS)
}

/// GET /static/styles.css
pub async fn styles() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/css; charset=utf-8")
        .body(STYLES_CSS)
}

pub fn frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/static/script.js", web::get().to(script))
        .route("/static/styles.css", web::get().to(styles));
}
