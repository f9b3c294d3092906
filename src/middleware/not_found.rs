use actix_web::middleware::ErrorHandlerResponse;
use actix_web::{HttpResponse, Result, dev::ServiceResponse};
use serde_json::json;

use crate::utils::config::service_name;

/// Replaces the body of a framework-generated error with the JSON envelope.
/// Responses that already carry an application error pass through untouched.
fn envelope<B>(
    res: ServiceResponse<B>,
    message: &str,
    error: &str,
) -> Result<ErrorHandlerResponse<B>> {
    if res.response().error().is_some() {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    let status = res.status();
    let new_response = HttpResponse::build(status).json(json!({
        "success": false,
        "message": message,
        "httpStatusCode": status.as_u16(),
        "error": error,
        "service": service_name(),
    }));
    let (req, _) = res.into_parts();
    let res = ServiceResponse::new(req, new_response.map_into_right_body());

    Ok(ErrorHandlerResponse::Response(res))
}

/// Unmatched routes.
pub fn not_found<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    envelope(res, "Route does not exist", "NOT_FOUND_ERROR")
}

/// Known path, wrong method.
pub fn method_not_allowed<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    envelope(res, "Method not allowed for this route", "METHOD_NOT_ALLOWED_ERROR")
}
