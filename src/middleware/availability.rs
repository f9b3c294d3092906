use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::{Error, ResponseError, web};

use crate::status::model::{RequestCounter, ServerStatus};
use crate::utils::error::CustomError;

/// Counts every API request and short-circuits with 503 while the service is
/// switched off.
pub async fn availability_gate(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    if let Some(counter) = req.app_data::<web::Data<RequestCounter>>() {
        counter.increment();
    }

    let available = req
        .app_data::<web::Data<ServerStatus>>()
        .map(|status| status.is_available())
        .unwrap_or(true);

    if !available {
        let response = CustomError::ServiceUnavailableError(
            "Service temporarily unavailable. Please try again later.".to_string(),
        )
        .error_response();
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req)
        .await
        .map(ServiceResponse::map_into_left_body)
}
