use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{Error, HttpRequest, web};
use log::debug;

use crate::utils::error::CustomError;

fn bad_request(kind: &str, err: impl std::fmt::Display, req: &HttpRequest) -> Error {
    debug!("Rejected {} for {}: {}", kind, req.path(), err);
    CustomError::BadRequestError(format!("Invalid {}: {}", kind, err)).into()
}

pub fn handle_json_error(err: JsonPayloadError, req: &HttpRequest) -> Error {
    bad_request("request body", err, req)
}

pub fn handle_path_error(err: PathError, req: &HttpRequest) -> Error {
    bad_request("path parameter", err, req)
}

pub fn handle_query_error(err: QueryPayloadError, req: &HttpRequest) -> Error {
    bad_request("query parameter", err, req)
}

/// Makes extractor failures answer with the same JSON envelope as every other
/// error.
pub fn extractor_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handle_json_error))
        .app_data(web::PathConfig::default().error_handler(handle_path_error))
        .app_data(web::QueryConfig::default().error_handler(handle_query_error));
}
