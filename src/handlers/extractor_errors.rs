//! Rejections produced by actix extractors, reshaped into `ErrorDetails` bodies.

use actix_web::error::{InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};

use crate::models::common::ErrorDetails;

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    tracing::warn!("Rejected JSON payload: {}", err);
    let response = HttpResponse::BadRequest().json(ErrorDetails::new(err.to_string()));
    InternalError::from_response(err, response).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    tracing::warn!("Rejected query string: {}", err);
    let response = HttpResponse::BadRequest().json(ErrorDetails::new(err.to_string()));
    InternalError::from_response(err, response).into()
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> Error {
    tracing::warn!("Rejected path parameter: {}", err);
    let response = HttpResponse::BadRequest().json(ErrorDetails::new(err.to_string()));
    InternalError::from_response(err, response).into()
}
