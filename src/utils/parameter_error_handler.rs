//! 请求参数解析失败时的统一响应

use actix_web::error::{InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

fn bad_parameter(kind: &str, detail: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::InvalidParameter,
        format!("Invalid {kind}: {detail}"),
    ))
}

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    debug!("JSON payload error on {}: {}", req.path(), err);
    let response = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            HttpResponse::PayloadTooLarge().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "Request body is too large",
            ))
        }
        JsonPayloadError::ContentType => HttpResponse::UnsupportedMediaType().json(
            ApiResponse::error_empty(ErrorCode::BadRequest, "Content-Type must be application/json"),
        ),
        _ => bad_parameter("JSON body", err.to_string()),
    };
    InternalError::from_response(err, response).into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    debug!("Query error on {}: {}", req.path(), err);
    let response = bad_parameter("query parameters", err.to_string());
    InternalError::from_response(err, response).into()
}

pub fn path_error_handler(err: PathError, req: &HttpRequest) -> Error {
    debug!("Path error on {}: {}", req.path(), err);
    let response = bad_parameter("path parameter", err.to_string());
    InternalError::from_response(err, response).into()
}
