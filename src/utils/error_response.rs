//! 存储层错误到 HTTP 响应的映射

use actix_web::HttpResponse;
use tracing::{error, warn};

use crate::errors::ExamSystemError;
use crate::models::{ApiResponse, ErrorCode};

/// 把 `ExamSystemError` 转为统一的错误响应
///
/// 非客户端错误只记录日志，对外返回通用信息。
pub fn storage_error_response(err: ExamSystemError) -> HttpResponse {
    match err {
        ExamSystemError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, msg))
        }
        ExamSystemError::Validation(msg) => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidParameter, msg)),
        ExamSystemError::IntegrityViolation(msg) => HttpResponse::UnprocessableEntity().json(
            ApiResponse::error_empty(ErrorCode::IntegrityViolation, msg),
        ),
        ExamSystemError::DependentRowsExist(msg) => HttpResponse::Conflict()
            .json(ApiResponse::error_empty(ErrorCode::DependentRowsExist, msg)),
        ExamSystemError::Conflict(msg) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(ErrorCode::Conflict, msg))
        }
        ExamSystemError::DatabaseConnection(_) | ExamSystemError::TransactionConflict(_) => {
            warn!("Storage temporarily unavailable: {}", err);
            HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
                ErrorCode::ServiceUnavailable,
                "Service temporarily unavailable, please retry",
            ))
        }
        other => {
            error!("Unexpected storage error: {}", other);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Internal server error",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ExamSystemError::not_found("x"), StatusCode::NOT_FOUND),
            (ExamSystemError::validation("x"), StatusCode::BAD_REQUEST),
            (
                ExamSystemError::integrity_violation("x"),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (ExamSystemError::dependent_rows_exist("x"), StatusCode::CONFLICT),
            (ExamSystemError::conflict("x"), StatusCode::CONFLICT),
            (
                ExamSystemError::transaction_conflict("x"),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ExamSystemError::database_connection("x"),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ExamSystemError::database_operation("x"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(storage_error_response(err).status(), status);
        }
    }
}
