use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::ExamAttemptService;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::storage_error_response;

pub async fn get_exam_attempt(
    service: &ExamAttemptService,
    request: &HttpRequest,
    attempt_id: Uuid,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_exam_attempt_by_id(attempt_id).await {
        Ok(Some(attempt)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            attempt,
            "Exam attempt retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ExamAttemptNotFound,
            "Exam attempt not found",
        ))),
        Err(e) => Ok(storage_error_response(e)),
    }
}
