use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::ExamAttemptService;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::storage_error_response;

pub async fn delete_exam_attempt(
    service: &ExamAttemptService,
    request: &HttpRequest,
    attempt_id: Uuid,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_exam_attempt(attempt_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Exam attempt deleted successfully",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ExamAttemptNotFound,
            "Exam attempt not found",
        ))),
        Err(e) => Ok(storage_error_response(e)),
    }
}
