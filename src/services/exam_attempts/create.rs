use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ExamAttemptService;
use crate::errors::ExamSystemError;
use crate::models::{ApiResponse, ErrorCode, exam_attempts::requests::CreateExamAttemptRequest};
use crate::utils::storage_error_response;

pub async fn create_exam_attempt(
    service: &ExamAttemptService,
    request: &HttpRequest,
    attempt_data: CreateExamAttemptRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.create_exam_attempt(attempt_data).await {
        Ok(attempt) => {
            info!(
                "Student {} started exam paper {} (attempt {})",
                attempt.student_id, attempt.paper_id, attempt.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                attempt,
                "Exam attempt started successfully",
            )))
        }
        Err(ExamSystemError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::ExamAttemptAlreadyExists, msg),
        )),
        Err(e) => Ok(storage_error_response(e)),
    }
}
