use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::ExamAnswerService;
use crate::errors::ExamSystemError;
use crate::models::{ApiResponse, ErrorCode, exam_answers::responses::ExamAnswerListResponse};
use crate::utils::storage_error_response;

pub async fn list_exam_answers(
    service: &ExamAnswerService,
    request: &HttpRequest,
    attempt_id: Uuid,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_exam_answers_by_attempt(attempt_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ExamAnswerListResponse { items },
            "Answer list retrieved successfully",
        ))),
        Err(ExamSystemError::NotFound(_)) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::ExamAttemptNotFound, "Exam attempt not found"),
        )),
        Err(e) => Ok(storage_error_response(e)),
    }
}
