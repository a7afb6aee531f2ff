use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::{ExamAnswerService, attempt_finished_response};
use crate::errors::ExamSystemError;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::storage_error_response;

pub async fn delete_exam_answer(
    service: &ExamAnswerService,
    request: &HttpRequest,
    answer_id: Uuid,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_exam_answer(answer_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Answer deleted successfully",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ExamAnswerNotFound,
            "Answer not found",
        ))),
        Err(ExamSystemError::Validation(msg)) => Ok(attempt_finished_response(msg)),
        Err(e) => Ok(storage_error_response(e)),
    }
}
