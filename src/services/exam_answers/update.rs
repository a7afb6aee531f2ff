use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::{ExamAnswerService, attempt_finished_response};
use crate::errors::ExamSystemError;
use crate::models::{ApiResponse, ErrorCode, exam_answers::requests::UpdateExamAnswerRequest};
use crate::utils::storage_error_response;

pub async fn update_exam_answer(
    service: &ExamAnswerService,
    request: &HttpRequest,
    answer_id: Uuid,
    update_data: UpdateExamAnswerRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.update_exam_answer(answer_id, update_data).await {
        Ok(Some(answer)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            answer,
            "Answer updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ExamAnswerNotFound,
            "Answer not found",
        ))),
        Err(ExamSystemError::Validation(msg)) => Ok(attempt_finished_response(msg)),
        Err(e) => Ok(storage_error_response(e)),
    }
}
