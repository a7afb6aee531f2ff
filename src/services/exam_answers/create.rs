use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::{ExamAnswerService, attempt_finished_response};
use crate::errors::ExamSystemError;
use crate::models::{ApiResponse, ErrorCode, exam_answers::requests::CreateExamAnswerRequest};
use crate::utils::storage_error_response;

pub async fn create_exam_answer(
    service: &ExamAnswerService,
    request: &HttpRequest,
    attempt_id: Uuid,
    answer_data: CreateExamAnswerRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.create_exam_answer(attempt_id, answer_data).await {
        Ok(answer) => Ok(HttpResponse::Created().json(ApiResponse::success(
            answer,
            "Answer submitted successfully",
        ))),
        Err(ExamSystemError::Validation(msg)) => Ok(attempt_finished_response(msg)),
        Err(ExamSystemError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::ExamAnswerAlreadyExists, msg),
        )),
        Err(e) => Ok(storage_error_response(e)),
    }
}
