use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::QuestionService;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::storage_error_response;

pub async fn get_question(
    service: &QuestionService,
    request: &HttpRequest,
    question_id: Uuid,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_question_by_id(question_id).await {
        Ok(Some(question)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            question,
            "Question retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuestionNotFound,
            "Question not found",
        ))),
        Err(e) => Ok(storage_error_response(e)),
    }
}
