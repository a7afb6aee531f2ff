use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::QuestionService;
use crate::errors::ExamSystemError;
use crate::models::{ApiResponse, ErrorCode, questions::responses::QuestionListResponse};
use crate::utils::storage_error_response;

pub async fn list_questions(
    service: &QuestionService,
    request: &HttpRequest,
    paper_id: Uuid,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_questions_by_paper(paper_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            QuestionListResponse { items },
            "Question list retrieved successfully",
        ))),
        // 试卷不存在时返回 404，而不是空列表
        Err(ExamSystemError::NotFound(_)) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::ExamPaperNotFound, "Exam paper not found"),
        )),
        Err(e) => Ok(storage_error_response(e)),
    }
}
