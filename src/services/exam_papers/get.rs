use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::ExamPaperService;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::storage_error_response;

pub async fn get_exam_paper(
    service: &ExamPaperService,
    request: &HttpRequest,
    paper_id: Uuid,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_exam_paper_by_id(paper_id).await {
        Ok(Some(paper)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            paper,
            "Exam paper retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ExamPaperNotFound,
            "Exam paper not found",
        ))),
        Err(e) => Ok(storage_error_response(e)),
    }
}
