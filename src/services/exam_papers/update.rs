use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::ExamPaperService;
use crate::models::{ApiResponse, ErrorCode, exam_papers::requests::UpdateExamPaperRequest};
use crate::utils::storage_error_response;
use crate::utils::validate::validate_paper_title;

pub async fn update_exam_paper(
    service: &ExamPaperService,
    request: &HttpRequest,
    paper_id: Uuid,
    update_data: UpdateExamPaperRequest,
) -> ActixResult<HttpResponse> {
    if let Some(ref title) = update_data.title
        && let Err(msg) = validate_paper_title(title)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ExamPaperTitleInvalid,
            msg,
        )));
    }

    let storage = service.get_storage(request);

    match storage.update_exam_paper(paper_id, update_data).await {
        Ok(Some(paper)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            paper,
            "Exam paper updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ExamPaperNotFound,
            "Exam paper not found",
        ))),
        Err(e) => Ok(storage_error_response(e)),
    }
}
