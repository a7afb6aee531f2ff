use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ExamPaperService;
use crate::models::{ApiResponse, ErrorCode, exam_papers::requests::CreateExamPaperRequest};
use crate::utils::storage_error_response;
use crate::utils::validate::validate_paper_title;

pub async fn create_exam_paper(
    service: &ExamPaperService,
    request: &HttpRequest,
    paper_data: CreateExamPaperRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_paper_title(&paper_data.title) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ExamPaperTitleInvalid,
            msg,
        )));
    }

    let storage = service.get_storage(request);

    match storage.create_exam_paper(paper_data).await {
        Ok(paper) => {
            info!(
                "Exam paper {} created by teacher {}",
                paper.id, paper.teacher_id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(paper, "Exam paper created successfully")))
        }
        Err(e) => Ok(storage_error_response(e)),
    }
}
