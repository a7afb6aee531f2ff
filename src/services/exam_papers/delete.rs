use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;
use uuid::Uuid;

use super::ExamPaperService;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::storage_error_response;

pub async fn delete_exam_paper(
    service: &ExamPaperService,
    request: &HttpRequest,
    paper_id: Uuid,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_exam_paper(paper_id).await {
        Ok(true) => {
            info!("Exam paper {} deleted with its questions", paper_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Exam paper deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ExamPaperNotFound,
            "Exam paper not found",
        ))),
        Err(e) => Ok(storage_error_response(e)),
    }
}
