use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::ExamPaperService;
use crate::errors::ExamSystemError;
use crate::models::{ApiResponse, ErrorCode, exam_papers::requests::ExamPaperCursorQuery};
use crate::utils::storage_error_response;

pub async fn list_teacher_exam_papers(
    service: &ExamPaperService,
    request: &HttpRequest,
    teacher_id: Uuid,
    query: ExamPaperCursorQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_teacher_exam_papers(teacher_id, query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Exam paper list retrieved successfully",
        ))),
        Err(ExamSystemError::NotFound(_)) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::UserNotFound, "User not found"),
        )),
        Err(e) => Ok(storage_error_response(e)),
    }
}
