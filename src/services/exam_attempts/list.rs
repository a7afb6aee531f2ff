use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamAttemptService;
use crate::models::{
    ApiResponse,
    exam_attempts::requests::{ExamAttemptListQuery, ExamAttemptQueryParams},
};
use crate::utils::storage_error_response;

pub async fn list_exam_attempts(
    service: &ExamAttemptService,
    request: &HttpRequest,
    query: ExamAttemptQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let (page, size) = query.pagination.normalized();

    let list_query = ExamAttemptListQuery {
        page: Some(page as i64),
        size: Some(size as i64),
        student_id: query.student_id,
        paper_id: query.paper_id,
    };

    match storage.list_exam_attempts_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Exam attempt list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(e)),
    }
}
