use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamPaperService;
use crate::models::{
    ApiResponse,
    exam_papers::requests::{ExamPaperListQuery, ExamPaperQueryParams},
};
use crate::utils::storage_error_response;

pub async fn list_exam_papers(
    service: &ExamPaperService,
    request: &HttpRequest,
    query: ExamPaperQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let (page, size) = query.pagination.normalized();

    let list_query = ExamPaperListQuery {
        page: Some(page as i64),
        size: Some(size as i64),
        teacher_id: query.teacher_id,
        search: query.search,
    };

    match storage.list_exam_papers_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Exam paper list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(e)),
    }
}
