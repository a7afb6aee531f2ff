use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::QuestionService;
use crate::models::{ApiResponse, ErrorCode, questions::requests::UpdateQuestionRequest};
use crate::utils::storage_error_response;
use crate::utils::validate::validate_question_content;

pub async fn update_question(
    service: &QuestionService,
    request: &HttpRequest,
    question_id: Uuid,
    update_data: UpdateQuestionRequest,
) -> ActixResult<HttpResponse> {
    // 正确答案与选项的组合由存储层按合并后的值校验
    if let Some(ref content) = update_data.content
        && let Err(msg) = validate_question_content(content)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::QuestionInvalid, msg)));
    }

    let storage = service.get_storage(request);

    match storage.update_question(question_id, update_data).await {
        Ok(Some(question)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            question,
            "Question updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuestionNotFound,
            "Question not found",
        ))),
        Err(e) => Ok(storage_error_response(e)),
    }
}
