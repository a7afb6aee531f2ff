use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::QuestionService;
use crate::models::{ApiResponse, ErrorCode, questions::requests::CreateQuestionRequest};
use crate::utils::storage_error_response;
use crate::utils::validate::{validate_correct_option, validate_question_content};

pub async fn create_question(
    service: &QuestionService,
    request: &HttpRequest,
    paper_id: Uuid,
    question_data: CreateQuestionRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_question_content(&question_data.content).and_then(|_| {
        validate_correct_option(
            question_data.correct_option,
            [
                question_data.option_a.as_deref(),
                question_data.option_b.as_deref(),
                question_data.option_c.as_deref(),
                question_data.option_d.as_deref(),
            ],
        )
    }) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::QuestionInvalid, msg)));
    }

    let storage = service.get_storage(request);

    match storage.create_question(paper_id, question_data).await {
        Ok(question) => Ok(HttpResponse::Created().json(ApiResponse::success(
            question,
            "Question created successfully",
        ))),
        Err(e) => Ok(storage_error_response(e)),
    }
}
