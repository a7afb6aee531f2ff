use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::QuestionService;
use crate::models::common::pagination::MAX_PAGE_SIZE;
use crate::models::{
    ApiResponse, ErrorCode,
    questions::{requests::CreateQuestionRequest, responses::QuestionListResponse},
};
use crate::utils::storage_error_response;
use crate::utils::validate::{validate_correct_option, validate_question_content};

fn validate_batch(questions: &[CreateQuestionRequest]) -> Result<(), String> {
    if questions.is_empty() {
        return Err("At least one question is required".to_string());
    }
    if questions.len() as i64 > MAX_PAGE_SIZE {
        return Err(format!(
            "At most {MAX_PAGE_SIZE} questions can be created at once"
        ));
    }
    for (index, question) in questions.iter().enumerate() {
        validate_question_content(&question.content)
            .and_then(|_| {
                validate_correct_option(
                    question.correct_option,
                    [
                        question.option_a.as_deref(),
                        question.option_b.as_deref(),
                        question.option_c.as_deref(),
                        question.option_d.as_deref(),
                    ],
                )
            })
            .map_err(|msg| format!("Question #{}: {msg}", index + 1))?;
    }
    Ok(())
}

pub async fn create_questions(
    service: &QuestionService,
    request: &HttpRequest,
    paper_id: Uuid,
    questions: Vec<CreateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_batch(&questions) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::QuestionInvalid, msg)));
    }

    let storage = service.get_storage(request);

    match storage.create_questions(paper_id, questions).await {
        Ok(items) => Ok(HttpResponse::Created().json(ApiResponse::success(
            QuestionListResponse { items },
            "Questions created successfully",
        ))),
        Err(e) => Ok(storage_error_response(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(content: &str) -> CreateQuestionRequest {
        CreateQuestionRequest {
            content: content.to_string(),
            option_a: Some("是".to_string()),
            option_b: None,
            option_c: None,
            option_d: None,
            correct_option: None,
        }
    }

    #[test]
    fn test_batch_size_limits() {
        assert!(validate_batch(&[]).is_err());
        assert!(validate_batch(&[question("ok")]).is_ok());

        let too_many: Vec<_> = (0..=MAX_PAGE_SIZE).map(|_| question("ok")).collect();
        assert!(validate_batch(&too_many).is_err());
    }

    #[test]
    fn test_batch_reports_offending_question() {
        let err = validate_batch(&[question("ok"), question(" ")]).expect_err("blank content");
        assert!(err.starts_with("Question #2"));
    }
}
