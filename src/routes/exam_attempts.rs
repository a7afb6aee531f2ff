use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;
use uuid::Uuid;

use crate::models::exam_answers::requests::CreateExamAnswerRequest;
use crate::models::exam_attempts::requests::{CreateExamAttemptRequest, ExamAttemptQueryParams};
use crate::services::{ExamAnswerService, ExamAttemptService};

// 懒加载的全局服务实例
static EXAM_ATTEMPT_SERVICE: Lazy<ExamAttemptService> = Lazy::new(ExamAttemptService::new_lazy);
static EXAM_ANSWER_SERVICE: Lazy<ExamAnswerService> = Lazy::new(ExamAnswerService::new_lazy);

// HTTP处理程序
pub async fn list_exam_attempts(
    req: HttpRequest,
    query: web::Query<ExamAttemptQueryParams>,
) -> ActixResult<HttpResponse> {
    EXAM_ATTEMPT_SERVICE
        .list_exam_attempts(&req, query.into_inner())
        .await
}

pub async fn create_exam_attempt(
    req: HttpRequest,
    attempt_data: web::Json<CreateExamAttemptRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_ATTEMPT_SERVICE
        .create_exam_attempt(&req, attempt_data.into_inner())
        .await
}

pub async fn get_exam_attempt(
    req: HttpRequest,
    attempt_id: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    EXAM_ATTEMPT_SERVICE
        .get_exam_attempt(&req, attempt_id.into_inner())
        .await
}

pub async fn finish_exam_attempt(
    req: HttpRequest,
    attempt_id: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    EXAM_ATTEMPT_SERVICE
        .finish_exam_attempt(&req, attempt_id.into_inner())
        .await
}

pub async fn delete_exam_attempt(
    req: HttpRequest,
    attempt_id: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    EXAM_ATTEMPT_SERVICE
        .delete_exam_attempt(&req, attempt_id.into_inner())
        .await
}

// 作答记录下的答案
pub async fn list_exam_answers(
    req: HttpRequest,
    attempt_id: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    EXAM_ANSWER_SERVICE
        .list_exam_answers(&req, attempt_id.into_inner())
        .await
}

pub async fn create_exam_answer(
    req: HttpRequest,
    attempt_id: web::Path<Uuid>,
    answer_data: web::Json<CreateExamAnswerRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_ANSWER_SERVICE
        .create_exam_answer(&req, attempt_id.into_inner(), answer_data.into_inner())
        .await
}

// 配置路由
pub fn configure_exam_attempts_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/exam-attempts")
            .route("", web::get().to(list_exam_attempts))
            .route("", web::post().to(create_exam_attempt))
            .route("/{attempt_id}", web::get().to(get_exam_attempt))
            .route("/{attempt_id}", web::delete().to(delete_exam_attempt))
            .route("/{attempt_id}/finish", web::post().to(finish_exam_attempt))
            .route("/{attempt_id}/answers", web::get().to(list_exam_answers))
            .route("/{attempt_id}/answers", web::post().to(create_exam_answer)),
    );
}
