use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;
use uuid::Uuid;

use crate::models::exam_answers::requests::UpdateExamAnswerRequest;
use crate::services::ExamAnswerService;

// 懒加载的全局 ExamAnswerService 实例
static EXAM_ANSWER_SERVICE: Lazy<ExamAnswerService> = Lazy::new(ExamAnswerService::new_lazy);

pub async fn update_exam_answer(
    req: HttpRequest,
    answer_id: web::Path<Uuid>,
    update_data: web::Json<UpdateExamAnswerRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_ANSWER_SERVICE
        .update_exam_answer(&req, answer_id.into_inner(), update_data.into_inner())
        .await
}

pub async fn delete_exam_answer(
    req: HttpRequest,
    answer_id: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    EXAM_ANSWER_SERVICE
        .delete_exam_answer(&req, answer_id.into_inner())
        .await
}

// 配置路由
pub fn configure_exam_answers_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/exam-answers")
            .route("/{answer_id}", web::put().to(update_exam_answer))
            .route("/{answer_id}", web::delete().to(delete_exam_answer)),
    );
}
