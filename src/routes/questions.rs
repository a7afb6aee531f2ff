use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;
use uuid::Uuid;

use crate::models::questions::requests::UpdateQuestionRequest;
use crate::services::QuestionService;

// 懒加载的全局 QuestionService 实例
static QUESTION_SERVICE: Lazy<QuestionService> = Lazy::new(QuestionService::new_lazy);

pub async fn get_question(
    req: HttpRequest,
    question_id: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .get_question(&req, question_id.into_inner())
        .await
}

pub async fn update_question(
    req: HttpRequest,
    question_id: web::Path<Uuid>,
    update_data: web::Json<UpdateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .update_question(&req, question_id.into_inner(), update_data.into_inner())
        .await
}

pub async fn delete_question(
    req: HttpRequest,
    question_id: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .delete_question(&req, question_id.into_inner())
        .await
}

// 配置路由
pub fn configure_questions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/questions")
            .route("/{question_id}", web::get().to(get_question))
            .route("/{question_id}", web::put().to(update_question))
            .route("/{question_id}", web::delete().to(delete_question)),
    );
}
