use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;
use uuid::Uuid;

use crate::models::exam_papers::requests::{
    CreateExamPaperRequest, ExamPaperQueryParams, UpdateExamPaperRequest,
};
use crate::models::questions::requests::CreateQuestionRequest;
use crate::services::{ExamPaperService, QuestionService};

// 懒加载的全局服务实例
static EXAM_PAPER_SERVICE: Lazy<ExamPaperService> = Lazy::new(ExamPaperService::new_lazy);
static QUESTION_SERVICE: Lazy<QuestionService> = Lazy::new(QuestionService::new_lazy);

// HTTP处理程序
pub async fn list_exam_papers(
    req: HttpRequest,
    query: web::Query<ExamPaperQueryParams>,
) -> ActixResult<HttpResponse> {
    EXAM_PAPER_SERVICE
        .list_exam_papers(&req, query.into_inner())
        .await
}

pub async fn create_exam_paper(
    req: HttpRequest,
    paper_data: web::Json<CreateExamPaperRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_PAPER_SERVICE
        .create_exam_paper(&req, paper_data.into_inner())
        .await
}

pub async fn get_exam_paper(
    req: HttpRequest,
    paper_id: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    EXAM_PAPER_SERVICE
        .get_exam_paper(&req, paper_id.into_inner())
        .await
}

pub async fn update_exam_paper(
    req: HttpRequest,
    paper_id: web::Path<Uuid>,
    update_data: web::Json<UpdateExamPaperRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_PAPER_SERVICE
        .update_exam_paper(&req, paper_id.into_inner(), update_data.into_inner())
        .await
}

pub async fn delete_exam_paper(
    req: HttpRequest,
    paper_id: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    EXAM_PAPER_SERVICE
        .delete_exam_paper(&req, paper_id.into_inner())
        .await
}

pub async fn get_exam_paper_content(
    req: HttpRequest,
    paper_id: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    EXAM_PAPER_SERVICE
        .get_exam_paper_content(&req, paper_id.into_inner())
        .await
}

// 试卷下的题目
pub async fn list_questions(
    req: HttpRequest,
    paper_id: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .list_questions(&req, paper_id.into_inner())
        .await
}

pub async fn create_question(
    req: HttpRequest,
    paper_id: web::Path<Uuid>,
    question_data: web::Json<CreateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .create_question(&req, paper_id.into_inner(), question_data.into_inner())
        .await
}

pub async fn create_questions(
    req: HttpRequest,
    paper_id: web::Path<Uuid>,
    questions: web::Json<Vec<CreateQuestionRequest>>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .create_questions(&req, paper_id.into_inner(), questions.into_inner())
        .await
}

// 配置路由
pub fn configure_exam_papers_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/exam-papers")
            .route("", web::get().to(list_exam_papers))
            .route("", web::post().to(create_exam_paper))
            .route("/{paper_id}", web::get().to(get_exam_paper))
            .route("/{paper_id}", web::put().to(update_exam_paper))
            .route("/{paper_id}", web::delete().to(delete_exam_paper))
            .route("/{paper_id}/content", web::get().to(get_exam_paper_content))
            .route("/{paper_id}/questions", web::get().to(list_questions))
            .route("/{paper_id}/questions", web::post().to(create_question))
            .route("/{paper_id}/questions/batch", web::post().to(create_questions)),
    );
}
