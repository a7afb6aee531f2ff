pub mod batch;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::questions::requests::{CreateQuestionRequest, UpdateQuestionRequest};
use crate::storage::Storage;

pub struct QuestionService {
    storage: Option<Arc<dyn Storage>>,
}

impl QuestionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 列出试卷下的题目
    pub async fn list_questions(
        &self,
        request: &HttpRequest,
        paper_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        list::list_questions(self, request, paper_id).await
    }

    pub async fn create_question(
        &self,
        request: &HttpRequest,
        paper_id: Uuid,
        question_data: CreateQuestionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_question(self, request, paper_id, question_data).await
    }

    // 批量创建题目
    pub async fn create_questions(
        &self,
        request: &HttpRequest,
        paper_id: Uuid,
        questions: Vec<CreateQuestionRequest>,
    ) -> ActixResult<HttpResponse> {
        batch::create_questions(self, request, paper_id, questions).await
    }

    pub async fn get_question(
        &self,
        request: &HttpRequest,
        question_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        get::get_question(self, request, question_id).await
    }

    // 更新题目（可移动到其他试卷）
    pub async fn update_question(
        &self,
        request: &HttpRequest,
        question_id: Uuid,
        update_data: UpdateQuestionRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_question(self, request, question_id, update_data).await
    }

    pub async fn delete_question(
        &self,
        request: &HttpRequest,
        question_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        delete::delete_question(self, request, question_id).await
    }
}
