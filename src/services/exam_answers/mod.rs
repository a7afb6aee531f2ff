pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::exam_answers::requests::{CreateExamAnswerRequest, UpdateExamAnswerRequest};
use crate::storage::Storage;

pub struct ExamAnswerService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamAnswerService {
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

    // 列出作答记录下的答案
    pub async fn list_exam_answers(
        &self,
        request: &HttpRequest,
        attempt_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        list::list_exam_answers(self, request, attempt_id).await
    }

    // 提交答案
    pub async fn create_exam_answer(
        &self,
        request: &HttpRequest,
        attempt_id: Uuid,
        answer_data: CreateExamAnswerRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_exam_answer(self, request, attempt_id, answer_data).await
    }

    pub async fn update_exam_answer(
        &self,
        request: &HttpRequest,
        answer_id: Uuid,
        update_data: UpdateExamAnswerRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_exam_answer(self, request, answer_id, update_data).await
    }

    pub async fn delete_exam_answer(
        &self,
        request: &HttpRequest,
        answer_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        delete::delete_exam_answer(self, request, answer_id).await
    }
}

/// 已交卷的作答记录拒绝答案变更时的响应
pub(crate) fn attempt_finished_response(msg: String) -> HttpResponse {
    HttpResponse::BadRequest().json(crate::models::ApiResponse::error_empty(
        crate::models::ErrorCode::ExamAttemptFinished,
        msg,
    ))
}
