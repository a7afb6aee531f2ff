pub mod create;
pub mod delete;
pub mod finish;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::exam_attempts::requests::{CreateExamAttemptRequest, ExamAttemptQueryParams};
use crate::storage::Storage;

pub struct ExamAttemptService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamAttemptService {
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

    pub async fn list_exam_attempts(
        &self,
        request: &HttpRequest,
        query: ExamAttemptQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_exam_attempts(self, request, query).await
    }

    // 开始作答
    pub async fn create_exam_attempt(
        &self,
        request: &HttpRequest,
        attempt_data: CreateExamAttemptRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_exam_attempt(self, request, attempt_data).await
    }

    pub async fn get_exam_attempt(
        &self,
        request: &HttpRequest,
        attempt_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        get::get_exam_attempt(self, request, attempt_id).await
    }

    // 交卷并计分
    pub async fn finish_exam_attempt(
        &self,
        request: &HttpRequest,
        attempt_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        finish::finish_exam_attempt(self, request, attempt_id).await
    }

    pub async fn delete_exam_attempt(
        &self,
        request: &HttpRequest,
        attempt_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        delete::delete_exam_attempt(self, request, attempt_id).await
    }
}
