pub mod content;
pub mod create;
pub mod cursor;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::exam_papers::requests::{
    CreateExamPaperRequest, ExamPaperCursorQuery, ExamPaperQueryParams, UpdateExamPaperRequest,
};
use crate::storage::Storage;

pub struct ExamPaperService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamPaperService {
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

    // 获取试卷列表
    pub async fn list_exam_papers(
        &self,
        request: &HttpRequest,
        query: ExamPaperQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_exam_papers(self, request, query).await
    }

    pub async fn create_exam_paper(
        &self,
        request: &HttpRequest,
        paper_data: CreateExamPaperRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_exam_paper(self, request, paper_data).await
    }

    pub async fn get_exam_paper(
        &self,
        request: &HttpRequest,
        paper_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        get::get_exam_paper(self, request, paper_id).await
    }

    // 试卷详情（含题目）
    pub async fn get_exam_paper_content(
        &self,
        request: &HttpRequest,
        paper_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        content::get_exam_paper_content(self, request, paper_id).await
    }

    // 按游标列出教师的试卷
    pub async fn list_teacher_exam_papers(
        &self,
        request: &HttpRequest,
        teacher_id: Uuid,
        query: ExamPaperCursorQuery,
    ) -> ActixResult<HttpResponse> {
        cursor::list_teacher_exam_papers(self, request, teacher_id, query).await
    }

    // 更新试卷（可转交给其他教师）
    pub async fn update_exam_paper(
        &self,
        request: &HttpRequest,
        paper_id: Uuid,
        update_data: UpdateExamPaperRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_exam_paper(self, request, paper_id, update_data).await
    }

    pub async fn delete_exam_paper(
        &self,
        request: &HttpRequest,
        paper_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        delete::delete_exam_paper(self, request, paper_id).await
    }
}
