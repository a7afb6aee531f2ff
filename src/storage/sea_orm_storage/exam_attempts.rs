use super::{SeaOrmStorage, commit, now_timestamp};
use crate::entity::exam_answers::{Column as AnswerColumn, Entity as ExamAnswers};
use crate::entity::exam_attempts::{ActiveModel, Column, Entity as ExamAttempts};
use crate::entity::questions::Entity as Questions;
use crate::errors::{ExamSystemError, Result};
use crate::models::{
    PaginationInfo,
    common::normalize_page,
    exam_attempts::{
        entities::ExamAttempt,
        requests::{CreateExamAttemptRequest, ExamAttemptListQuery},
        responses::ExamAttemptListResponse,
    },
    users::entities::UserRole,
};
use crate::storage::integrity::{self, VirtualRelation};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tracing::info;
use uuid::Uuid;

impl SeaOrmStorage {
    /// 开始作答：试卷与学生都必须存在，同一学生对同一试卷只能作答一次
    pub async fn create_exam_attempt_impl(
        &self,
        req: CreateExamAttemptRequest,
    ) -> Result<ExamAttempt> {
        let req = &req;
        self.retry
            .run("create_exam_attempt", move || {
                self.create_exam_attempt_once(req)
            })
            .await
    }

    async fn create_exam_attempt_once(&self, req: &CreateExamAttemptRequest) -> Result<ExamAttempt> {
        let txn = self.begin().await?;

        integrity::require_paper(&txn, VirtualRelation::PaperAttempts, req.paper_id).await?;
        integrity::require_user(
            &txn,
            VirtualRelation::StudentAttempts,
            req.student_id,
            Some(UserRole::Student),
        )
        .await?;

        let existing = ExamAttempts::find()
            .filter(Column::PaperId.eq(req.paper_id))
            .filter(Column::StudentId.eq(req.student_id))
            .one(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("查询作答记录失败", e))?;
        if existing.is_some() {
            return Err(ExamSystemError::conflict(format!(
                "Student {} already has an attempt for exam paper {}",
                req.student_id, req.paper_id
            )));
        }

        let now = now_timestamp();
        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            paper_id: Set(req.paper_id),
            student_id: Set(req.student_id),
            started_at: Set(now),
            finished_at: Set(None),
            score: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("创建作答记录失败", e))?;

        commit(txn).await?;
        Ok(result.into_exam_attempt())
    }

    /// 通过 ID 获取作答记录
    pub async fn get_exam_attempt_by_id_impl(&self, id: Uuid) -> Result<Option<ExamAttempt>> {
        let result = ExamAttempts::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ExamSystemError::from_db("查询作答记录失败", e))?;

        Ok(result.map(|m| m.into_exam_attempt()))
    }

    /// 分页列出作答记录
    pub async fn list_exam_attempts_with_pagination_impl(
        &self,
        query: ExamAttemptListQuery,
    ) -> Result<ExamAttemptListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = ExamAttempts::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        if let Some(paper_id) = query.paper_id {
            select = select.filter(Column::PaperId.eq(paper_id));
        }

        select = select.order_by_desc(Column::StartedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ExamSystemError::from_db("查询作答记录总数失败", e))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ExamSystemError::from_db("查询作答记录页数失败", e))?;

        let attempts = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ExamSystemError::from_db("查询作答记录列表失败", e))?;

        Ok(ExamAttemptListResponse {
            items: attempts
                .into_iter()
                .map(|m| m.into_exam_attempt())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 交卷：记录完成时间并按正确答案计分
    pub async fn finish_exam_attempt_impl(&self, id: Uuid) -> Result<Option<ExamAttempt>> {
        self.retry
            .run("finish_exam_attempt", move || self.finish_exam_attempt_once(id))
            .await
    }

    async fn finish_exam_attempt_once(&self, id: Uuid) -> Result<Option<ExamAttempt>> {
        let txn = self.begin().await?;

        let Some(existing) = ExamAttempts::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("查询作答记录失败", e))?
        else {
            return Ok(None);
        };

        if existing.finished_at.is_some() {
            return Err(ExamSystemError::validation(format!(
                "Exam attempt {id} is already finished"
            )));
        }

        let answers = ExamAnswers::find()
            .filter(AnswerColumn::AttemptId.eq(id))
            .find_also_related(Questions)
            .all(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("查询作答答案失败", e))?;

        let correct = answers
            .iter()
            .filter(|(answer, question)| match (answer.selected_option.as_deref(), question) {
                (Some(selected), Some(question)) => {
                    question.correct_option.as_deref() == Some(selected)
                }
                _ => false,
            })
            .count();

        let now = now_timestamp();
        let model = ActiveModel {
            id: Set(id),
            finished_at: Set(Some(now)),
            score: Set(Some(correct as f64)),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .update(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("更新作答记录失败", e))?;

        commit(txn).await?;
        info!(
            "Exam attempt {} finished with {}/{} correct answers",
            id,
            correct,
            answers.len()
        );
        Ok(Some(result.into_exam_attempt()))
    }

    /// 删除作答记录及其答案
    pub async fn delete_exam_attempt_impl(&self, id: Uuid) -> Result<bool> {
        self.retry
            .run("delete_exam_attempt", move || self.delete_exam_attempt_once(id))
            .await
    }

    async fn delete_exam_attempt_once(&self, id: Uuid) -> Result<bool> {
        let txn = self.begin().await?;

        let existing = ExamAttempts::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("查询作答记录失败", e))?;
        if existing.is_none() {
            return Ok(false);
        }

        integrity::delete_attempt_tree(&txn, &self.policies, id).await?;

        commit(txn).await?;
        Ok(true)
    }
}
