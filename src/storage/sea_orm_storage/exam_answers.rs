use super::{SeaOrmStorage, commit, now_timestamp};
use crate::entity::exam_answers::{ActiveModel, Column, Entity as ExamAnswers};
use crate::entity::exam_attempts;
use crate::errors::{ExamSystemError, Result};
use crate::models::exam_answers::{
    entities::ExamAnswer,
    requests::{CreateExamAnswerRequest, UpdateExamAnswerRequest},
};
use crate::storage::integrity::{self, VirtualRelation};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

/// 已交卷的作答记录不再接受答案变更
fn ensure_not_finished(attempt: &exam_attempts::Model) -> Result<()> {
    if attempt.finished_at.is_some() {
        return Err(ExamSystemError::validation(format!(
            "Exam attempt {} is already finished",
            attempt.id
        )));
    }
    Ok(())
}

impl SeaOrmStorage {
    /// 提交答案：题目必须属于作答记录对应的试卷
    pub async fn create_exam_answer_impl(
        &self,
        attempt_id: Uuid,
        req: CreateExamAnswerRequest,
    ) -> Result<ExamAnswer> {
        let req = &req;
        self.retry
            .run("create_exam_answer", move || {
                self.create_exam_answer_once(attempt_id, req)
            })
            .await
    }

    async fn create_exam_answer_once(
        &self,
        attempt_id: Uuid,
        req: &CreateExamAnswerRequest,
    ) -> Result<ExamAnswer> {
        let txn = self.begin().await?;

        let attempt =
            integrity::require_attempt(&txn, VirtualRelation::AttemptAnswers, attempt_id).await?;
        let question =
            integrity::require_question(&txn, VirtualRelation::QuestionAnswers, req.question_id)
                .await?;

        if question.paper_id != attempt.paper_id {
            return Err(ExamSystemError::integrity_violation(format!(
                "question {} belongs to exam paper {}, but attempt {} is for exam paper {}",
                question.id, question.paper_id, attempt.id, attempt.paper_id
            )));
        }
        ensure_not_finished(&attempt)?;

        let existing = ExamAnswers::find()
            .filter(Column::AttemptId.eq(attempt_id))
            .filter(Column::QuestionId.eq(req.question_id))
            .one(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("查询答案失败", e))?;
        if existing.is_some() {
            return Err(ExamSystemError::conflict(format!(
                "Question {} is already answered in attempt {attempt_id}",
                req.question_id
            )));
        }

        let now = now_timestamp();
        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            attempt_id: Set(attempt_id),
            question_id: Set(req.question_id),
            selected_option: Set(req.selected_option.map(|o| o.to_string())),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("提交答案失败", e))?;

        commit(txn).await?;
        Ok(result.into_exam_answer())
    }

    /// 列出作答记录下的答案，作答记录不存在时返回 `NotFound`
    pub async fn list_exam_answers_by_attempt_impl(
        &self,
        attempt_id: Uuid,
    ) -> Result<Vec<ExamAnswer>> {
        let attempt = exam_attempts::Entity::find_by_id(attempt_id)
            .one(&self.db)
            .await
            .map_err(|e| ExamSystemError::from_db("查询作答记录失败", e))?;
        if attempt.is_none() {
            return Err(ExamSystemError::not_found(format!(
                "Exam attempt {attempt_id} not found"
            )));
        }

        let answers = ExamAnswers::find()
            .filter(Column::AttemptId.eq(attempt_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ExamSystemError::from_db("查询答案列表失败", e))?;

        Ok(answers.into_iter().map(|m| m.into_exam_answer()).collect())
    }

    /// 修改答案
    pub async fn update_exam_answer_impl(
        &self,
        id: Uuid,
        update: UpdateExamAnswerRequest,
    ) -> Result<Option<ExamAnswer>> {
        let update = &update;
        self.retry
            .run("update_exam_answer", move || {
                self.update_exam_answer_once(id, update)
            })
            .await
    }

    async fn update_exam_answer_once(
        &self,
        id: Uuid,
        update: &UpdateExamAnswerRequest,
    ) -> Result<Option<ExamAnswer>> {
        let txn = self.begin().await?;

        let Some(existing) = ExamAnswers::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("查询答案失败", e))?
        else {
            return Ok(None);
        };

        let attempt =
            integrity::require_attempt(&txn, VirtualRelation::AttemptAnswers, existing.attempt_id)
                .await?;
        ensure_not_finished(&attempt)?;

        let model = ActiveModel {
            id: Set(id),
            selected_option: Set(update.selected_option.map(|o| o.to_string())),
            updated_at: Set(now_timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("修改答案失败", e))?;

        commit(txn).await?;
        Ok(Some(result.into_exam_answer()))
    }

    /// 删除答案，已交卷的作答记录不允许删除
    pub async fn delete_exam_answer_impl(&self, id: Uuid) -> Result<bool> {
        self.retry
            .run("delete_exam_answer", move || self.delete_exam_answer_once(id))
            .await
    }

    async fn delete_exam_answer_once(&self, id: Uuid) -> Result<bool> {
        let txn = self.begin().await?;

        let Some(existing) = ExamAnswers::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("查询答案失败", e))?
        else {
            return Ok(false);
        };

        let attempt =
            integrity::require_attempt(&txn, VirtualRelation::AttemptAnswers, existing.attempt_id)
                .await?;
        ensure_not_finished(&attempt)?;

        let result = ExamAnswers::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("删除答案失败", e))?;

        commit(txn).await?;
        Ok(result.rows_affected > 0)
    }
}
