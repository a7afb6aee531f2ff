use super::{SeaOrmStorage, commit, now_timestamp};
use crate::entity::exam_answers::{Column as AnswerColumn, Entity as ExamAnswers};
use crate::entity::exam_papers::Entity as ExamPapers;
use crate::entity::questions::{ActiveModel, Column, Entity as Questions};
use crate::errors::{ExamSystemError, Result};
use crate::models::questions::{
    entities::Question,
    requests::{CreateQuestionRequest, UpdateQuestionRequest},
};
use crate::storage::integrity::{self, VirtualRelation};
use crate::utils::validate::validate_correct_option;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

impl SeaOrmStorage {
    /// 在试卷下创建题目
    pub async fn create_question_impl(
        &self,
        paper_id: Uuid,
        req: CreateQuestionRequest,
    ) -> Result<Question> {
        let req = &req;
        self.retry
            .run("create_question", move || {
                self.create_question_once(paper_id, req)
            })
            .await
    }

    async fn create_question_once(
        &self,
        paper_id: Uuid,
        req: &CreateQuestionRequest,
    ) -> Result<Question> {
        let txn = self.begin().await?;

        integrity::require_paper(&txn, VirtualRelation::PaperQuestions, paper_id).await?;

        let now = now_timestamp();
        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            paper_id: Set(paper_id),
            content: Set(req.content.clone()),
            option_a: Set(req.option_a.clone()),
            option_b: Set(req.option_b.clone()),
            option_c: Set(req.option_c.clone()),
            option_d: Set(req.option_d.clone()),
            correct_option: Set(req.correct_option.map(|o| o.to_string())),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("创建题目失败", e))?;

        commit(txn).await?;
        Ok(result.into_question())
    }

    /// 批量创建题目：一次校验试卷，在同一事务内全部写入
    pub async fn create_questions_impl(
        &self,
        paper_id: Uuid,
        reqs: Vec<CreateQuestionRequest>,
    ) -> Result<Vec<Question>> {
        let reqs = &reqs;
        self.retry
            .run("create_questions", move || {
                self.create_questions_once(paper_id, reqs)
            })
            .await
    }

    async fn create_questions_once(
        &self,
        paper_id: Uuid,
        reqs: &[CreateQuestionRequest],
    ) -> Result<Vec<Question>> {
        let txn = self.begin().await?;

        integrity::require_paper(&txn, VirtualRelation::PaperQuestions, paper_id).await?;

        let now = now_timestamp();
        let mut created = Vec::with_capacity(reqs.len());
        for req in reqs {
            let model = ActiveModel {
                id: Set(Uuid::now_v7()),
                paper_id: Set(paper_id),
                content: Set(req.content.clone()),
                option_a: Set(req.option_a.clone()),
                option_b: Set(req.option_b.clone()),
                option_c: Set(req.option_c.clone()),
                option_d: Set(req.option_d.clone()),
                correct_option: Set(req.correct_option.map(|o| o.to_string())),
                created_at: Set(now),
                updated_at: Set(now),
            };
            let result = model
                .insert(&txn)
                .await
                .map_err(|e| ExamSystemError::from_db("批量创建题目失败", e))?;
            created.push(result.into_question());
        }

        commit(txn).await?;
        Ok(created)
    }

    /// 通过 ID 获取题目
    pub async fn get_question_by_id_impl(&self, id: Uuid) -> Result<Option<Question>> {
        let result = Questions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ExamSystemError::from_db("查询题目失败", e))?;

        Ok(result.map(|m| m.into_question()))
    }

    /// 按创建顺序列出试卷下的题目，试卷不存在时返回 `NotFound`
    pub async fn list_questions_by_paper_impl(&self, paper_id: Uuid) -> Result<Vec<Question>> {
        let paper = ExamPapers::find_by_id(paper_id)
            .one(&self.db)
            .await
            .map_err(|e| ExamSystemError::from_db("查询试卷失败", e))?;
        if paper.is_none() {
            return Err(ExamSystemError::not_found(format!(
                "Exam paper {paper_id} not found"
            )));
        }

        let questions = Questions::find()
            .filter(Column::PaperId.eq(paper_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ExamSystemError::from_db("查询题目列表失败", e))?;

        Ok(questions.into_iter().map(|m| m.into_question()).collect())
    }

    /// 更新题目，移动到其他试卷时校验目标试卷
    pub async fn update_question_impl(
        &self,
        id: Uuid,
        update: UpdateQuestionRequest,
    ) -> Result<Option<Question>> {
        let update = &update;
        self.retry
            .run("update_question", move || self.update_question_once(id, update))
            .await
    }

    async fn update_question_once(
        &self,
        id: Uuid,
        update: &UpdateQuestionRequest,
    ) -> Result<Option<Question>> {
        let txn = self.begin().await?;

        let Some(existing) = Questions::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("查询题目失败", e))?
        else {
            return Ok(None);
        };

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now_timestamp()),
            ..Default::default()
        };

        if let Some(paper_id) = update.paper_id
            && paper_id != existing.paper_id
        {
            integrity::require_paper(&txn, VirtualRelation::PaperQuestions, paper_id).await?;

            // 已被作答的题目不能离开原试卷，否则答案会指向别的试卷的题目
            let answers = ExamAnswers::find()
                .filter(AnswerColumn::QuestionId.eq(id))
                .count(&txn)
                .await
                .map_err(|e| ExamSystemError::from_db("查询题目答案失败", e))?;
            if answers > 0 {
                return Err(ExamSystemError::dependent_rows_exist(format!(
                    "question {id} cannot move to another paper: {answers} row(s) still reference it via {}",
                    VirtualRelation::QuestionAnswers.reference()
                )));
            }
            model.paper_id = Set(paper_id);
        }

        let option_a = update.option_a.clone().or(existing.option_a);
        let option_b = update.option_b.clone().or(existing.option_b);
        let option_c = update.option_c.clone().or(existing.option_c);
        let option_d = update.option_d.clone().or(existing.option_d);
        let correct_option = update.correct_option.or(existing
            .correct_option
            .as_deref()
            .and_then(|o| o.parse().ok()));

        validate_correct_option(
            correct_option,
            [
                option_a.as_deref(),
                option_b.as_deref(),
                option_c.as_deref(),
                option_d.as_deref(),
            ],
        )
        .map_err(ExamSystemError::validation)?;

        if let Some(ref content) = update.content {
            model.content = Set(content.clone());
        }
        model.option_a = Set(option_a);
        model.option_b = Set(option_b);
        model.option_c = Set(option_c);
        model.option_d = Set(option_d);
        model.correct_option = Set(correct_option.map(|o| o.to_string()));

        let result = model
            .update(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("更新题目失败", e))?;

        commit(txn).await?;
        Ok(Some(result.into_question()))
    }

    /// 删除题目，已有答案时拒绝
    pub async fn delete_question_impl(&self, id: Uuid) -> Result<bool> {
        self.retry
            .run("delete_question", move || self.delete_question_once(id))
            .await
    }

    async fn delete_question_once(&self, id: Uuid) -> Result<bool> {
        let txn = self.begin().await?;

        let existing = Questions::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("查询题目失败", e))?;
        if existing.is_none() {
            return Ok(false);
        }

        integrity::delete_question_tree(&txn, &self.policies, id).await?;

        commit(txn).await?;
        Ok(true)
    }
}
