use super::{SeaOrmStorage, commit, now_timestamp};
use crate::entity::exam_papers::{ActiveModel, Column, Entity as ExamPapers};
use crate::entity::questions::Entity as Questions;
use crate::entity::users::Entity as Users;
use crate::errors::{ExamSystemError, Result};
use crate::models::{
    PaginationInfo,
    common::{pagination::MAX_PAGE_SIZE, normalize_page},
    exam_papers::{
        cursor::PaperCursor,
        entities::ExamPaper,
        requests::{
            CreateExamPaperRequest, ExamPaperCursorQuery, ExamPaperListQuery,
            UpdateExamPaperRequest,
        },
        responses::{ExamPaperContent, ExamPaperCursorResponse, ExamPaperListResponse},
    },
    users::entities::UserRole,
};
use crate::storage::integrity::{self, VirtualRelation};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::debug;
use uuid::Uuid;

impl SeaOrmStorage {
    /// 创建试卷，出卷人必须是已存在的教师
    pub async fn create_exam_paper_impl(&self, req: CreateExamPaperRequest) -> Result<ExamPaper> {
        let req = &req;
        self.retry
            .run("create_exam_paper", move || self.create_exam_paper_once(req))
            .await
    }

    async fn create_exam_paper_once(&self, req: &CreateExamPaperRequest) -> Result<ExamPaper> {
        let txn = self.begin().await?;

        integrity::require_user(
            &txn,
            VirtualRelation::TeacherPapers,
            req.teacher_id,
            Some(UserRole::Teacher),
        )
        .await?;

        let now = now_timestamp();
        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            teacher_id: Set(req.teacher_id),
            title: Set(req.title.trim().to_string()),
            description: Set(req.description.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("创建试卷失败", e))?;

        commit(txn).await?;
        Ok(result.into_exam_paper())
    }

    /// 通过 ID 获取试卷
    pub async fn get_exam_paper_by_id_impl(&self, id: Uuid) -> Result<Option<ExamPaper>> {
        let result = ExamPapers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ExamSystemError::from_db("查询试卷失败", e))?;

        Ok(result.map(|m| m.into_exam_paper()))
    }

    /// 分页列出试卷
    pub async fn list_exam_papers_with_pagination_impl(
        &self,
        query: ExamPaperListQuery,
    ) -> Result<ExamPaperListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = ExamPapers::find();

        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(Column::Title.like(contains_pattern(search.trim())));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ExamSystemError::from_db("查询试卷总数失败", e))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ExamSystemError::from_db("查询试卷页数失败", e))?;

        let papers = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ExamSystemError::from_db("查询试卷列表失败", e))?;

        Ok(ExamPaperListResponse {
            items: papers.into_iter().map(|m| m.into_exam_paper()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 按 (创建时间, ID) 降序的游标列出教师的试卷
    pub async fn list_teacher_exam_papers_impl(
        &self,
        teacher_id: Uuid,
        query: ExamPaperCursorQuery,
    ) -> Result<ExamPaperCursorResponse> {
        let cursor = query
            .cursor
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(str::parse::<PaperCursor>)
            .transpose()
            .map_err(ExamSystemError::validation)?;
        let limit = query.limit.unwrap_or(10).clamp(1, MAX_PAGE_SIZE) as u64;

        let teacher = Users::find_by_id(teacher_id)
            .one(&self.db)
            .await
            .map_err(|e| ExamSystemError::from_db("查询教师失败", e))?;
        if teacher.is_none() {
            return Err(ExamSystemError::not_found(format!(
                "User {teacher_id} not found"
            )));
        }

        let total = ExamPapers::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .count(&self.db)
            .await
            .map_err(|e| ExamSystemError::from_db("查询试卷总数失败", e))?;

        let mut select = ExamPapers::find().filter(Column::TeacherId.eq(teacher_id));
        if let Some(cursor) = cursor {
            select = select.filter(
                Condition::any()
                    .add(Column::CreatedAt.lt(cursor.created_at))
                    .add(
                        Condition::all()
                            .add(Column::CreatedAt.eq(cursor.created_at))
                            .add(Column::Id.lt(cursor.id)),
                    ),
            );
        }

        // 多取一条判断是否还有下一页
        let mut rows = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit + 1)
            .all(&self.db)
            .await
            .map_err(|e| ExamSystemError::from_db("查询试卷列表失败", e))?;

        let next_cursor = if rows.len() as u64 > limit {
            rows.truncate(limit as usize);
            rows.last().map(|last| {
                PaperCursor {
                    created_at: last.created_at,
                    id: last.id,
                }
                .to_string()
            })
        } else {
            None
        };

        Ok(ExamPaperCursorResponse {
            items: rows.into_iter().map(|m| m.into_exam_paper()).collect(),
            next_cursor,
            total: total as i64,
        })
    }

    /// 试卷详情：一次联表读出试卷与题目，题目按创建顺序排列
    pub async fn get_exam_paper_content_impl(
        &self,
        id: Uuid,
    ) -> Result<Option<ExamPaperContent>> {
        let mut rows = ExamPapers::find_by_id(id)
            .find_with_related(Questions)
            .all(&self.db)
            .await
            .map_err(|e| ExamSystemError::from_db("查询试卷详情失败", e))?;

        let Some((paper, mut questions)) = rows.pop() else {
            return Ok(None);
        };
        questions.sort_by_key(|q| (q.created_at, q.id));

        Ok(Some(ExamPaperContent {
            paper: paper.into_exam_paper(),
            questions: questions.into_iter().map(|m| m.into_question()).collect(),
        }))
    }

    /// 更新试卷，转交时校验新教师
    pub async fn update_exam_paper_impl(
        &self,
        id: Uuid,
        update: UpdateExamPaperRequest,
    ) -> Result<Option<ExamPaper>> {
        let update = &update;
        self.retry
            .run("update_exam_paper", move || {
                self.update_exam_paper_once(id, update)
            })
            .await
    }

    async fn update_exam_paper_once(
        &self,
        id: Uuid,
        update: &UpdateExamPaperRequest,
    ) -> Result<Option<ExamPaper>> {
        let txn = self.begin().await?;

        let existing = ExamPapers::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("查询试卷失败", e))?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now_timestamp()),
            ..Default::default()
        };

        if let Some(teacher_id) = update.teacher_id
            && teacher_id != existing.teacher_id
        {
            integrity::require_user(
                &txn,
                VirtualRelation::TeacherPapers,
                teacher_id,
                Some(UserRole::Teacher),
            )
            .await?;
            debug!(
                "Transferring exam paper {} from teacher {} to {}",
                id, existing.teacher_id, teacher_id
            );
            model.teacher_id = Set(teacher_id);
        }

        if let Some(ref title) = update.title {
            model.title = Set(title.trim().to_string());
        }

        if let Some(ref description) = update.description {
            model.description = Set(Some(description.clone()));
        }

        let result = model
            .update(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("更新试卷失败", e))?;

        commit(txn).await?;
        Ok(Some(result.into_exam_paper()))
    }

    /// 删除试卷：题目级联，已有作答记录时拒绝
    pub async fn delete_exam_paper_impl(&self, id: Uuid) -> Result<bool> {
        self.retry
            .run("delete_exam_paper", move || self.delete_exam_paper_once(id))
            .await
    }

    async fn delete_exam_paper_once(&self, id: Uuid) -> Result<bool> {
        let txn = self.begin().await?;

        let existing = ExamPapers::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("查询试卷失败", e))?;
        if existing.is_none() {
            return Ok(false);
        }

        integrity::delete_paper_tree(&txn, &self.policies, id).await?;

        commit(txn).await?;
        Ok(true)
    }
}
