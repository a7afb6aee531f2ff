use super::{SeaOrmStorage, commit, now_timestamp};
use crate::entity::exam_papers::{self, Entity as ExamPapers};
use crate::entity::user_profiles::Entity as UserProfiles;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{ExamSystemError, Result};
use crate::models::{
    PaginationInfo,
    common::normalize_page,
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::{UserListResponse, UserSummary},
    },
};
use crate::storage::integrity;
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

impl SeaOrmStorage {
    /// 创建用户，邮箱重复时返回 Conflict
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let req = &req;
        self.retry
            .run("create_user", move || self.create_user_once(req))
            .await
    }

    async fn create_user_once(&self, req: &CreateUserRequest) -> Result<User> {
        let now = now_timestamp();

        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            email: Set(req.email.clone()),
            full_name: Set(req.full_name.clone()),
            role: Set(req.role.to_string()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ExamSystemError::from_db("创建用户失败", e))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: Uuid) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ExamSystemError::from_db("查询用户失败", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Users::find();

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(Column::Email.like(contains_pattern(search.trim())))
                    .add(Column::FullName.like(contains_pattern(search.trim()))),
            );
        }

        // 角色筛选
        if let Some(ref role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ExamSystemError::from_db("查询用户总数失败", e))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ExamSystemError::from_db("查询用户页数失败", e))?;

        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ExamSystemError::from_db("查询用户列表失败", e))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新用户信息
    pub async fn update_user_impl(
        &self,
        id: Uuid,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        let update = &update;
        self.retry
            .run("update_user", move || self.update_user_once(id, update))
            .await
    }

    async fn update_user_once(&self, id: Uuid, update: &UpdateUserRequest) -> Result<Option<User>> {
        let txn = self.begin().await?;

        // 角色变更需要锁住用户行，防止并发创建试卷 / 作答记录
        let Some(existing) = Users::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("查询用户失败", e))?
        else {
            return Ok(None);
        };

        if let Some(role) = update.role {
            integrity::ensure_role_change_allowed(&txn, &existing, role).await?;
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now_timestamp()),
            ..Default::default()
        };

        if let Some(ref email) = update.email {
            model.email = Set(email.clone());
        }

        if let Some(ref full_name) = update.full_name {
            model.full_name = Set(Some(full_name.clone()));
        }

        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }

        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        let result = model
            .update(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("更新用户失败", e))?;

        commit(txn).await?;
        Ok(Some(result.into_user()))
    }

    /// 删除用户及其级联子行
    pub async fn delete_user_impl(&self, id: Uuid) -> Result<bool> {
        self.retry
            .run("delete_user", move || self.delete_user_once(id))
            .await
    }

    async fn delete_user_once(&self, id: Uuid) -> Result<bool> {
        let txn = self.begin().await?;

        let existing = Users::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("查询用户失败", e))?;
        if existing.is_none() {
            return Ok(false);
        }

        integrity::delete_user_tree(&txn, &self.policies, id).await?;

        commit(txn).await?;
        Ok(true)
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| ExamSystemError::from_db("统计用户数量失败", e))
    }

    /// 用户概览：一次联表读取档案，再统计名下试卷
    pub async fn get_user_summary_impl(&self, id: Uuid) -> Result<Option<UserSummary>> {
        let Some((user, profile)) = Users::find_by_id(id)
            .find_also_related(UserProfiles)
            .one(&self.db)
            .await
            .map_err(|e| ExamSystemError::from_db("查询用户档案失败", e))?
        else {
            return Ok(None);
        };

        let total_papers = ExamPapers::find()
            .filter(exam_papers::Column::TeacherId.eq(id))
            .count(&self.db)
            .await
            .map_err(|e| ExamSystemError::from_db("统计用户试卷失败", e))?;

        Ok(Some(UserSummary {
            user: user.into_user(),
            profile: profile.map(|p| p.into_user_profile()),
            total_papers: total_papers as i64,
        }))
    }
}
