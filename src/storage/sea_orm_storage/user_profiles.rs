use super::{SeaOrmStorage, commit, now_timestamp};
use crate::entity::user_profiles::{ActiveModel, Column, Entity as UserProfiles};
use crate::errors::{ExamSystemError, Result};
use crate::models::users::{
    entities::UserProfile,
    requests::{CreateUserProfileRequest, UpdateUserProfileRequest},
};
use crate::storage::integrity::{self, VirtualRelation};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set};
use uuid::Uuid;

impl SeaOrmStorage {
    /// 创建用户档案（一对一，已存在时返回 Conflict）
    pub async fn create_user_profile_impl(
        &self,
        user_id: Uuid,
        req: CreateUserProfileRequest,
    ) -> Result<UserProfile> {
        let req = &req;
        self.retry
            .run("create_user_profile", move || {
                self.create_user_profile_once(user_id, req)
            })
            .await
    }

    async fn create_user_profile_once(
        &self,
        user_id: Uuid,
        req: &CreateUserProfileRequest,
    ) -> Result<UserProfile> {
        let txn = self.begin().await?;

        integrity::require_user(&txn, VirtualRelation::UserProfile, user_id, None).await?;

        let existing = UserProfiles::find()
            .filter(Column::UserId.eq(user_id))
            .one(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("查询用户档案失败", e))?;
        if existing.is_some() {
            return Err(ExamSystemError::conflict(format!(
                "User {user_id} already has a profile"
            )));
        }

        let now = now_timestamp();
        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            bio: Set(req.bio.clone()),
            avatar_url: Set(req.avatar_url.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // 并发创建由 user_id 唯一索引兜底，冲突同样归为 Conflict
        let result = model
            .insert(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("创建用户档案失败", e))?;

        commit(txn).await?;
        Ok(result.into_user_profile())
    }

    /// 获取用户档案
    pub async fn get_user_profile_impl(&self, user_id: Uuid) -> Result<Option<UserProfile>> {
        let result = UserProfiles::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| ExamSystemError::from_db("查询用户档案失败", e))?;

        Ok(result.map(|m| m.into_user_profile()))
    }

    /// 更新用户档案
    pub async fn update_user_profile_impl(
        &self,
        user_id: Uuid,
        update: UpdateUserProfileRequest,
    ) -> Result<Option<UserProfile>> {
        let update = &update;
        self.retry
            .run("update_user_profile", move || {
                self.update_user_profile_once(user_id, update)
            })
            .await
    }

    async fn update_user_profile_once(
        &self,
        user_id: Uuid,
        update: &UpdateUserProfileRequest,
    ) -> Result<Option<UserProfile>> {
        let txn = self.begin().await?;

        let Some(existing) = UserProfiles::find()
            .filter(Column::UserId.eq(user_id))
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("查询用户档案失败", e))?
        else {
            return Ok(None);
        };

        let mut model = ActiveModel {
            id: Set(existing.id),
            updated_at: Set(now_timestamp()),
            ..Default::default()
        };

        if let Some(ref bio) = update.bio {
            model.bio = Set(Some(bio.clone()));
        }

        if let Some(ref avatar_url) = update.avatar_url {
            model.avatar_url = Set(Some(avatar_url.clone()));
        }

        let result = model
            .update(&txn)
            .await
            .map_err(|e| ExamSystemError::from_db("更新用户档案失败", e))?;

        commit(txn).await?;
        Ok(Some(result.into_user_profile()))
    }

    /// 删除用户档案（档案没有子行，直接删除）
    pub async fn delete_user_profile_impl(&self, user_id: Uuid) -> Result<bool> {
        self.retry
            .run("delete_user_profile", move || async move {
                let result = UserProfiles::delete_many()
                    .filter(Column::UserId.eq(user_id))
                    .exec(&self.db)
                    .await
                    .map_err(|e| ExamSystemError::from_db("删除用户档案失败", e))?;
                Ok(result.rows_affected > 0)
            })
            .await
    }
}
