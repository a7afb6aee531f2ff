pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod profile;
pub mod summary;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::users::requests::{
    CreateUserProfileRequest, CreateUserRequest, UpdateUserProfileRequest, UpdateUserRequest,
    UserListParams,
};
use crate::storage::Storage;

pub struct UserService {
    storage: Option<Arc<dyn Storage>>,
}

impl UserService {
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

    // 获取用户列表
    pub async fn list_users(
        &self,
        query: UserListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_users(self, query, request).await
    }

    // 创建用户
    pub async fn create_user(
        &self,
        user_data: CreateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_user(self, user_data, request).await
    }

    // 根据ID获取用户信息
    pub async fn get_user(&self, user_id: Uuid, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_user(self, user_id, request).await
    }

    // 更新用户信息（含角色变更）
    pub async fn update_user(
        &self,
        user_id: Uuid,
        update_data: UpdateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_user(self, user_id, update_data, request).await
    }

    // 删除用户
    pub async fn delete_user(
        &self,
        user_id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_user(self, user_id, request).await
    }

    // 用户档案
    pub async fn get_profile(
        &self,
        user_id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profile::get_profile(self, user_id, request).await
    }

    pub async fn create_profile(
        &self,
        user_id: Uuid,
        profile_data: CreateUserProfileRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profile::create_profile(self, user_id, profile_data, request).await
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        update_data: UpdateUserProfileRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profile::update_profile(self, user_id, update_data, request).await
    }

    pub async fn delete_profile(
        &self,
        user_id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profile::delete_profile(self, user_id, request).await
    }

    // 用户概览（档案 + 名下试卷总数）
    pub async fn get_user_summary(
        &self,
        user_id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        summary::get_user_summary(self, user_id, request).await
    }
}
