use serde::Deserialize;

use super::entities::UserRole;
use crate::models::common::PaginationQuery;

// 创建用户请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub full_name: Option<String>,
    pub role: UserRole,
}

// 更新用户请求
//
// 角色变更会校验该用户名下的试卷 / 作答记录，见 storage::integrity
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

// 用户列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct UserListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub role: Option<UserRole>,
    pub search: Option<String>,
}

// 用户列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub role: Option<UserRole>,
    pub search: Option<String>,
}

// 创建用户档案请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserProfileRequest {
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

// 更新用户档案请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserProfileRequest {
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}
