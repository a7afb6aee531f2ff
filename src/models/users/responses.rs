use super::entities::{User, UserProfile};
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 用户列表响应
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<User>,
}

// 用户概览：基本信息、档案与名下试卷总数
#[derive(Debug, Serialize)]
pub struct UserSummary {
    #[serde(flatten)]
    pub user: User,
    pub profile: Option<UserProfile>,
    pub total_papers: i64,
}
