use super::entities::ExamAttempt;
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 作答记录列表响应
#[derive(Debug, Serialize)]
pub struct ExamAttemptListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<ExamAttempt>,
}
