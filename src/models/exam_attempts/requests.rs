use serde::Deserialize;
use uuid::Uuid;

use crate::models::common::PaginationQuery;

// 作答记录查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct ExamAttemptQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub student_id: Option<Uuid>,
    pub paper_id: Option<Uuid>,
}

// 开始作答请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExamAttemptRequest {
    pub paper_id: Uuid,
    pub student_id: Uuid,
}

// 作答记录列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct ExamAttemptListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<Uuid>,
    pub paper_id: Option<Uuid>,
}
