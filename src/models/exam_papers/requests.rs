use serde::Deserialize;
use uuid::Uuid;

use crate::models::common::PaginationQuery;

// 试卷查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct ExamPaperQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub teacher_id: Option<Uuid>,
    pub search: Option<String>,
}

// 创建试卷请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExamPaperRequest {
    pub teacher_id: Uuid,
    pub title: String,
    pub description: Option<String>,
}

// 更新试卷请求
//
// 指定 teacher_id 即为转交试卷，新教师同样要通过存在性校验
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateExamPaperRequest {
    pub teacher_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
}

// 试卷列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct ExamPaperListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub teacher_id: Option<Uuid>,
    pub search: Option<String>,
}

// 教师试卷游标查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExamPaperCursorQuery {
    pub cursor: Option<String>, // 上一次响应返回的 next_cursor
    pub limit: Option<i64>,
}
