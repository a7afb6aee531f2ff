use super::entities::ExamPaper;
use crate::models::common::PaginationInfo;
use crate::models::questions::entities::Question;
use serde::Serialize;

// 试卷列表响应
#[derive(Debug, Serialize)]
pub struct ExamPaperListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<ExamPaper>,
}

// 教师试卷游标分页响应
#[derive(Debug, Serialize)]
pub struct ExamPaperCursorResponse {
    pub items: Vec<ExamPaper>,
    pub next_cursor: Option<String>,
    pub total: i64,
}

// 试卷详情（含题目）
#[derive(Debug, Serialize)]
pub struct ExamPaperContent {
    #[serde(flatten)]
    pub paper: ExamPaper,
    pub questions: Vec<Question>,
}
