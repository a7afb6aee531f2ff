use super::entities::Question;
use serde::Serialize;

// 试卷题目列表响应
#[derive(Debug, Serialize)]
pub struct QuestionListResponse {
    pub items: Vec<Question>,
}
