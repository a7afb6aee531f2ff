use super::entities::ExamAnswer;
use serde::Serialize;

// 作答记录的答案列表响应
#[derive(Debug, Serialize)]
pub struct ExamAnswerListResponse {
    pub items: Vec<ExamAnswer>,
}
