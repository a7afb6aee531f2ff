use serde::Deserialize;
use uuid::Uuid;

use crate::models::questions::entities::ChoiceOption;

// 提交答案请求（作答记录来自路径参数）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExamAnswerRequest {
    pub question_id: Uuid,
    pub selected_option: Option<ChoiceOption>,
}

// 修改答案请求
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateExamAnswerRequest {
    pub selected_option: Option<ChoiceOption>,
}
