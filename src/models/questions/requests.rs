use serde::Deserialize;
use uuid::Uuid;

use super::entities::ChoiceOption;

// 创建题目请求（所属试卷来自路径参数）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestionRequest {
    pub content: String,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub option_c: Option<String>,
    pub option_d: Option<String>,
    pub correct_option: Option<ChoiceOption>,
}

// 更新题目请求
//
// 指定 paper_id 会把题目移动到另一份试卷
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateQuestionRequest {
    pub paper_id: Option<Uuid>,
    pub content: Option<String>,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub option_c: Option<String>,
    pub option_d: Option<String>,
    pub correct_option: Option<ChoiceOption>,
}
