use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::questions::entities::ChoiceOption;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamAnswer {
    pub id: Uuid,
    // 虚拟外键 -> exam_attempts.id
    pub attempt_id: Uuid,
    // 虚拟外键 -> questions.id，且必须属于作答记录对应的试卷
    pub question_id: Uuid,
    pub selected_option: Option<ChoiceOption>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
