use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamPaper {
    // 试卷ID
    pub id: Uuid,
    // 出卷教师ID（虚拟外键 -> users.id）
    pub teacher_id: Uuid,
    // 试卷标题
    pub title: String,
    // 试卷说明
    pub description: Option<String>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
