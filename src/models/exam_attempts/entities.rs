use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamAttempt {
    pub id: Uuid,
    // 虚拟外键 -> exam_papers.id
    pub paper_id: Uuid,
    // 虚拟外键 -> users.id（学生）
    pub student_id: Uuid,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub finished_at: Option<chrono::DateTime<chrono::Utc>>,
    // 交卷后计算，答对的题目数
    pub score: Option<f64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl ExamAttempt {
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }
}
