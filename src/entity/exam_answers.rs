//! 答案实体（一次作答中某道题的选择）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exam_answers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub attempt_id: Uuid,
    pub question_id: Uuid,
    pub selected_option: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::exam_attempts::Entity",
        from = "Column::AttemptId",
        to = "super::exam_attempts::Column::Id"
    )]
    ExamAttempt,
    #[sea_orm(
        belongs_to = "super::questions::Entity",
        from = "Column::QuestionId",
        to = "super::questions::Column::Id"
    )]
    Question,
}

impl Related<super::exam_attempts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamAttempt.def()
    }
}

impl Related<super::questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_exam_answer(self) -> crate::models::exam_answers::entities::ExamAnswer {
        use crate::models::exam_answers::entities::ExamAnswer;
        use crate::models::questions::entities::ChoiceOption;
        use chrono::{DateTime, Utc};

        ExamAnswer {
            id: self.id,
            attempt_id: self.attempt_id,
            question_id: self.question_id,
            selected_option: self
                .selected_option
                .and_then(|o| o.parse::<ChoiceOption>().ok()),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
