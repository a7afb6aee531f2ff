//! 题目实体（单选题，A-D 四个选项）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub paper_id: Uuid,
    pub content: String,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub option_c: Option<String>,
    pub option_d: Option<String>,
    pub correct_option: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::exam_papers::Entity",
        from = "Column::PaperId",
        to = "super::exam_papers::Column::Id"
    )]
    ExamPaper,
    #[sea_orm(has_many = "super::exam_answers::Entity")]
    ExamAnswers,
}

impl Related<super::exam_papers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamPaper.def()
    }
}

impl Related<super::exam_answers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamAnswers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_question(self) -> crate::models::questions::entities::Question {
        use crate::models::questions::entities::{ChoiceOption, Question};
        use chrono::{DateTime, Utc};

        Question {
            id: self.id,
            paper_id: self.paper_id,
            content: self.content,
            option_a: self.option_a,
            option_b: self.option_b,
            option_c: self.option_c,
            option_d: self.option_d,
            correct_option: self
                .correct_option
                .and_then(|o| o.parse::<ChoiceOption>().ok()),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
