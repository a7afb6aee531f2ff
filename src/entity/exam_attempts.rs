//! 作答记录实体（一名学生对一份试卷的一次考试）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exam_attempts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub paper_id: Uuid,
    pub student_id: Uuid,
    pub started_at: i64,
    pub finished_at: Option<i64>,
    pub score: Option<f64>,
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
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
    #[sea_orm(has_many = "super::exam_answers::Entity")]
    ExamAnswers,
}

impl Related<super::exam_papers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamPaper.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
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
    pub fn into_exam_attempt(self) -> crate::models::exam_attempts::entities::ExamAttempt {
        use crate::models::exam_attempts::entities::ExamAttempt;
        use chrono::{DateTime, Utc};

        ExamAttempt {
            id: self.id,
            paper_id: self.paper_id,
            student_id: self.student_id,
            started_at: DateTime::<Utc>::from_timestamp(self.started_at, 0).unwrap_or_default(),
            finished_at: self
                .finished_at
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            score: self.score,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
