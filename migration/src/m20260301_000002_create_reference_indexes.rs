//! 虚拟外键列上的索引
//!
//! 存在性校验和级联删除都按这些列查询，唯一索引同时承担一对一 /
//! 每人每卷一次作答等约束。

use sea_orm_migration::prelude::*;

use crate::m20260301_000001_create_tables::{
    ExamAnswers, ExamAttempts, ExamPapers, Questions, Users,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 用户表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_role")
                    .table(Users::Table)
                    .col(Users::Role)
                    .to_owned(),
            )
            .await?;

        // 试卷表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_exam_papers_teacher_id")
                    .table(ExamPapers::Table)
                    .col(ExamPapers::TeacherId)
                    .to_owned(),
            )
            .await?;

        // 题目表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_questions_paper_id")
                    .table(Questions::Table)
                    .col(Questions::PaperId)
                    .to_owned(),
            )
            .await?;

        // 作答记录表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_exam_attempts_student_id")
                    .table(ExamAttempts::Table)
                    .col(ExamAttempts::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_exam_attempts_paper_id")
                    .table(ExamAttempts::Table)
                    .col(ExamAttempts::PaperId)
                    .to_owned(),
            )
            .await?;

        // 每个学生对同一试卷只能有一条作答记录
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("uq_exam_attempts_paper_student")
                    .table(ExamAttempts::Table)
                    .col(ExamAttempts::PaperId)
                    .col(ExamAttempts::StudentId)
                    .to_owned(),
            )
            .await?;

        // 答案表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_exam_answers_attempt_id")
                    .table(ExamAnswers::Table)
                    .col(ExamAnswers::AttemptId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_exam_answers_question_id")
                    .table(ExamAnswers::Table)
                    .col(ExamAnswers::QuestionId)
                    .to_owned(),
            )
            .await?;

        // 同一次作答中每道题只有一个答案
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("uq_exam_answers_attempt_question")
                    .table(ExamAnswers::Table)
                    .col(ExamAnswers::AttemptId)
                    .col(ExamAnswers::QuestionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_index(
                Index::drop()
                    .name("uq_exam_answers_attempt_question")
                    .table(ExamAnswers::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_exam_answers_question_id")
                    .table(ExamAnswers::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_exam_answers_attempt_id")
                    .table(ExamAnswers::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("uq_exam_attempts_paper_student")
                    .table(ExamAttempts::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_exam_attempts_paper_id")
                    .table(ExamAttempts::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_exam_attempts_student_id")
                    .table(ExamAttempts::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_questions_paper_id")
                    .table(Questions::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_exam_papers_teacher_id")
                    .table(ExamPapers::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_users_role")
                    .table(Users::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
