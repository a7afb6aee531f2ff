//! 考试系统基础表
//!
//! 表之间的关联全部是虚拟外键：只建列和索引，不建 FOREIGN KEY 约束，
//! 引用完整性由应用层在事务内校验。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::FullName).string().null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建用户档案表（一对一，user_id 唯一）
        manager
            .create_table(
                Table::create()
                    .table(UserProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserProfiles::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(UserProfiles::Bio).text().null())
                    .col(ColumnDef::new(UserProfiles::AvatarUrl).string().null())
                    .col(
                        ColumnDef::new(UserProfiles::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserProfiles::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建试卷表
        manager
            .create_table(
                Table::create()
                    .table(ExamPapers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExamPapers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExamPapers::TeacherId).uuid().not_null())
                    .col(ColumnDef::new(ExamPapers::Title).string().not_null())
                    .col(ColumnDef::new(ExamPapers::Description).text().null())
                    .col(
                        ColumnDef::new(ExamPapers::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExamPapers::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建题目表
        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Questions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Questions::PaperId).uuid().not_null())
                    .col(ColumnDef::new(Questions::Content).text().not_null())
                    .col(ColumnDef::new(Questions::OptionA).string().null())
                    .col(ColumnDef::new(Questions::OptionB).string().null())
                    .col(ColumnDef::new(Questions::OptionC).string().null())
                    .col(ColumnDef::new(Questions::OptionD).string().null())
                    .col(ColumnDef::new(Questions::CorrectOption).string_len(1).null())
                    .col(
                        ColumnDef::new(Questions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Questions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作答记录表
        manager
            .create_table(
                Table::create()
                    .table(ExamAttempts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExamAttempts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExamAttempts::PaperId).uuid().not_null())
                    .col(ColumnDef::new(ExamAttempts::StudentId).uuid().not_null())
                    .col(
                        ColumnDef::new(ExamAttempts::StartedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExamAttempts::FinishedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(ExamAttempts::Score).double().null())
                    .col(
                        ColumnDef::new(ExamAttempts::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExamAttempts::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建答案表
        manager
            .create_table(
                Table::create()
                    .table(ExamAnswers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExamAnswers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExamAnswers::AttemptId).uuid().not_null())
                    .col(ColumnDef::new(ExamAnswers::QuestionId).uuid().not_null())
                    .col(
                        ColumnDef::new(ExamAnswers::SelectedOption)
                            .string_len(1)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ExamAnswers::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExamAnswers::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(ExamAnswers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExamAttempts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Questions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExamPapers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Email,
    FullName,
    Role,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum UserProfiles {
    #[sea_orm(iden = "user_profiles")]
    Table,
    Id,
    UserId,
    Bio,
    AvatarUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum ExamPapers {
    #[sea_orm(iden = "exam_papers")]
    Table,
    Id,
    TeacherId,
    Title,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Questions {
    #[sea_orm(iden = "questions")]
    Table,
    Id,
    PaperId,
    Content,
    OptionA,
    OptionB,
    OptionC,
    OptionD,
    CorrectOption,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum ExamAttempts {
    #[sea_orm(iden = "exam_attempts")]
    Table,
    Id,
    PaperId,
    StudentId,
    StartedAt,
    FinishedAt,
    Score,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum ExamAnswers {
    #[sea_orm(iden = "exam_answers")]
    Table,
    Id,
    AttemptId,
    QuestionId,
    SelectedOption,
    CreatedAt,
    UpdatedAt,
}
