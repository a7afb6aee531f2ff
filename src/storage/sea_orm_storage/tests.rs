use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use super::SeaOrmStorage;
use crate::config::DatabaseConfig;
use crate::entity::{exam_answers, questions};
use crate::errors::ExamSystemError;
use crate::models::{
    exam_answers::requests::{CreateExamAnswerRequest, UpdateExamAnswerRequest},
    exam_attempts::requests::{CreateExamAttemptRequest, ExamAttemptListQuery},
    exam_papers::{
        entities::ExamPaper,
        requests::{
            CreateExamPaperRequest, ExamPaperCursorQuery, ExamPaperListQuery,
            UpdateExamPaperRequest,
        },
    },
    questions::{
        entities::{ChoiceOption, Question},
        requests::{CreateQuestionRequest, UpdateQuestionRequest},
    },
    users::{
        entities::{User, UserRole},
        requests::{
            CreateUserProfileRequest, CreateUserRequest, UpdateUserProfileRequest,
            UpdateUserRequest, UserListQuery,
        },
    },
};
use crate::storage::Storage;
use crate::storage::integrity::{DeletePolicies, DeletePolicy};
use crate::storage::retry::RetryPolicy;

async fn storage_with(teacher_papers: DeletePolicy) -> SeaOrmStorage {
    let database = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 10,
    };
    SeaOrmStorage::connect(
        &database,
        DeletePolicies::new(teacher_papers),
        RetryPolicy::default(),
    )
    .await
    .expect("in-memory storage")
}

async fn storage() -> SeaOrmStorage {
    storage_with(DeletePolicy::Restrict).await
}

async fn user(storage: &SeaOrmStorage, email: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            email: email.to_string(),
            full_name: Some(email.split('@').next().unwrap_or_default().to_string()),
            role,
        })
        .await
        .expect("create user")
}

async fn paper(storage: &SeaOrmStorage, teacher_id: Uuid) -> ExamPaper {
    storage
        .create_exam_paper(CreateExamPaperRequest {
            teacher_id,
            title: "期末考试".to_string(),
            description: None,
        })
        .await
        .expect("create paper")
}

async fn question(storage: &SeaOrmStorage, paper_id: Uuid, correct: ChoiceOption) -> Question {
    storage
        .create_question(
            paper_id,
            CreateQuestionRequest {
                content: "1 + 1 = ?".to_string(),
                option_a: Some("1".to_string()),
                option_b: Some("2".to_string()),
                option_c: Some("3".to_string()),
                option_d: Some("4".to_string()),
                correct_option: Some(correct),
            },
        )
        .await
        .expect("create question")
}

/// 直接统计仍指向该试卷的题目行
async fn questions_of(storage: &SeaOrmStorage, paper_id: Uuid) -> u64 {
    questions::Entity::find()
        .filter(questions::Column::PaperId.eq(paper_id))
        .count(&storage.db)
        .await
        .expect("count questions")
}

async fn answers_of(storage: &SeaOrmStorage, attempt_id: Uuid) -> u64 {
    exam_answers::Entity::find()
        .filter(exam_answers::Column::AttemptId.eq(attempt_id))
        .count(&storage.db)
        .await
        .expect("count answers")
}

fn answer(question_id: Uuid, option: ChoiceOption) -> CreateExamAnswerRequest {
    CreateExamAnswerRequest {
        question_id,
        selected_option: Some(option),
    }
}

fn attempt_req(paper_id: Uuid, student_id: Uuid) -> CreateExamAttemptRequest {
    CreateExamAttemptRequest {
        paper_id,
        student_id,
    }
}

// ==================== 写入时的存在性校验 ====================

#[tokio::test]
async fn test_missing_parents_are_integrity_violations() {
    let storage = storage().await;
    let teacher = user(&storage, "t@school.edu", UserRole::Teacher).await;
    let student = user(&storage, "s@school.edu", UserRole::Student).await;
    let exam = paper(&storage, teacher.id).await;
    let q = question(&storage, exam.id, ChoiceOption::A).await;
    let attempt = storage
        .create_exam_attempt(attempt_req(exam.id, student.id))
        .await
        .expect("create attempt");
    let missing = Uuid::now_v7();

    let profile = storage
        .create_user_profile(missing, CreateUserProfileRequest::default())
        .await;
    assert!(matches!(profile, Err(ExamSystemError::IntegrityViolation(_))));

    let paper_result = storage
        .create_exam_paper(CreateExamPaperRequest {
            teacher_id: missing,
            title: "x".to_string(),
            description: None,
        })
        .await;
    assert!(matches!(paper_result, Err(ExamSystemError::IntegrityViolation(_))));

    let question_result = storage
        .create_question(
            missing,
            CreateQuestionRequest {
                content: "?".to_string(),
                option_a: None,
                option_b: None,
                option_c: None,
                option_d: None,
                correct_option: None,
            },
        )
        .await;
    assert!(matches!(question_result, Err(ExamSystemError::IntegrityViolation(_))));

    let attempt_missing_paper = storage
        .create_exam_attempt(attempt_req(missing, student.id))
        .await;
    assert!(matches!(
        attempt_missing_paper,
        Err(ExamSystemError::IntegrityViolation(_))
    ));

    let attempt_missing_student = storage.create_exam_attempt(attempt_req(exam.id, missing)).await;
    assert!(matches!(
        attempt_missing_student,
        Err(ExamSystemError::IntegrityViolation(_))
    ));

    let answer_missing_attempt = storage
        .create_exam_answer(missing, answer(q.id, ChoiceOption::A))
        .await;
    assert!(matches!(
        answer_missing_attempt,
        Err(ExamSystemError::IntegrityViolation(_))
    ));

    let answer_missing_question = storage
        .create_exam_answer(attempt.id, answer(missing, ChoiceOption::A))
        .await;
    assert!(matches!(
        answer_missing_question,
        Err(ExamSystemError::IntegrityViolation(_))
    ));

    // 失败的写入不能留下任何行
    assert_eq!(storage.count_users().await.expect("count"), 2);
    let papers = storage
        .list_exam_papers_with_pagination(ExamPaperListQuery::default())
        .await
        .expect("list papers");
    assert_eq!(papers.pagination.total, 1);
}

#[tokio::test]
async fn test_roles_are_checked_on_reference() {
    let storage = storage().await;
    let teacher = user(&storage, "t@school.edu", UserRole::Teacher).await;
    let student = user(&storage, "s@school.edu", UserRole::Student).await;

    let by_student = storage
        .create_exam_paper(CreateExamPaperRequest {
            teacher_id: student.id,
            title: "x".to_string(),
            description: None,
        })
        .await;
    assert!(matches!(by_student, Err(ExamSystemError::IntegrityViolation(_))));

    let exam = paper(&storage, teacher.id).await;
    let by_teacher = storage
        .create_exam_attempt(attempt_req(exam.id, teacher.id))
        .await;
    assert!(matches!(by_teacher, Err(ExamSystemError::IntegrityViolation(_))));
}

#[tokio::test]
async fn test_answer_question_must_belong_to_attempt_paper() {
    let storage = storage().await;
    let teacher = user(&storage, "t@school.edu", UserRole::Teacher).await;
    let student = user(&storage, "s@school.edu", UserRole::Student).await;
    let exam = paper(&storage, teacher.id).await;
    let other = paper(&storage, teacher.id).await;
    let foreign = question(&storage, other.id, ChoiceOption::B).await;
    let attempt = storage
        .create_exam_attempt(attempt_req(exam.id, student.id))
        .await
        .expect("create attempt");

    let result = storage
        .create_exam_answer(attempt.id, answer(foreign.id, ChoiceOption::B))
        .await;
    assert!(matches!(result, Err(ExamSystemError::IntegrityViolation(_))));
}

#[tokio::test]
async fn test_transfer_paper_checks_new_teacher() {
    let storage = storage().await;
    let teacher = user(&storage, "t@school.edu", UserRole::Teacher).await;
    let next = user(&storage, "t2@school.edu", UserRole::Teacher).await;
    let exam = paper(&storage, teacher.id).await;

    let missing = storage
        .update_exam_paper(
            exam.id,
            UpdateExamPaperRequest {
                teacher_id: Some(Uuid::now_v7()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(missing, Err(ExamSystemError::IntegrityViolation(_))));

    let moved = storage
        .update_exam_paper(
            exam.id,
            UpdateExamPaperRequest {
                teacher_id: Some(next.id),
                title: Some("  转交后的试卷 ".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("transfer")
        .expect("paper exists");
    assert_eq!(moved.teacher_id, next.id);
    assert_eq!(moved.title, "转交后的试卷");

    let absent = storage
        .update_exam_paper(Uuid::now_v7(), UpdateExamPaperRequest::default())
        .await
        .expect("update missing paper");
    assert!(absent.is_none());
}

#[tokio::test]
async fn test_move_question_checks_target_paper() {
    let storage = storage().await;
    let teacher = user(&storage, "t@school.edu", UserRole::Teacher).await;
    let exam = paper(&storage, teacher.id).await;
    let other = paper(&storage, teacher.id).await;
    let q = question(&storage, exam.id, ChoiceOption::C).await;

    let missing = storage
        .update_question(
            q.id,
            UpdateQuestionRequest {
                paper_id: Some(Uuid::now_v7()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(missing, Err(ExamSystemError::IntegrityViolation(_))));

    let moved = storage
        .update_question(
            q.id,
            UpdateQuestionRequest {
                paper_id: Some(other.id),
                ..Default::default()
            },
        )
        .await
        .expect("move question")
        .expect("question exists");
    assert_eq!(moved.paper_id, other.id);
    assert_eq!(moved.correct_option, Some(ChoiceOption::C));

    let emptied = storage
        .update_question(
            q.id,
            UpdateQuestionRequest {
                correct_option: Some(ChoiceOption::D),
                option_d: Some("   ".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(emptied, Err(ExamSystemError::Validation(_))));
}

// ==================== 一对一与唯一约束 ====================

#[tokio::test]
async fn test_second_profile_is_conflict() {
    let storage = storage().await;
    let student = user(&storage, "s@school.edu", UserRole::Student).await;

    storage
        .create_user_profile(
            student.id,
            CreateUserProfileRequest {
                bio: Some("hello".to_string()),
                avatar_url: None,
            },
        )
        .await
        .expect("first profile");

    let second = storage
        .create_user_profile(student.id, CreateUserProfileRequest::default())
        .await;
    assert!(matches!(second, Err(ExamSystemError::Conflict(_))));

    let updated = storage
        .update_user_profile(
            student.id,
            UpdateUserProfileRequest {
                bio: None,
                avatar_url: Some("https://cdn.example.com/a.png".to_string()),
            },
        )
        .await
        .expect("update profile")
        .expect("profile exists");
    assert_eq!(updated.bio.as_deref(), Some("hello"));
    assert_eq!(
        updated.avatar_url.as_deref(),
        Some("https://cdn.example.com/a.png")
    );

    assert!(storage.delete_user_profile(student.id).await.expect("delete"));
    assert!(!storage.delete_user_profile(student.id).await.expect("delete again"));
    assert!(
        storage
            .get_user_profile(student.id)
            .await
            .expect("get profile")
            .is_none()
    );
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let storage = storage().await;
    user(&storage, "same@school.edu", UserRole::Student).await;

    let duplicate = storage
        .create_user(CreateUserRequest {
            email: "same@school.edu".to_string(),
            full_name: None,
            role: UserRole::Teacher,
        })
        .await;
    assert!(matches!(duplicate, Err(ExamSystemError::Conflict(_))));
}

#[tokio::test]
async fn test_second_attempt_and_answer_are_conflicts() {
    let storage = storage().await;
    let teacher = user(&storage, "t@school.edu", UserRole::Teacher).await;
    let student = user(&storage, "s@school.edu", UserRole::Student).await;
    let exam = paper(&storage, teacher.id).await;
    let q = question(&storage, exam.id, ChoiceOption::A).await;

    let attempt = storage
        .create_exam_attempt(attempt_req(exam.id, student.id))
        .await
        .expect("create attempt");
    let again = storage
        .create_exam_attempt(attempt_req(exam.id, student.id))
        .await;
    assert!(matches!(again, Err(ExamSystemError::Conflict(_))));

    storage
        .create_exam_answer(attempt.id, answer(q.id, ChoiceOption::A))
        .await
        .expect("answer");
    let twice = storage
        .create_exam_answer(attempt.id, answer(q.id, ChoiceOption::B))
        .await;
    assert!(matches!(twice, Err(ExamSystemError::Conflict(_))));
}

// ==================== 删除策略 ====================

#[tokio::test]
async fn test_delete_user_cascades_profile() {
    let storage = storage().await;
    let student = user(&storage, "s@school.edu", UserRole::Student).await;
    storage
        .create_user_profile(student.id, CreateUserProfileRequest::default())
        .await
        .expect("profile");

    assert!(storage.delete_user(student.id).await.expect("delete user"));
    assert!(storage.get_user_by_id(student.id).await.expect("get").is_none());
    assert!(
        storage
            .get_user_profile(student.id)
            .await
            .expect("get profile")
            .is_none()
    );
    assert!(!storage.delete_user(student.id).await.expect("delete again"));
}

#[tokio::test]
async fn test_teacher_with_papers_is_restricted_by_default() {
    let storage = storage().await;
    let teacher = user(&storage, "t@school.edu", UserRole::Teacher).await;
    let exam = paper(&storage, teacher.id).await;

    let result = storage.delete_user(teacher.id).await;
    assert!(matches!(result, Err(ExamSystemError::DependentRowsExist(_))));
    assert!(storage.get_user_by_id(teacher.id).await.expect("get").is_some());

    assert!(storage.delete_exam_paper(exam.id).await.expect("delete paper"));
    assert!(storage.delete_user(teacher.id).await.expect("delete teacher"));
}

#[tokio::test]
async fn test_teacher_papers_cascade_when_configured() {
    let storage = storage_with(DeletePolicy::Cascade).await;
    let teacher = user(&storage, "t@school.edu", UserRole::Teacher).await;
    let exam = paper(&storage, teacher.id).await;
    let q = question(&storage, exam.id, ChoiceOption::A).await;

    assert!(storage.delete_user(teacher.id).await.expect("delete teacher"));
    assert!(storage.get_exam_paper_by_id(exam.id).await.expect("get").is_none());
    assert!(storage.get_question_by_id(q.id).await.expect("get").is_none());
}

#[tokio::test]
async fn test_cascade_stops_at_restricted_grandchildren() {
    let storage = storage_with(DeletePolicy::Cascade).await;
    let teacher = user(&storage, "t@school.edu", UserRole::Teacher).await;
    let student = user(&storage, "s@school.edu", UserRole::Student).await;
    let exam = paper(&storage, teacher.id).await;
    storage
        .create_exam_attempt(attempt_req(exam.id, student.id))
        .await
        .expect("create attempt");

    // 试卷已有作答记录，级联删除教师时整个事务回滚
    let result = storage.delete_user(teacher.id).await;
    assert!(matches!(result, Err(ExamSystemError::DependentRowsExist(_))));
    assert!(storage.get_user_by_id(teacher.id).await.expect("get").is_some());
    assert!(storage.get_exam_paper_by_id(exam.id).await.expect("get").is_some());
}

#[tokio::test]
async fn test_delete_paper_cascades_questions_and_restricts_attempts() {
    let storage = storage().await;
    let teacher = user(&storage, "t@school.edu", UserRole::Teacher).await;
    let student = user(&storage, "s@school.edu", UserRole::Student).await;
    let exam = paper(&storage, teacher.id).await;
    let q1 = question(&storage, exam.id, ChoiceOption::A).await;
    let q2 = question(&storage, exam.id, ChoiceOption::B).await;

    let attempt = storage
        .create_exam_attempt(attempt_req(exam.id, student.id))
        .await
        .expect("create attempt");
    let blocked = storage.delete_exam_paper(exam.id).await;
    assert!(matches!(blocked, Err(ExamSystemError::DependentRowsExist(_))));
    assert_eq!(
        storage
            .list_questions_by_paper(exam.id)
            .await
            .expect("list")
            .len(),
        2
    );

    assert!(storage.delete_exam_attempt(attempt.id).await.expect("delete attempt"));
    assert!(storage.delete_exam_paper(exam.id).await.expect("delete paper"));
    assert_eq!(questions_of(&storage, exam.id).await, 0);
    assert!(matches!(
        storage.list_questions_by_paper(exam.id).await,
        Err(ExamSystemError::NotFound(_))
    ));
    assert!(storage.get_question_by_id(q1.id).await.expect("get").is_none());
    assert!(storage.get_question_by_id(q2.id).await.expect("get").is_none());
}

#[tokio::test]
async fn test_student_attempts_restrict_and_answers_cascade() {
    let storage = storage().await;
    let teacher = user(&storage, "t@school.edu", UserRole::Teacher).await;
    let student = user(&storage, "s@school.edu", UserRole::Student).await;
    let exam = paper(&storage, teacher.id).await;
    let q = question(&storage, exam.id, ChoiceOption::A).await;
    let attempt = storage
        .create_exam_attempt(attempt_req(exam.id, student.id))
        .await
        .expect("create attempt");
    storage
        .create_exam_answer(attempt.id, answer(q.id, ChoiceOption::A))
        .await
        .expect("answer");

    let blocked = storage.delete_user(student.id).await;
    assert!(matches!(blocked, Err(ExamSystemError::DependentRowsExist(_))));

    // 已被作答的题目受限
    let question_blocked = storage.delete_question(q.id).await;
    assert!(matches!(
        question_blocked,
        Err(ExamSystemError::DependentRowsExist(_))
    ));

    assert!(storage.delete_exam_attempt(attempt.id).await.expect("delete attempt"));
    assert_eq!(answers_of(&storage, attempt.id).await, 0);
    assert!(matches!(
        storage.list_exam_answers_by_attempt(attempt.id).await,
        Err(ExamSystemError::NotFound(_))
    ));
    assert!(storage.delete_question(q.id).await.expect("delete question"));
    assert!(storage.delete_user(student.id).await.expect("delete student"));
}

#[tokio::test]
async fn test_role_change_is_restricted_by_dependents() {
    let storage = storage().await;
    let teacher = user(&storage, "t@school.edu", UserRole::Teacher).await;
    let exam = paper(&storage, teacher.id).await;

    let demote = UpdateUserRequest {
        email: None,
        full_name: None,
        role: Some(UserRole::Student),
        is_active: None,
    };
    let result = storage.update_user(teacher.id, demote.clone()).await;
    assert!(matches!(result, Err(ExamSystemError::DependentRowsExist(_))));

    storage.delete_exam_paper(exam.id).await.expect("delete paper");
    let updated = storage
        .update_user(teacher.id, demote)
        .await
        .expect("role change")
        .expect("user exists");
    assert_eq!(updated.role, UserRole::Student);
}

// ==================== 交卷与计分 ====================

#[tokio::test]
async fn test_finish_scores_correct_answers() {
    let storage = storage().await;
    let teacher = user(&storage, "t@school.edu", UserRole::Teacher).await;
    let student = user(&storage, "s@school.edu", UserRole::Student).await;
    let exam = paper(&storage, teacher.id).await;
    let q1 = question(&storage, exam.id, ChoiceOption::A).await;
    let q2 = question(&storage, exam.id, ChoiceOption::B).await;
    let q3 = question(&storage, exam.id, ChoiceOption::C).await;
    let attempt = storage
        .create_exam_attempt(attempt_req(exam.id, student.id))
        .await
        .expect("create attempt");
    assert!(!attempt.is_finished());

    storage
        .create_exam_answer(attempt.id, answer(q1.id, ChoiceOption::A))
        .await
        .expect("answer q1");
    let wrong = storage
        .create_exam_answer(attempt.id, answer(q2.id, ChoiceOption::D))
        .await
        .expect("answer q2");
    storage
        .create_exam_answer(attempt.id, answer(q3.id, ChoiceOption::C))
        .await
        .expect("answer q3");

    // 改对第二题
    storage
        .update_exam_answer(
            wrong.id,
            UpdateExamAnswerRequest {
                selected_option: Some(ChoiceOption::B),
            },
        )
        .await
        .expect("update answer")
        .expect("answer exists");

    let finished = storage
        .finish_exam_attempt(attempt.id)
        .await
        .expect("finish")
        .expect("attempt exists");
    assert!(finished.is_finished());
    assert_eq!(finished.score, Some(3.0));

    let again = storage.finish_exam_attempt(attempt.id).await;
    assert!(matches!(again, Err(ExamSystemError::Validation(_))));

    assert!(
        storage
            .finish_exam_attempt(Uuid::now_v7())
            .await
            .expect("finish missing")
            .is_none()
    );
}

#[tokio::test]
async fn test_finished_attempt_rejects_answers() {
    let storage = storage().await;
    let teacher = user(&storage, "t@school.edu", UserRole::Teacher).await;
    let student = user(&storage, "s@school.edu", UserRole::Student).await;
    let exam = paper(&storage, teacher.id).await;
    let q1 = question(&storage, exam.id, ChoiceOption::A).await;
    let q2 = question(&storage, exam.id, ChoiceOption::A).await;
    let attempt = storage
        .create_exam_attempt(attempt_req(exam.id, student.id))
        .await
        .expect("create attempt");
    let first = storage
        .create_exam_answer(attempt.id, answer(q1.id, ChoiceOption::B))
        .await
        .expect("answer");

    let finished = storage
        .finish_exam_attempt(attempt.id)
        .await
        .expect("finish")
        .expect("attempt exists");
    assert_eq!(finished.score, Some(0.0));

    let late = storage
        .create_exam_answer(attempt.id, answer(q2.id, ChoiceOption::A))
        .await;
    assert!(matches!(late, Err(ExamSystemError::Validation(_))));

    let changed = storage
        .update_exam_answer(
            first.id,
            UpdateExamAnswerRequest {
                selected_option: Some(ChoiceOption::A),
            },
        )
        .await;
    assert!(matches!(changed, Err(ExamSystemError::Validation(_))));

    let removed = storage.delete_exam_answer(first.id).await;
    assert!(matches!(removed, Err(ExamSystemError::Validation(_))));
}

// ==================== 查询 ====================

#[tokio::test]
async fn test_list_filters_and_pagination() {
    let storage = storage().await;
    let teacher = user(&storage, "alice@school.edu", UserRole::Teacher).await;
    for i in 0..3 {
        user(&storage, &format!("student{i}@school.edu"), UserRole::Student).await;
    }
    user(&storage, "under_score@school.edu", UserRole::Student).await;

    let students = storage
        .list_users_with_pagination(UserListQuery {
            page: Some(1),
            size: Some(2),
            role: Some(UserRole::Student),
            search: None,
        })
        .await
        .expect("list students");
    assert_eq!(students.pagination.total, 4);
    assert_eq!(students.pagination.total_pages, 2);
    assert_eq!(students.items.len(), 2);

    // `_` 按字面匹配，不是通配符
    let literal = storage
        .list_users_with_pagination(UserListQuery {
            search: Some("_".to_string()),
            ..Default::default()
        })
        .await
        .expect("search underscore");
    assert_eq!(literal.pagination.total, 1);

    let exam = paper(&storage, teacher.id).await;
    let papers = storage
        .list_exam_papers_with_pagination(ExamPaperListQuery {
            teacher_id: Some(teacher.id),
            search: Some("期末".to_string()),
            ..Default::default()
        })
        .await
        .expect("list papers");
    assert_eq!(papers.items.len(), 1);
    assert_eq!(papers.items[0].id, exam.id);

    let attempts = storage
        .list_exam_attempts_with_pagination(ExamAttemptListQuery {
            paper_id: Some(exam.id),
            ..Default::default()
        })
        .await
        .expect("list attempts");
    assert_eq!(attempts.pagination.total, 0);
}

#[tokio::test]
async fn test_huge_page_number_returns_empty_page() {
    let storage = storage().await;
    let teacher = user(&storage, "t@school.edu", UserRole::Teacher).await;
    user(&storage, "s@school.edu", UserRole::Student).await;
    paper(&storage, teacher.id).await;

    let users = storage
        .list_users_with_pagination(UserListQuery {
            page: Some(i64::MAX),
            size: Some(100),
            ..Default::default()
        })
        .await
        .expect("list users");
    assert!(users.items.is_empty());
    assert_eq!(users.pagination.total, 2);

    let papers = storage
        .list_exam_papers_with_pagination(ExamPaperListQuery {
            page: Some(i64::MAX),
            size: Some(i64::MAX),
            ..Default::default()
        })
        .await
        .expect("list papers");
    assert!(papers.items.is_empty());
    assert_eq!(papers.pagination.page_size, 100);

    let attempts = storage
        .list_exam_attempts_with_pagination(ExamAttemptListQuery {
            page: Some(i64::MAX),
            ..Default::default()
        })
        .await
        .expect("list attempts");
    assert!(attempts.items.is_empty());
}

// ==================== 组合读取与批量写入 ====================

fn question_req(content: &str) -> CreateQuestionRequest {
    CreateQuestionRequest {
        content: content.to_string(),
        option_a: Some("是".to_string()),
        option_b: Some("否".to_string()),
        option_c: None,
        option_d: None,
        correct_option: Some(ChoiceOption::A),
    }
}

#[tokio::test]
async fn test_batch_create_questions_is_all_or_nothing() {
    let storage = storage().await;
    let teacher = user(&storage, "t@school.edu", UserRole::Teacher).await;
    let exam = paper(&storage, teacher.id).await;

    let missing = Uuid::now_v7();
    let err = storage
        .create_questions(missing, vec![question_req("q1"), question_req("q2")])
        .await;
    assert!(matches!(err, Err(ExamSystemError::IntegrityViolation(_))));
    assert_eq!(questions_of(&storage, missing).await, 0);

    let created = storage
        .create_questions(
            exam.id,
            vec![question_req("q1"), question_req("q2"), question_req("q3")],
        )
        .await
        .expect("batch create");
    assert_eq!(created.len(), 3);
    assert!(created.iter().all(|q| q.paper_id == exam.id));

    let listed: Vec<String> = storage
        .list_questions_by_paper(exam.id)
        .await
        .expect("list")
        .into_iter()
        .map(|q| q.content)
        .collect();
    assert_eq!(listed, ["q1", "q2", "q3"]);
}

#[tokio::test]
async fn test_paper_content_reads_questions_with_paper() {
    let storage = storage().await;
    let teacher = user(&storage, "t@school.edu", UserRole::Teacher).await;
    let exam = paper(&storage, teacher.id).await;
    let empty = paper(&storage, teacher.id).await;
    storage
        .create_questions(exam.id, vec![question_req("first"), question_req("second")])
        .await
        .expect("batch create");

    let content = storage
        .get_exam_paper_content(exam.id)
        .await
        .expect("content")
        .expect("paper exists");
    assert_eq!(content.paper.id, exam.id);
    let contents: Vec<&str> = content.questions.iter().map(|q| q.content.as_str()).collect();
    assert_eq!(contents, ["first", "second"]);

    let content = storage
        .get_exam_paper_content(empty.id)
        .await
        .expect("content")
        .expect("paper exists");
    assert!(content.questions.is_empty());

    assert!(
        storage
            .get_exam_paper_content(Uuid::now_v7())
            .await
            .expect("content")
            .is_none()
    );
}

#[tokio::test]
async fn test_user_summary_counts_papers() {
    let storage = storage().await;
    let teacher = user(&storage, "t@school.edu", UserRole::Teacher).await;
    let student = user(&storage, "s@school.edu", UserRole::Student).await;
    storage
        .create_user_profile(
            teacher.id,
            CreateUserProfileRequest {
                bio: Some("数学组".to_string()),
                avatar_url: None,
            },
        )
        .await
        .expect("create profile");
    paper(&storage, teacher.id).await;
    paper(&storage, teacher.id).await;

    let summary = storage
        .get_user_summary(teacher.id)
        .await
        .expect("summary")
        .expect("teacher exists");
    assert_eq!(summary.user.id, teacher.id);
    assert_eq!(summary.total_papers, 2);
    assert_eq!(
        summary.profile.and_then(|p| p.bio).as_deref(),
        Some("数学组")
    );

    let summary = storage
        .get_user_summary(student.id)
        .await
        .expect("summary")
        .expect("student exists");
    assert!(summary.profile.is_none());
    assert_eq!(summary.total_papers, 0);

    assert!(
        storage
            .get_user_summary(Uuid::now_v7())
            .await
            .expect("summary")
            .is_none()
    );
}

#[tokio::test]
async fn test_teacher_papers_cursor_walks_every_page() {
    let storage = storage().await;
    let teacher = user(&storage, "t@school.edu", UserRole::Teacher).await;
    let other = user(&storage, "o@school.edu", UserRole::Teacher).await;
    let mut expected = Vec::new();
    for _ in 0..5 {
        expected.push(paper(&storage, teacher.id).await.id);
    }
    paper(&storage, other.id).await;

    let mut seen = Vec::new();
    let mut cursor = None;
    let mut pages = 0;
    loop {
        let page = storage
            .list_teacher_exam_papers(
                teacher.id,
                ExamPaperCursorQuery {
                    cursor: cursor.take(),
                    limit: Some(2),
                },
            )
            .await
            .expect("cursor page");
        pages += 1;
        assert_eq!(page.total, 5);
        assert!(page.items.len() <= 2);
        assert!(page.items.iter().all(|p| p.teacher_id == teacher.id));
        seen.extend(page.items.iter().map(|p| p.id));
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }
    assert_eq!(pages, 3);

    // 新的在前，且不重不漏
    expected.reverse();
    assert_eq!(seen, expected);

    let bad = storage
        .list_teacher_exam_papers(
            teacher.id,
            ExamPaperCursorQuery {
                cursor: Some("not-a-cursor".to_string()),
                limit: None,
            },
        )
        .await;
    assert!(matches!(bad, Err(ExamSystemError::Validation(_))));

    let missing = storage
        .list_teacher_exam_papers(Uuid::now_v7(), ExamPaperCursorQuery::default())
        .await;
    assert!(matches!(missing, Err(ExamSystemError::NotFound(_))));
}

// ==================== 并发 ====================

/// 文件型 SQLite 数据库：多个连接共享同一个库，事务之间真正并发
struct FileDatabase {
    path: std::path::PathBuf,
}

impl FileDatabase {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!("exam_system_{name}_{}.db", Uuid::now_v7()));
        Self { path }
    }

    async fn storage(&self, pool_size: u32) -> SeaOrmStorage {
        let database = DatabaseConfig {
            url: format!("sqlite://{}?mode=rwc", self.path.display()),
            pool_size,
            timeout: 30,
        };
        SeaOrmStorage::connect(
            &database,
            DeletePolicies::new(DeletePolicy::Restrict),
            RetryPolicy::new(10, Duration::from_millis(5), Duration::from_millis(200)),
        )
        .await
        .expect("file-backed storage")
    }
}

impl Drop for FileDatabase {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_create_and_delete_never_dangles() {
    let database = FileDatabase::new("race");
    let storage = Arc::new(database.storage(8).await);
    let teacher = user(&storage, "t@school.edu", UserRole::Teacher).await;

    let mut created = 0;
    let mut rejected = 0;
    for _ in 0..100 {
        let paper_id = paper(&storage, teacher.id).await.id;

        let creators: Vec<_> = (0..3)
            .map(|_| {
                let storage = storage.clone();
                tokio::spawn(async move {
                    storage
                        .create_question(
                            paper_id,
                            CreateQuestionRequest {
                                content: "race".to_string(),
                                option_a: Some("x".to_string()),
                                option_b: None,
                                option_c: None,
                                option_d: None,
                                correct_option: Some(ChoiceOption::A),
                            },
                        )
                        .await
                })
            })
            .collect();
        let deleter = {
            let storage = storage.clone();
            tokio::spawn(async move { storage.delete_exam_paper(paper_id).await })
        };

        let deleted = deleter.await.expect("deleter task");
        assert_eq!(deleted, Ok(true));

        for creator in creators {
            match creator.await.expect("creator task") {
                // 先创建：题目随试卷级联删除
                Ok(q) => {
                    created += 1;
                    assert!(storage.get_question_by_id(q.id).await.expect("get").is_none());
                }
                // 先删除：创建时找不到试卷
                Err(ExamSystemError::IntegrityViolation(_)) => rejected += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(questions_of(&storage, paper_id).await, 0);
    }
    assert_eq!(created + rejected, 300);
}
