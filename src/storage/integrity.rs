//! 虚拟外键完整性模拟
//!
//! 数据库中没有外键约束，下面两项保证由这里在同一个事务内完成：
//! - 写入时的存在性校验：被引用的行以 `FOR SHARE` 读取，删除方的 `FOR UPDATE` 会与之互斥；
//! - 删除时的级联 / 限制策略：父行以 `FOR UPDATE` 锁定后按 [`DeletePolicies`] 处理子行。
//!
//! SQLite 不支持行锁（sea-query 会忽略锁子句），依靠单写者锁串行化事务。

use std::fmt;

use sea_orm::{
    ColumnTrait, DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::IntegrityConfig;
use crate::entity::{exam_answers, exam_attempts, exam_papers, questions, user_profiles, users};
use crate::errors::{ExamSystemError, Result};
use crate::models::users::entities::UserRole;

/// 父行删除时对子行的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    /// 连同子行一起删除
    Cascade,
    /// 存在子行时拒绝删除
    Restrict,
}

/// 系统中的全部虚拟外键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VirtualRelation {
    UserProfile,
    TeacherPapers,
    PaperQuestions,
    PaperAttempts,
    StudentAttempts,
    AttemptAnswers,
    QuestionAnswers,
}

impl VirtualRelation {
    pub const ALL: [VirtualRelation; 7] = [
        VirtualRelation::UserProfile,
        VirtualRelation::TeacherPapers,
        VirtualRelation::PaperQuestions,
        VirtualRelation::PaperAttempts,
        VirtualRelation::StudentAttempts,
        VirtualRelation::AttemptAnswers,
        VirtualRelation::QuestionAnswers,
    ];

    /// 引用列（子表.列）
    pub fn reference(self) -> &'static str {
        match self {
            VirtualRelation::UserProfile => "user_profiles.user_id",
            VirtualRelation::TeacherPapers => "exam_papers.teacher_id",
            VirtualRelation::PaperQuestions => "questions.paper_id",
            VirtualRelation::PaperAttempts => "exam_attempts.paper_id",
            VirtualRelation::StudentAttempts => "exam_attempts.student_id",
            VirtualRelation::AttemptAnswers => "exam_answers.attempt_id",
            VirtualRelation::QuestionAnswers => "exam_answers.question_id",
        }
    }

    /// 被引用的父表
    pub fn parent_table(self) -> &'static str {
        match self {
            VirtualRelation::UserProfile
            | VirtualRelation::TeacherPapers
            | VirtualRelation::StudentAttempts => "users",
            VirtualRelation::PaperQuestions | VirtualRelation::PaperAttempts => "exam_papers",
            VirtualRelation::AttemptAnswers => "exam_attempts",
            VirtualRelation::QuestionAnswers => "questions",
        }
    }

    /// 内置策略，教师 → 试卷 可由配置覆盖
    pub fn default_policy(self) -> DeletePolicy {
        match self {
            VirtualRelation::UserProfile
            | VirtualRelation::PaperQuestions
            | VirtualRelation::AttemptAnswers => DeletePolicy::Cascade,
            VirtualRelation::TeacherPapers
            | VirtualRelation::PaperAttempts
            | VirtualRelation::StudentAttempts
            | VirtualRelation::QuestionAnswers => DeletePolicy::Restrict,
        }
    }
}

impl fmt::Display for VirtualRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}.id", self.reference(), self.parent_table())
    }
}

/// 每条关系生效的删除策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletePolicies {
    teacher_papers: DeletePolicy,
}

impl DeletePolicies {
    pub fn new(teacher_papers: DeletePolicy) -> Self {
        Self { teacher_papers }
    }

    pub fn from_config(config: &IntegrityConfig) -> Self {
        Self::new(config.teacher_papers)
    }

    pub fn policy(&self, relation: VirtualRelation) -> DeletePolicy {
        match relation {
            VirtualRelation::TeacherPapers => self.teacher_papers,
            other => other.default_policy(),
        }
    }

    /// 删除 `parent_id` 前处理它在 `relation` 上的 `dependents` 个子行
    ///
    /// 返回是否需要级联删除子行；限制策略下有子行时返回 `DependentRowsExist`。
    pub fn enforce(
        &self,
        relation: VirtualRelation,
        parent_id: Uuid,
        dependents: u64,
    ) -> Result<bool> {
        if dependents == 0 {
            return Ok(false);
        }
        match self.policy(relation) {
            DeletePolicy::Cascade => Ok(true),
            DeletePolicy::Restrict => Err(ExamSystemError::dependent_rows_exist(format!(
                "{} {parent_id} is still referenced by {dependents} row(s) via {}",
                relation.parent_table(),
                relation.reference()
            ))),
        }
    }
}

impl Default for DeletePolicies {
    fn default() -> Self {
        Self::from_config(&IntegrityConfig::default())
    }
}

fn missing_reference(relation: VirtualRelation, id: Uuid) -> ExamSystemError {
    ExamSystemError::integrity_violation(format!(
        "{} references missing {} row {id}",
        relation.reference(),
        relation.parent_table()
    ))
}

// ==================== 写入时的存在性校验 ====================

/// 校验被引用的用户存在，指定角色时同时校验角色
pub(crate) async fn require_user(
    txn: &DatabaseTransaction,
    relation: VirtualRelation,
    user_id: Uuid,
    role: Option<UserRole>,
) -> Result<users::Model> {
    let user = users::Entity::find_by_id(user_id)
        .lock_shared()
        .one(txn)
        .await
        .map_err(|e| ExamSystemError::from_db("校验用户引用失败", e))?
        .ok_or_else(|| missing_reference(relation, user_id))?;

    if let Some(role) = role
        && user.role != role.to_string()
    {
        return Err(ExamSystemError::integrity_violation(format!(
            "{} must reference a {role}, user {user_id} is a {}",
            relation.reference(),
            user.role
        )));
    }

    Ok(user)
}

pub(crate) async fn require_paper(
    txn: &DatabaseTransaction,
    relation: VirtualRelation,
    paper_id: Uuid,
) -> Result<exam_papers::Model> {
    exam_papers::Entity::find_by_id(paper_id)
        .lock_shared()
        .one(txn)
        .await
        .map_err(|e| ExamSystemError::from_db("校验试卷引用失败", e))?
        .ok_or_else(|| missing_reference(relation, paper_id))
}

pub(crate) async fn require_question(
    txn: &DatabaseTransaction,
    relation: VirtualRelation,
    question_id: Uuid,
) -> Result<questions::Model> {
    questions::Entity::find_by_id(question_id)
        .lock_shared()
        .one(txn)
        .await
        .map_err(|e| ExamSystemError::from_db("校验题目引用失败", e))?
        .ok_or_else(|| missing_reference(relation, question_id))
}

pub(crate) async fn require_attempt(
    txn: &DatabaseTransaction,
    relation: VirtualRelation,
    attempt_id: Uuid,
) -> Result<exam_attempts::Model> {
    exam_attempts::Entity::find_by_id(attempt_id)
        .lock_shared()
        .one(txn)
        .await
        .map_err(|e| ExamSystemError::from_db("校验作答记录引用失败", e))?
        .ok_or_else(|| missing_reference(relation, attempt_id))
}

/// 角色变更不能让已有的试卷 / 作答记录指向角色不符的用户
pub(crate) async fn ensure_role_change_allowed(
    txn: &DatabaseTransaction,
    user: &users::Model,
    new_role: UserRole,
) -> Result<()> {
    let current = user.role.parse::<UserRole>().ok();
    if current == Some(new_role) {
        return Ok(());
    }

    let (relation, dependents) = match current {
        Some(UserRole::Teacher) => (
            VirtualRelation::TeacherPapers,
            exam_papers::Entity::find()
                .filter(exam_papers::Column::TeacherId.eq(user.id))
                .count(txn)
                .await
                .map_err(|e| ExamSystemError::from_db("统计教师试卷失败", e))?,
        ),
        Some(UserRole::Student) => (
            VirtualRelation::StudentAttempts,
            exam_attempts::Entity::find()
                .filter(exam_attempts::Column::StudentId.eq(user.id))
                .count(txn)
                .await
                .map_err(|e| ExamSystemError::from_db("统计学生作答记录失败", e))?,
        ),
        None => return Ok(()),
    };

    if dependents > 0 {
        return Err(ExamSystemError::dependent_rows_exist(format!(
            "cannot change role of user {} to {new_role}: {dependents} row(s) still reference it via {}",
            user.id,
            relation.reference()
        )));
    }
    Ok(())
}

// ==================== 删除时的策略执行 ====================

/// 删除用户：档案级联，试卷按配置，作答记录限制
pub(crate) async fn delete_user_tree(
    txn: &DatabaseTransaction,
    policies: &DeletePolicies,
    user_id: Uuid,
) -> Result<()> {
    let attempts = exam_attempts::Entity::find()
        .filter(exam_attempts::Column::StudentId.eq(user_id))
        .lock_exclusive()
        .all(txn)
        .await
        .map_err(|e| ExamSystemError::from_db("查询学生作答记录失败", e))?;
    if policies.enforce(
        VirtualRelation::StudentAttempts,
        user_id,
        attempts.len() as u64,
    )? {
        for attempt in attempts {
            delete_attempt_tree(txn, policies, attempt.id).await?;
        }
    }

    let papers = exam_papers::Entity::find()
        .filter(exam_papers::Column::TeacherId.eq(user_id))
        .lock_exclusive()
        .all(txn)
        .await
        .map_err(|e| ExamSystemError::from_db("查询教师试卷失败", e))?;
    if policies.enforce(VirtualRelation::TeacherPapers, user_id, papers.len() as u64)? {
        for paper in papers {
            delete_paper_tree(txn, policies, paper.id).await?;
        }
    }

    let profiles = user_profiles::Entity::find()
        .filter(user_profiles::Column::UserId.eq(user_id))
        .count(txn)
        .await
        .map_err(|e| ExamSystemError::from_db("查询用户档案失败", e))?;
    if policies.enforce(VirtualRelation::UserProfile, user_id, profiles)? {
        user_profiles::Entity::delete_many()
            .filter(user_profiles::Column::UserId.eq(user_id))
            .exec(txn)
            .await
            .map_err(|e| ExamSystemError::from_db("级联删除用户档案失败", e))?;
    }

    users::Entity::delete_by_id(user_id)
        .exec(txn)
        .await
        .map_err(|e| ExamSystemError::from_db("删除用户失败", e))?;
    debug!("User {} deleted with its dependents", user_id);
    Ok(())
}

/// 删除试卷：作答记录限制，题目级联
pub(crate) async fn delete_paper_tree(
    txn: &DatabaseTransaction,
    policies: &DeletePolicies,
    paper_id: Uuid,
) -> Result<()> {
    let attempts = exam_attempts::Entity::find()
        .filter(exam_attempts::Column::PaperId.eq(paper_id))
        .lock_exclusive()
        .all(txn)
        .await
        .map_err(|e| ExamSystemError::from_db("查询试卷作答记录失败", e))?;
    if policies.enforce(
        VirtualRelation::PaperAttempts,
        paper_id,
        attempts.len() as u64,
    )? {
        for attempt in attempts {
            delete_attempt_tree(txn, policies, attempt.id).await?;
        }
    }

    let questions = questions::Entity::find()
        .filter(questions::Column::PaperId.eq(paper_id))
        .lock_exclusive()
        .all(txn)
        .await
        .map_err(|e| ExamSystemError::from_db("查询试卷题目失败", e))?;
    if policies.enforce(
        VirtualRelation::PaperQuestions,
        paper_id,
        questions.len() as u64,
    )? {
        for question in questions {
            delete_question_tree(txn, policies, question.id).await?;
        }
    }

    exam_papers::Entity::delete_by_id(paper_id)
        .exec(txn)
        .await
        .map_err(|e| ExamSystemError::from_db("删除试卷失败", e))?;
    debug!("Exam paper {} deleted with its dependents", paper_id);
    Ok(())
}

/// 删除题目：已有答案引用时限制
pub(crate) async fn delete_question_tree(
    txn: &DatabaseTransaction,
    policies: &DeletePolicies,
    question_id: Uuid,
) -> Result<()> {
    let answers = exam_answers::Entity::find()
        .filter(exam_answers::Column::QuestionId.eq(question_id))
        .count(txn)
        .await
        .map_err(|e| ExamSystemError::from_db("查询题目答案失败", e))?;
    if policies.enforce(VirtualRelation::QuestionAnswers, question_id, answers)? {
        exam_answers::Entity::delete_many()
            .filter(exam_answers::Column::QuestionId.eq(question_id))
            .exec(txn)
            .await
            .map_err(|e| ExamSystemError::from_db("级联删除题目答案失败", e))?;
    }

    questions::Entity::delete_by_id(question_id)
        .exec(txn)
        .await
        .map_err(|e| ExamSystemError::from_db("删除题目失败", e))?;
    Ok(())
}

/// 删除作答记录：答案级联
pub(crate) async fn delete_attempt_tree(
    txn: &DatabaseTransaction,
    policies: &DeletePolicies,
    attempt_id: Uuid,
) -> Result<()> {
    let answers = exam_answers::Entity::find()
        .filter(exam_answers::Column::AttemptId.eq(attempt_id))
        .count(txn)
        .await
        .map_err(|e| ExamSystemError::from_db("查询作答答案失败", e))?;
    if policies.enforce(VirtualRelation::AttemptAnswers, attempt_id, answers)? {
        exam_answers::Entity::delete_many()
            .filter(exam_answers::Column::AttemptId.eq(attempt_id))
            .exec(txn)
            .await
            .map_err(|e| ExamSystemError::from_db("级联删除作答答案失败", e))?;
    }

    exam_attempts::Entity::delete_by_id(attempt_id)
        .exec(txn)
        .await
        .map_err(|e| ExamSystemError::from_db("删除作答记录失败", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_table() {
        let policies = DeletePolicies::default();
        assert_eq!(
            policies.policy(VirtualRelation::UserProfile),
            DeletePolicy::Cascade
        );
        assert_eq!(
            policies.policy(VirtualRelation::TeacherPapers),
            DeletePolicy::Restrict
        );
        assert_eq!(
            policies.policy(VirtualRelation::PaperQuestions),
            DeletePolicy::Cascade
        );
        assert_eq!(
            policies.policy(VirtualRelation::StudentAttempts),
            DeletePolicy::Restrict
        );
        assert_eq!(
            policies.policy(VirtualRelation::AttemptAnswers),
            DeletePolicy::Cascade
        );
    }

    #[test]
    fn test_teacher_papers_policy_is_configurable() {
        let policies = DeletePolicies::new(DeletePolicy::Cascade);
        assert_eq!(
            policies.policy(VirtualRelation::TeacherPapers),
            DeletePolicy::Cascade
        );
        // 其他关系不受影响
        assert_eq!(
            policies.policy(VirtualRelation::StudentAttempts),
            DeletePolicy::Restrict
        );
    }

    #[test]
    fn test_enforce() {
        let policies = DeletePolicies::default();
        let id = Uuid::now_v7();

        assert_eq!(policies.enforce(VirtualRelation::TeacherPapers, id, 0), Ok(false));
        assert_eq!(policies.enforce(VirtualRelation::PaperQuestions, id, 3), Ok(true));

        let err = policies
            .enforce(VirtualRelation::StudentAttempts, id, 2)
            .unwrap_err();
        assert!(matches!(err, ExamSystemError::DependentRowsExist(_)));
        assert!(err.message().contains("exam_attempts.student_id"));
    }

    #[test]
    fn test_every_relation_has_a_parent() {
        for relation in VirtualRelation::ALL {
            assert!(!relation.parent_table().is_empty());
            assert!(relation.reference().contains('.'));
            assert!(relation.to_string().ends_with(".id"));
        }
    }

    #[test]
    fn test_policy_deserializes_from_config_strings() {
        let policy: DeletePolicy = serde_json::from_str("\"cascade\"").expect("valid policy");
        assert_eq!(policy, DeletePolicy::Cascade);
        assert!(serde_json::from_str::<DeletePolicy>("\"orphan\"").is_err());
    }
}
