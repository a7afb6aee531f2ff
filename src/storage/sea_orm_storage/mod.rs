//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 每个写操作都是「开启事务 → 虚拟外键校验 → 写入 → 提交」，
//! 整个事务在瞬时错误时由 [`RetryPolicy`] 重新执行。

mod exam_answers;
mod exam_attempts;
mod exam_papers;
mod questions;
mod user_profiles;
mod users;

#[cfg(test)]
mod tests;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{ExamSystemError, Result};
use crate::storage::integrity::DeletePolicies;
use crate::storage::retry::RetryPolicy;
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, TransactionTrait,
};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
    pub(crate) policies: DeletePolicies,
    pub(crate) retry: RetryPolicy,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database,
            DeletePolicies::from_config(&config.integrity),
            RetryPolicy::from_config(&config.retry),
        )
        .await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(
        database: &DatabaseConfig,
        policies: DeletePolicies,
        retry: RetryPolicy,
    ) -> Result<Self> {
        let db_url = Self::build_database_url(&database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, database).await?
        } else {
            Self::connect_generic(&db_url, database).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!(
            "SeaORM 存储初始化完成，教师试卷删除策略: {:?}",
            policies.policy(crate::storage::integrity::VirtualRelation::TeacherPapers)
        );

        Ok(Self {
            db,
            policies,
            retry,
        })
    }

    /// 开启事务，所有校验与写入都在其中完成；未提交即丢弃时自动回滚
    pub(crate) async fn begin(&self) -> Result<DatabaseTransaction> {
        self.db
            .begin()
            .await
            .map_err(|e| ExamSystemError::from_db("开启事务失败", e))
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ExamSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        // 内存数据库每个连接都是独立的库，只能使用单连接且不能被回收
        let in_memory = url.contains(":memory:");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.pool_size)
                .min_connections(1)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| ExamSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| ExamSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(ExamSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 提交事务
pub(crate) async fn commit(txn: DatabaseTransaction) -> Result<()> {
    txn.commit()
        .await
        .map_err(|e| ExamSystemError::from_db("提交事务失败", e))
}

/// 当前 Unix 时间戳（秒）
pub(crate) fn now_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

// Storage trait 实现
use crate::models::{
    exam_answers::{
        entities::ExamAnswer,
        requests::{CreateExamAnswerRequest, UpdateExamAnswerRequest},
    },
    exam_attempts::{
        entities::ExamAttempt,
        requests::{CreateExamAttemptRequest, ExamAttemptListQuery},
        responses::ExamAttemptListResponse,
    },
    exam_papers::{
        entities::ExamPaper,
        requests::{
            CreateExamPaperRequest, ExamPaperCursorQuery, ExamPaperListQuery,
            UpdateExamPaperRequest,
        },
        responses::{ExamPaperContent, ExamPaperCursorResponse, ExamPaperListResponse},
    },
    questions::{
        entities::Question,
        requests::{CreateQuestionRequest, UpdateQuestionRequest},
    },
    users::{
        entities::{User, UserProfile},
        requests::{
            CreateUserProfileRequest, CreateUserRequest, UpdateUserProfileRequest,
            UpdateUserRequest, UserListQuery,
        },
        responses::{UserListResponse, UserSummary},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: Uuid, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn get_user_summary(&self, id: Uuid) -> Result<Option<UserSummary>> {
        self.get_user_summary_impl(id).await
    }

    // 用户档案模块
    async fn create_user_profile(
        &self,
        user_id: Uuid,
        profile: CreateUserProfileRequest,
    ) -> Result<UserProfile> {
        self.create_user_profile_impl(user_id, profile).await
    }

    async fn get_user_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>> {
        self.get_user_profile_impl(user_id).await
    }

    async fn update_user_profile(
        &self,
        user_id: Uuid,
        update: UpdateUserProfileRequest,
    ) -> Result<Option<UserProfile>> {
        self.update_user_profile_impl(user_id, update).await
    }

    async fn delete_user_profile(&self, user_id: Uuid) -> Result<bool> {
        self.delete_user_profile_impl(user_id).await
    }

    // 试卷模块
    async fn create_exam_paper(&self, paper: CreateExamPaperRequest) -> Result<ExamPaper> {
        self.create_exam_paper_impl(paper).await
    }

    async fn get_exam_paper_by_id(&self, id: Uuid) -> Result<Option<ExamPaper>> {
        self.get_exam_paper_by_id_impl(id).await
    }

    async fn list_exam_papers_with_pagination(
        &self,
        query: ExamPaperListQuery,
    ) -> Result<ExamPaperListResponse> {
        self.list_exam_papers_with_pagination_impl(query).await
    }

    async fn list_teacher_exam_papers(
        &self,
        teacher_id: Uuid,
        query: ExamPaperCursorQuery,
    ) -> Result<ExamPaperCursorResponse> {
        self.list_teacher_exam_papers_impl(teacher_id, query).await
    }

    async fn get_exam_paper_content(&self, id: Uuid) -> Result<Option<ExamPaperContent>> {
        self.get_exam_paper_content_impl(id).await
    }

    async fn update_exam_paper(
        &self,
        id: Uuid,
        update: UpdateExamPaperRequest,
    ) -> Result<Option<ExamPaper>> {
        self.update_exam_paper_impl(id, update).await
    }

    async fn delete_exam_paper(&self, id: Uuid) -> Result<bool> {
        self.delete_exam_paper_impl(id).await
    }

    // 题目模块
    async fn create_question(
        &self,
        paper_id: Uuid,
        question: CreateQuestionRequest,
    ) -> Result<Question> {
        self.create_question_impl(paper_id, question).await
    }

    async fn create_questions(
        &self,
        paper_id: Uuid,
        questions: Vec<CreateQuestionRequest>,
    ) -> Result<Vec<Question>> {
        self.create_questions_impl(paper_id, questions).await
    }

    async fn get_question_by_id(&self, id: Uuid) -> Result<Option<Question>> {
        self.get_question_by_id_impl(id).await
    }

    async fn list_questions_by_paper(&self, paper_id: Uuid) -> Result<Vec<Question>> {
        self.list_questions_by_paper_impl(paper_id).await
    }

    async fn update_question(
        &self,
        id: Uuid,
        update: UpdateQuestionRequest,
    ) -> Result<Option<Question>> {
        self.update_question_impl(id, update).await
    }

    async fn delete_question(&self, id: Uuid) -> Result<bool> {
        self.delete_question_impl(id).await
    }

    // 作答记录模块
    async fn create_exam_attempt(
        &self,
        attempt: CreateExamAttemptRequest,
    ) -> Result<ExamAttempt> {
        self.create_exam_attempt_impl(attempt).await
    }

    async fn get_exam_attempt_by_id(&self, id: Uuid) -> Result<Option<ExamAttempt>> {
        self.get_exam_attempt_by_id_impl(id).await
    }

    async fn list_exam_attempts_with_pagination(
        &self,
        query: ExamAttemptListQuery,
    ) -> Result<ExamAttemptListResponse> {
        self.list_exam_attempts_with_pagination_impl(query).await
    }

    async fn finish_exam_attempt(&self, id: Uuid) -> Result<Option<ExamAttempt>> {
        self.finish_exam_attempt_impl(id).await
    }

    async fn delete_exam_attempt(&self, id: Uuid) -> Result<bool> {
        self.delete_exam_attempt_impl(id).await
    }

    // 答案模块
    async fn create_exam_answer(
        &self,
        attempt_id: Uuid,
        answer: CreateExamAnswerRequest,
    ) -> Result<ExamAnswer> {
        self.create_exam_answer_impl(attempt_id, answer).await
    }

    async fn list_exam_answers_by_attempt(&self, attempt_id: Uuid) -> Result<Vec<ExamAnswer>> {
        self.list_exam_answers_by_attempt_impl(attempt_id).await
    }

    async fn update_exam_answer(
        &self,
        id: Uuid,
        update: UpdateExamAnswerRequest,
    ) -> Result<Option<ExamAnswer>> {
        self.update_exam_answer_impl(id, update).await
    }

    async fn delete_exam_answer(&self, id: Uuid) -> Result<bool> {
        self.delete_exam_answer_impl(id).await
    }
}
