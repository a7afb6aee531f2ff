use std::sync::Arc;

use uuid::Uuid;

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

use crate::errors::Result;

pub mod integrity;
pub mod retry;
pub mod sea_orm_storage;

/// 存储层接口
///
/// 所有写操作都在单个事务内完成虚拟外键校验与写入，
/// 引用缺失返回 `IntegrityViolation`，受限删除返回 `DependentRowsExist`。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: Uuid, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户（档案级联，试卷按配置，作答记录限制）
    async fn delete_user(&self, id: Uuid) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;
    // 用户概览（档案 + 名下试卷总数）
    async fn get_user_summary(&self, id: Uuid) -> Result<Option<UserSummary>>;

    /// 用户档案方法
    // 创建档案，已存在时返回 Conflict
    async fn create_user_profile(
        &self,
        user_id: Uuid,
        profile: CreateUserProfileRequest,
    ) -> Result<UserProfile>;
    // 获取档案
    async fn get_user_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>>;
    // 更新档案
    async fn update_user_profile(
        &self,
        user_id: Uuid,
        update: UpdateUserProfileRequest,
    ) -> Result<Option<UserProfile>>;
    // 删除档案
    async fn delete_user_profile(&self, user_id: Uuid) -> Result<bool>;

    /// 试卷管理方法
    // 创建试卷
    async fn create_exam_paper(&self, paper: CreateExamPaperRequest) -> Result<ExamPaper>;
    // 通过ID获取试卷
    async fn get_exam_paper_by_id(&self, id: Uuid) -> Result<Option<ExamPaper>>;
    // 列出试卷
    async fn list_exam_papers_with_pagination(
        &self,
        query: ExamPaperListQuery,
    ) -> Result<ExamPaperListResponse>;
    // 按游标列出教师的试卷，教师不存在时返回 NotFound
    async fn list_teacher_exam_papers(
        &self,
        teacher_id: Uuid,
        query: ExamPaperCursorQuery,
    ) -> Result<ExamPaperCursorResponse>;
    // 一次读取试卷及其全部题目
    async fn get_exam_paper_content(&self, id: Uuid) -> Result<Option<ExamPaperContent>>;
    // 更新试卷（可转交给其他教师）
    async fn update_exam_paper(
        &self,
        id: Uuid,
        update: UpdateExamPaperRequest,
    ) -> Result<Option<ExamPaper>>;
    // 删除试卷（题目级联，作答记录限制）
    async fn delete_exam_paper(&self, id: Uuid) -> Result<bool>;

    /// 题目管理方法
    // 在试卷下创建题目
    async fn create_question(
        &self,
        paper_id: Uuid,
        question: CreateQuestionRequest,
    ) -> Result<Question>;
    // 批量创建题目，全部成功或全部失败
    async fn create_questions(
        &self,
        paper_id: Uuid,
        questions: Vec<CreateQuestionRequest>,
    ) -> Result<Vec<Question>>;
    // 通过ID获取题目
    async fn get_question_by_id(&self, id: Uuid) -> Result<Option<Question>>;
    // 列出试卷下的题目，试卷不存在时返回 NotFound
    async fn list_questions_by_paper(&self, paper_id: Uuid) -> Result<Vec<Question>>;
    // 更新题目（可移动到其他试卷）
    async fn update_question(
        &self,
        id: Uuid,
        update: UpdateQuestionRequest,
    ) -> Result<Option<Question>>;
    // 删除题目（已有答案时限制）
    async fn delete_question(&self, id: Uuid) -> Result<bool>;

    /// 作答记录方法
    // 开始作答
    async fn create_exam_attempt(&self, attempt: CreateExamAttemptRequest)
    -> Result<ExamAttempt>;
    // 通过ID获取作答记录
    async fn get_exam_attempt_by_id(&self, id: Uuid) -> Result<Option<ExamAttempt>>;
    // 列出作答记录
    async fn list_exam_attempts_with_pagination(
        &self,
        query: ExamAttemptListQuery,
    ) -> Result<ExamAttemptListResponse>;
    // 交卷并计分
    async fn finish_exam_attempt(&self, id: Uuid) -> Result<Option<ExamAttempt>>;
    // 删除作答记录（答案级联）
    async fn delete_exam_attempt(&self, id: Uuid) -> Result<bool>;

    /// 答案方法
    // 提交答案
    async fn create_exam_answer(
        &self,
        attempt_id: Uuid,
        answer: CreateExamAnswerRequest,
    ) -> Result<ExamAnswer>;
    // 列出作答记录下的答案，作答记录不存在时返回 NotFound
    async fn list_exam_answers_by_attempt(&self, attempt_id: Uuid) -> Result<Vec<ExamAnswer>>;
    // 修改答案
    async fn update_exam_answer(
        &self,
        id: Uuid,
        update: UpdateExamAnswerRequest,
    ) -> Result<Option<ExamAnswer>>;
    // 删除答案
    async fn delete_exam_answer(&self, id: Uuid) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
