pub mod common;
pub mod exam_answers;
pub mod exam_attempts;
pub mod exam_papers;
pub mod questions;
pub mod users;

pub use common::{ApiResponse, PaginationInfo, PaginationQuery};


// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

// 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    InvalidParameter = 1001,
    NotFound = 1004,
    Conflict = 1009,
    IntegrityViolation = 1010,
    DependentRowsExist = 1011,

    // 用户
    UserNotFound = 2004,
    UserAlreadyExists = 2009,
    UserEmailInvalid = 2010,
    UserProfileNotFound = 2104,
    UserProfileAlreadyExists = 2109,

    // 试卷与题目
    ExamPaperNotFound = 3004,
    ExamPaperTitleInvalid = 3010,
    QuestionNotFound = 3104,
    QuestionInvalid = 3110,

    // 作答
    ExamAttemptNotFound = 4004,
    ExamAttemptAlreadyExists = 4009,
    ExamAttemptFinished = 4010,
    ExamAnswerNotFound = 4104,
    ExamAnswerAlreadyExists = 4109,

    // 服务端错误
    InternalServerError = 5000,
    ServiceUnavailable = 5003,
}
