pub mod exam_answers;
pub mod exam_attempts;
pub mod exam_papers;
pub mod questions;
pub mod system;
pub mod users;

pub use exam_answers::ExamAnswerService;
pub use exam_attempts::ExamAttemptService;
pub use exam_papers::ExamPaperService;
pub use questions::QuestionService;
pub use system::SystemService;
pub use users::UserService;
