//! 预导入模块，方便使用

pub use super::exam_answers::{
    ActiveModel as ExamAnswerActiveModel, Entity as ExamAnswers, Model as ExamAnswerModel,
};
pub use super::exam_attempts::{
    ActiveModel as ExamAttemptActiveModel, Entity as ExamAttempts, Model as ExamAttemptModel,
};
pub use super::exam_papers::{
    ActiveModel as ExamPaperActiveModel, Entity as ExamPapers, Model as ExamPaperModel,
};
pub use super::questions::{
    ActiveModel as QuestionActiveModel, Entity as Questions, Model as QuestionModel,
};
pub use super::user_profiles::{
    ActiveModel as UserProfileActiveModel, Entity as UserProfiles, Model as UserProfileModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
