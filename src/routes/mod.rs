pub mod exam_answers;

pub mod exam_attempts;

pub mod exam_papers;

pub mod questions;

pub mod system;

pub mod users;


pub use exam_answers::configure_exam_answers_routes;
pub use exam_attempts::configure_exam_attempts_routes;
pub use exam_papers::configure_exam_papers_routes;
pub use questions::configure_questions_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;
