//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。
//!
//! 实体间的 Relation 只存在于 ORM 层，数据库中没有对应的外键约束。

pub mod prelude;

pub mod exam_answers;
pub mod exam_attempts;
pub mod exam_papers;
pub mod questions;
pub mod user_profiles;
pub mod users;
