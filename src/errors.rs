//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

use sea_orm::{DbErr, SqlErr};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_exam_system_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum ExamSystemError {
            $($variant(String),)*
        }

        impl ExamSystemError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ExamSystemError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ExamSystemError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ExamSystemError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl ExamSystemError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ExamSystemError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_exam_system_errors! {
    Configuration("E001", "Configuration Error"),
    DatabaseConfig("E002", "Database Configuration Error"),
    DatabaseConnection("E003", "Database Connection Error"),
    DatabaseOperation("E004", "Database Operation Error"),
    TransactionConflict("E005", "Transaction Conflict"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    IntegrityViolation("E008", "Integrity Violation"),
    DependentRowsExist("E009", "Dependent Rows Exist"),
    Conflict("E010", "Conflict"),
    Serialization("E011", "Serialization Error"),
}

impl ExamSystemError {
    /// 按数据库错误的性质归类，并附加上下文
    ///
    /// 唯一约束冲突归为 `Conflict`，连接问题归为 `DatabaseConnection`，
    /// 序列化失败 / 死锁 / SQLite 忙归为 `TransactionConflict`，其余为 `DatabaseOperation`。
    pub fn from_db(context: &str, err: DbErr) -> Self {
        let msg = format!("{context}: {err}");

        if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
            || is_unique_violation_message(&msg)
        {
            return ExamSystemError::Conflict(msg);
        }

        match err {
            DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
                ExamSystemError::DatabaseConnection(msg)
            }
            _ if is_transaction_conflict_message(&msg) => {
                ExamSystemError::TransactionConflict(msg)
            }
            _ => ExamSystemError::DatabaseOperation(msg),
        }
    }

    /// 是否为可重试的瞬时错误
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ExamSystemError::DatabaseConnection(_) | ExamSystemError::TransactionConflict(_)
        )
    }

    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

fn is_unique_violation_message(msg: &str) -> bool {
    msg.contains("UNIQUE constraint failed")
        || msg.contains("duplicate key value")
        || msg.contains("Duplicate entry")
}

fn is_transaction_conflict_message(msg: &str) -> bool {
    msg.contains("could not serialize access")
        || msg.contains("deadlock detected")
        || msg.contains("Deadlock found")
        || msg.contains("database is locked")
        || msg.contains("database table is locked")
}

impl fmt::Display for ExamSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ExamSystemError {}

// 为常见的错误类型实现 From trait
impl From<DbErr> for ExamSystemError {
    fn from(err: DbErr) -> Self {
        ExamSystemError::from_db("数据库操作失败", err)
    }
}

impl From<serde_json::Error> for ExamSystemError {
    fn from(err: serde_json::Error) -> Self {
        ExamSystemError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for ExamSystemError {
    fn from(err: config::ConfigError) -> Self {
        ExamSystemError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExamSystemError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ExamSystemError::configuration("test").code(), "E001");
        assert_eq!(ExamSystemError::validation("test").code(), "E006");
        assert_eq!(ExamSystemError::integrity_violation("test").code(), "E008");
        assert_eq!(ExamSystemError::dependent_rows_exist("test").code(), "E009");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            ExamSystemError::integrity_violation("test").error_type(),
            "Integrity Violation"
        );
        assert_eq!(
            ExamSystemError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = ExamSystemError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = ExamSystemError::conflict("email already exists");
        let formatted = err.format_simple();
        assert!(formatted.contains("Conflict"));
        assert!(formatted.contains("email already exists"));
    }

    #[test]
    fn test_db_error_classification() {
        let unique = DbErr::Custom("UNIQUE constraint failed: users.email".to_string());
        assert!(matches!(
            ExamSystemError::from_db("创建用户失败", unique),
            ExamSystemError::Conflict(_)
        ));

        let locked = DbErr::Custom("database is locked".to_string());
        let err = ExamSystemError::from_db("删除试卷失败", locked);
        assert!(matches!(err, ExamSystemError::TransactionConflict(_)));
        assert!(err.is_transient());

        let other = DbErr::Custom("syntax error".to_string());
        let err = ExamSystemError::from_db("查询失败", other);
        assert!(matches!(err, ExamSystemError::DatabaseOperation(_)));
        assert!(!err.is_transient());
        assert!(err.message().starts_with("查询失败"));
    }

    #[test]
    fn test_client_errors_are_not_transient() {
        for err in [
            ExamSystemError::integrity_violation("x"),
            ExamSystemError::dependent_rows_exist("x"),
            ExamSystemError::conflict("x"),
            ExamSystemError::not_found("x"),
        ] {
            assert!(!err.is_transient());
        }
    }
}
