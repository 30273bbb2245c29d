//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_erp_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum ErpError {
            $($variant(String),)*
        }

        impl ErpError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ErpError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ErpError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ErpError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl ErpError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ErpError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_erp_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    Conflict("E006", "Resource Conflict"),
    FileOperation("E007", "File Operation Error"),
}

impl ErpError {
    /// 是否为校验错误（由调用方转换为 400）
    pub fn is_validation(&self) -> bool {
        matches!(self, ErpError::Validation(_))
    }

    /// 转换写操作的数据库错误，唯一约束冲突归为 Conflict
    pub fn from_db_write(context: &str, err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                ErpError::Conflict(format!("{context}: {detail}"))
            }
            _ => ErpError::DatabaseOperation(format!("{context}: {err}")),
        }
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

impl fmt::Display for ErpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ErpError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for ErpError {
    fn from(err: sea_orm::DbErr) -> Self {
        ErpError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for ErpError {
    fn from(err: std::io::Error) -> Self {
        ErpError::FileOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ErpError>;
