use actix_web::http::StatusCode;
use std::fmt;

#[derive(Debug, Clone)]
pub enum LinkdeckError {
    Unauthorized(String),
    Forbidden(String),
    Validation(String),
    NotFound(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Serialization(String),
}

impl LinkdeckError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinkdeckError::Unauthorized(_) => "E001",
            LinkdeckError::Forbidden(_) => "E002",
            LinkdeckError::Validation(_) => "E003",
            LinkdeckError::NotFound(_) => "E004",
            LinkdeckError::DatabaseConfig(_) => "E005",
            LinkdeckError::DatabaseConnection(_) => "E006",
            LinkdeckError::DatabaseOperation(_) => "E007",
            LinkdeckError::Serialization(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkdeckError::Unauthorized(_) => "Unauthorized",
            LinkdeckError::Forbidden(_) => "Forbidden",
            LinkdeckError::Validation(_) => "Validation Error",
            LinkdeckError::NotFound(_) => "Resource Not Found",
            LinkdeckError::DatabaseConfig(_) => "Database Configuration Error",
            LinkdeckError::DatabaseConnection(_) => "Database Connection Error",
            LinkdeckError::DatabaseOperation(_) => "Database Operation Error",
            LinkdeckError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinkdeckError::Unauthorized(msg) => msg,
            LinkdeckError::Forbidden(msg) => msg,
            LinkdeckError::Validation(msg) => msg,
            LinkdeckError::NotFound(msg) => msg,
            LinkdeckError::DatabaseConfig(msg) => msg,
            LinkdeckError::DatabaseConnection(msg) => msg,
            LinkdeckError::DatabaseOperation(msg) => msg,
            LinkdeckError::Serialization(msg) => msg,
        }
    }

    /// 映射到 HTTP 状态码
    ///
    /// 存储和序列化错误一律 500，详情只进日志不出响应。
    pub fn http_status(&self) -> StatusCode {
        match self {
            LinkdeckError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            LinkdeckError::Forbidden(_) => StatusCode::FORBIDDEN,
            LinkdeckError::Validation(_) => StatusCode::BAD_REQUEST,
            LinkdeckError::NotFound(_) => StatusCode::NOT_FOUND,
            LinkdeckError::DatabaseConfig(_)
            | LinkdeckError::DatabaseConnection(_)
            | LinkdeckError::DatabaseOperation(_)
            | LinkdeckError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 客户端可见的消息
    ///
    /// 5xx 错误返回统一文案，内部细节不泄漏给调用方。
    pub fn public_message(&self) -> &str {
        if self.http_status().is_server_error() {
            "Internal Error"
        } else {
            self.message()
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LinkdeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkdeckError {}

// 便捷的构造函数
impl LinkdeckError {
    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        LinkdeckError::Unauthorized(msg.into())
    }

    pub fn forbidden<T: Into<String>>(msg: T) -> Self {
        LinkdeckError::Forbidden(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LinkdeckError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LinkdeckError::NotFound(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        LinkdeckError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        LinkdeckError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        LinkdeckError::DatabaseOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinkdeckError::Serialization(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for LinkdeckError {
    fn from(err: sea_orm::DbErr) -> Self {
        LinkdeckError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for LinkdeckError {
    fn from(err: std::io::Error) -> Self {
        LinkdeckError::DatabaseConfig(err.to_string())
    }
}

impl From<serde_json::Error> for LinkdeckError {
    fn from(err: serde_json::Error) -> Self {
        LinkdeckError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkdeckError>;
