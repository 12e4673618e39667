//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};
use ts_rs::TS;

use super::types::TS_EXPORT_PATH;

use crate::errors::LinkdeckError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字，ts-rs 自动生成 TypeScript 类型。
/// 按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 认证错误
/// - 3000-3099: 链接错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[ts(rename = "ErrorCode")]
#[ts(repr(enum))]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,

    // 认证错误 2000-2099
    TokenExpired = 2001,
    TokenInvalid = 2002,

    // 链接错误 3000-3099
    LinkNotFound = 3000,
    LinkInvalidUrl = 3002,
    LinkEmptyTitle = 3003,
    LinkNotOwned = 3004,
    LinkDatabaseError = 3005,
}

impl From<LinkdeckError> for ErrorCode {
    fn from(err: LinkdeckError) -> Self {
        match err {
            LinkdeckError::Unauthorized(_) => ErrorCode::Unauthorized,
            LinkdeckError::Forbidden(_) => ErrorCode::Forbidden,
            LinkdeckError::Validation(_) => ErrorCode::BadRequest,
            LinkdeckError::NotFound(_) => ErrorCode::NotFound,
            LinkdeckError::DatabaseConfig(_)
            | LinkdeckError::DatabaseConnection(_)
            | LinkdeckError::DatabaseOperation(_) => ErrorCode::LinkDatabaseError,
            LinkdeckError::Serialization(_) => ErrorCode::InternalServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_mapping() {
        assert_eq!(
            ErrorCode::from(LinkdeckError::unauthorized("x")),
            ErrorCode::Unauthorized
        );
        assert_eq!(
            ErrorCode::from(LinkdeckError::forbidden("x")),
            ErrorCode::Forbidden
        );
        assert_eq!(
            ErrorCode::from(LinkdeckError::validation("x")),
            ErrorCode::BadRequest
        );
        assert_eq!(
            ErrorCode::from(LinkdeckError::database_operation("x")),
            ErrorCode::LinkDatabaseError
        );
    }
}
