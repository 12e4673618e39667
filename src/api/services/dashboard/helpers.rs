//! Dashboard API 帮助函数

use actix_web::http::StatusCode;
use actix_web::{HttpMessage, HttpRequest, HttpResponse};
use serde::Serialize;

use crate::api::middleware::SessionIdentity;
use crate::errors::LinkdeckError;

use super::error_code::ErrorCode;
use super::types::ApiResponse;

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

/// 构建空数据的成功响应
pub fn empty_success_response() -> HttpResponse {
    json_response::<()>(StatusCode::OK, ErrorCode::Success, "OK", None)
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 LinkdeckError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
///
/// 5xx 的内部细节只进日志，响应体里是统一文案。
pub fn error_from_linkdeck(err: &LinkdeckError) -> HttpResponse {
    let status = err.http_status();
    let error_code = ErrorCode::from(err.clone());
    error_response(status, error_code, err.public_message())
}

/// 统一 Result → HttpResponse 转换
///
/// 成功时返回 200 OK + JSON 数据，失败时自动映射 LinkdeckError。
pub fn api_result<T, E>(result: Result<T, E>) -> HttpResponse
where
    T: Serialize,
    E: Into<LinkdeckError>,
{
    match result {
        Ok(data) => success_response(data),
        Err(e) => {
            let err: LinkdeckError = e.into();
            error_from_linkdeck(&err)
        }
    }
}

/// 从 request extensions 取出中间件写入的身份
///
/// 身份从这里开始以显式参数向下传递，service 层不读任何全局状态。
pub fn require_identity(req: &HttpRequest) -> Result<SessionIdentity, LinkdeckError> {
    req.extensions()
        .get::<SessionIdentity>()
        .cloned()
        .ok_or_else(|| LinkdeckError::unauthorized("no session identity on request"))
}
