//! API 模块常量定义

/// Session Cookie 名称（可被配置覆盖，见 `auth.session_cookie`）
pub const SESSION_COOKIE_NAME: &str = "linkdeck_session";
