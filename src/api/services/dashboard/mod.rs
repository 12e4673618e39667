//! Dashboard API 服务模块
//!
//! 该模块包含 dashboard 所消费的全部端点：
//! - 链接 CRUD 与重排
//! - 档案预览
//! - 会话验证

mod auth;
pub mod error_code;
mod helpers;
mod links;
mod profile;
pub mod routes;
mod types;

// 重新导出类型
pub use types::*;

// 重新导出帮助函数
pub use helpers::{
    api_result, empty_success_response, error_from_linkdeck, error_response, require_identity,
    success_response,
};

// 重新导出错误码
pub use error_code::ErrorCode;

// 重新导出端点
pub use auth::verify_session;
pub use links::{delete_link, get_links, post_link, reorder_links};
pub use profile::get_profile;
