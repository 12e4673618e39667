//! Dashboard API 路由配置

use actix_web::web;

use super::auth::verify_session;
use super::links::{delete_link, get_links, post_link, reorder_links};
use super::profile::get_profile;

/// 链接管理路由 `/links`
///
/// 包含：
/// - GET /links - 获取调用者的全部链接（按 order 升序）
/// - POST /links - 创建链接
/// - PUT /links/reorder - 重排（必须在 /{id} 之前注册）
/// - DELETE /links/{id} - 删除链接
pub fn links_routes() -> actix_web::Scope {
    web::scope("/links")
        .route("", web::get().to(get_links))
        .route("", web::post().to(post_link))
        // reorder must be before /{id}
        .route("/reorder", web::put().to(reorder_links))
        .route("/{id}", web::delete().to(delete_link))
}

/// 档案路由 `/profile`
pub fn profile_routes() -> actix_web::Scope {
    web::scope("/profile").route("", web::get().to(get_profile))
}

/// 认证路由 `/auth`
pub fn auth_routes() -> actix_web::Scope {
    web::scope("/auth").route("/verify", web::get().to(verify_session))
}

/// Dashboard API 路由 `/api`
///
/// 组合所有子模块路由。调用方负责在挂载时套上 SessionAuth 中间件。
pub fn api_routes() -> actix_web::Scope {
    web::scope("/api")
        .service(links_routes())
        .service(profile_routes())
        .service(auth_routes())
}
