//! Dashboard API 链接操作
//!
//! 所有 handler 先从 request extensions 取出会话身份，再把
//! identity_id 作为显式参数传给 LinkService。

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, Result as ActixResult, web};
use std::sync::Arc;
use tracing::{error, info, trace};

use crate::errors::LinkdeckError;
use crate::services::LinkService;

use super::helpers::{
    empty_success_response, error_from_linkdeck, error_response, require_identity,
    success_response,
};
use super::error_code::ErrorCode;
use super::types::{LinkResponse, PostNewLink, ReorderRequest};

/// 获取调用者的全部链接，按 order 升序
pub async fn get_links(
    req: HttpRequest,
    service: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    let identity = match require_identity(&req) {
        Ok(identity) => identity,
        Err(e) => return Ok(error_from_linkdeck(&e)),
    };

    trace!("Dashboard API: list links for {}", identity.identity_id);

    match service.list_links(&identity.identity_id).await {
        Ok(links) => {
            let links: Vec<LinkResponse> = links.into_iter().map(LinkResponse::from).collect();
            Ok(success_response(links))
        }
        Err(e) => {
            error!(
                "Dashboard API: failed to list links for {}: {}",
                identity.identity_id, e
            );
            Ok(error_from_linkdeck(&e))
        }
    }
}

/// 创建新链接
pub async fn post_link(
    req: HttpRequest,
    body: web::Json<PostNewLink>,
    service: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    let identity = match require_identity(&req) {
        Ok(identity) => identity,
        Err(e) => return Ok(error_from_linkdeck(&e)),
    };

    info!(
        "Dashboard API: create link request - title: {:?} (owner: {})",
        body.title, identity.identity_id
    );

    match service
        .create_link(&identity.identity_id, &body.title, &body.url)
        .await
    {
        Ok(link) => Ok(success_response(LinkResponse::from(link))),
        Err(e) => {
            error!("Dashboard API: failed to create link: {}", e);
            Ok(error_from_linkdeck(&e))
        }
    }
}

/// 删除链接
///
/// id 无法解析为正整数时返回 400。id 不存在或属于别人时，和观察到的
/// 上游行为保持一致：掩盖为 204 空操作，不暴露存在性；类型化的
/// NotFound/Forbidden 区分只进日志。
pub async fn delete_link(
    req: HttpRequest,
    path: web::Path<String>,
    service: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    let identity = match require_identity(&req) {
        Ok(identity) => identity,
        Err(e) => return Ok(error_from_linkdeck(&e)),
    };

    let id: i64 = match path.parse::<i64>() {
        Ok(value) if value > 0 => value,
        _ => {
            info!("Dashboard API: invalid link id in path: {}", path);
            return Ok(error_response(
                StatusCode::BAD_REQUEST,
                ErrorCode::BadRequest,
                "Invalid link ID",
            ));
        }
    };

    info!(
        "Dashboard API: delete link request - id: {} (owner: {})",
        id, identity.identity_id
    );

    match service.delete_link(&identity.identity_id, id).await {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(LinkdeckError::NotFound(msg)) => {
            info!("Dashboard API: delete no-op (not found): {}", msg);
            Ok(HttpResponse::NoContent().finish())
        }
        Err(LinkdeckError::Forbidden(msg)) => {
            info!("Dashboard API: delete no-op (not owned): {}", msg);
            Ok(HttpResponse::NoContent().finish())
        }
        Err(e) => {
            error!("Dashboard API: failed to delete link {}: {}", id, e);
            Ok(error_from_linkdeck(&e))
        }
    }
}

/// 重排链接
///
/// 全部成功或全部失败：任何一个 id 不属于调用者都会拒绝整个请求，
/// 存储层在单个事务里应用更新。
pub async fn reorder_links(
    req: HttpRequest,
    body: web::Json<ReorderRequest>,
    service: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    let identity = match require_identity(&req) {
        Ok(identity) => identity,
        Err(e) => return Ok(error_from_linkdeck(&e)),
    };

    let submitted: Vec<i64> = body.links.iter().map(|link| link.id).collect();
    info!(
        "Dashboard API: reorder request - {} links (owner: {})",
        submitted.len(),
        identity.identity_id
    );

    match service
        .reorder_links(&identity.identity_id, &submitted)
        .await
    {
        Ok(()) => Ok(empty_success_response()),
        Err(e) => {
            error!(
                "Dashboard API: reorder failed for {}: {}",
                identity.identity_id, e
            );
            Ok(error_from_linkdeck(&e))
        }
    }
}
