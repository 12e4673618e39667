//! 调用者自己的档案（dashboard 预览）

use actix_web::{HttpRequest, Responder, Result as ActixResult, web};
use std::sync::Arc;
use tracing::{error, trace};

use crate::services::LinkService;

use super::helpers::{error_from_linkdeck, require_identity, success_response};
use super::types::{LinkResponse, ProfileResponse};

/// 获取调用者的展示身份与链接列表
///
/// username/email 以数据库里的档案为准，头像来自会话 claims。
pub async fn get_profile(
    req: HttpRequest,
    service: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    let identity = match require_identity(&req) {
        Ok(identity) => identity,
        Err(e) => return Ok(error_from_linkdeck(&e)),
    };

    trace!("Dashboard API: profile request for {}", identity.identity_id);

    match service.profile(&identity.identity_id).await {
        Ok((profile, links)) => Ok(success_response(ProfileResponse {
            username: profile.username,
            email: profile.email,
            avatar_url: identity.avatar_url,
            links: links.into_iter().map(LinkResponse::from).collect(),
        })),
        Err(e) => {
            error!(
                "Dashboard API: failed to load profile for {}: {}",
                identity.identity_id, e
            );
            Ok(error_from_linkdeck(&e))
        }
    }
}
