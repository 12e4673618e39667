//! 公开主页端点
//!
//! 无需会话：任何访客都能通过 `/u/{username}` 查看一个用户的
//! 链接列表。只读，不暴露 email 等私有字段。

use actix_web::{Responder, Result as ActixResult, web};
use std::sync::Arc;
use tracing::{error, info, trace};

use crate::api::services::dashboard::{
    LinkResponse, PublicProfileResponse, error_from_linkdeck, success_response,
};
use crate::errors::LinkdeckError;
use crate::services::LinkService;

pub async fn get_public_profile(
    path: web::Path<String>,
    service: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    let username = path.into_inner();
    trace!("Public profile request for handle {:?}", username);

    match service.public_profile(&username).await {
        Ok((profile, links)) => Ok(success_response(PublicProfileResponse {
            username: profile.username,
            links: links.into_iter().map(LinkResponse::from).collect(),
        })),
        Err(e @ LinkdeckError::NotFound(_)) => {
            info!("Public profile not found: {:?}", username);
            Ok(error_from_linkdeck(&e))
        }
        Err(e) => {
            error!("Public profile lookup failed for {:?}: {}", username, e);
            Ok(error_from_linkdeck(&e))
        }
    }
}

pub fn public_routes() -> actix_web::Scope {
    web::scope("/u").route("/{username}", web::get().to(get_public_profile))
}
