//! 会话验证端点
//!
//! token 的验证已由 SessionAuth 中间件完成，能走到这里的请求
//! 一定带着有效身份；dashboard 用它做启动时的会话探测。

use actix_web::{HttpRequest, Responder, Result as ActixResult};
use tracing::trace;

use super::helpers::{error_from_linkdeck, require_identity, success_response};
use super::types::SessionResponse;

pub async fn verify_session(req: HttpRequest) -> ActixResult<impl Responder> {
    let identity = match require_identity(&req) {
        Ok(identity) => identity,
        Err(e) => return Ok(error_from_linkdeck(&e)),
    };

    trace!("Session verified for {}", identity.identity_id);

    Ok(success_response(SessionResponse {
        identity_id: identity.identity_id,
        email: identity.email,
        username: identity.username,
    }))
}
