use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, header::CONTENT_TYPE},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use tracing::{error, info, trace};

use crate::api::jwt::{SessionClaims, get_jwt_service};
use crate::api::services::dashboard::{ApiResponse, ErrorCode};
use crate::storage::SeaOrmStorage;

/// 已认证的调用者身份，由中间件写入 request extensions
///
/// handler 通过 `helpers::require_identity` 读取；identity_id 再作为
/// 显式参数传进 service 层。
#[derive(Clone, Debug)]
pub struct SessionIdentity {
    pub identity_id: String,
    pub email: String,
    pub username: String,
    /// 头像地址来自 claims，随会话走，不落库
    pub avatar_url: Option<String>,
}

impl From<SessionClaims> for SessionIdentity {
    fn from(claims: SessionClaims) -> Self {
        Self {
            identity_id: claims.sub,
            email: claims.email,
            username: claims.username,
            avatar_url: claims.picture,
        }
    }
}

/// Session authentication middleware
///
/// 接受 `Authorization: Bearer <jwt>` 或 session cookie 两种携带方式；
/// 验证通过后在首次见到该身份时落一行 users 记录（insert-or-ignore）。
#[derive(Clone)]
pub struct SessionAuth;

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        let config = crate::config::get_config();
        ready(Ok(SessionAuthMiddleware {
            service: Rc::new(service),
            cookie_name: config.auth.session_cookie.clone(),
        }))
    }
}

pub struct SessionAuthMiddleware<S> {
    service: Rc<S>,
    cookie_name: String,
}

impl<S, B> SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    /// Handle OPTIONS requests for CORS preflight
    fn handle_options_request(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        req.into_response(
            HttpResponse::NoContent()
                .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
                .finish()
                .map_into_right_body(),
        )
    }

    /// Handle unauthorized requests
    fn handle_unauthorized(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        info!("Session authentication failed - invalid or missing token");
        req.into_response(
            HttpResponse::Unauthorized()
                .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
                .json(ApiResponse::<()> {
                    code: ErrorCode::Unauthorized as i32,
                    message: "Unauthorized: Invalid or missing session".to_string(),
                    data: None,
                })
                .map_into_right_body(),
        )
    }

    /// Handle storage failures during user provisioning
    fn handle_internal_error(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        req.into_response(
            HttpResponse::InternalServerError()
                .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
                .json(ApiResponse::<()> {
                    code: ErrorCode::InternalServerError as i32,
                    message: "Internal Error".to_string(),
                    data: None,
                })
                .map_into_right_body(),
        )
    }

    /// 从 Authorization header 提取 Bearer token
    fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
        req.headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.to_string())
    }

    /// 从 Cookie 提取 session token
    fn extract_cookie_token(req: &ServiceRequest, cookie_name: &str) -> Option<String> {
        req.cookie(cookie_name).map(|c| c.value().to_string())
    }

    /// 验证 token，返回 claims
    fn validate_token(token: &str) -> Option<SessionClaims> {
        let jwt_service = get_jwt_service();
        match jwt_service.validate_session_token(token) {
            Ok(claims) => {
                trace!("Session token validation successful for {}", claims.sub);
                Some(claims)
            }
            Err(e) => {
                info!("Session token validation failed: {}", e);
                None
            }
        }
    }
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let cookie_name = self.cookie_name.clone();

        Box::pin(async move {
            // Handle CORS preflight requests
            if req.method() == Method::OPTIONS {
                return Ok(Self::handle_options_request(req));
            }

            // Bearer 优先，其次 Cookie
            let token = Self::extract_bearer_token(&req)
                .or_else(|| Self::extract_cookie_token(&req, &cookie_name));

            let claims = match token.as_deref().and_then(Self::validate_token) {
                Some(claims) => claims,
                None => return Ok(Self::handle_unauthorized(req)),
            };

            // 首次认证时创建用户行；已存在则是 no-op
            if let Some(storage) = req.app_data::<web::Data<Arc<SeaOrmStorage>>>() {
                if let Err(e) = storage
                    .ensure_user(&claims.sub, &claims.email, &claims.username)
                    .await
                {
                    error!("Failed to provision user {}: {}", claims.sub, e);
                    return Ok(Self::handle_internal_error(req));
                }
            }

            req.extensions_mut().insert(SessionIdentity::from(claims));
            let response = srv.call(req).await?.map_into_left_body();
            Ok(response)
        })
    }
}
