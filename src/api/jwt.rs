use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Global cached JwtService instance
static JWT_SERVICE: OnceLock<JwtService> = OnceLock::new();

/// Get the cached JwtService instance
///
/// Uses OnceLock for thread-safe lazy initialization.
/// The service is initialized once on first use and reused for all subsequent requests.
pub fn get_jwt_service() -> &'static JwtService {
    JWT_SERVICE.get_or_init(JwtService::from_config)
}

/// Session Token Claims
///
/// 由身份提供方签发：`sub` 是稳定的身份字符串，本服务所有
/// 链接操作都以它作为授权键。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub email: String,
    pub username: String,
    /// 头像地址，由身份提供方维护，本服务不落库
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// JWT Service for validating (and, in tests and tooling, generating)
/// session tokens signed with the secret shared with the identity provider.
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Create JwtService from config
    pub fn from_config() -> Self {
        let config = crate::config::get_config();

        // 获取 JWT secret，如果为空则生成一个安全的随机值
        let jwt_secret = if config.auth.jwt_secret.is_empty() {
            use tracing::warn;
            warn!("JWT secret not configured or empty, generating secure random token");
            crate::utils::generate_secure_token(32)
        } else {
            config.auth.jwt_secret.clone()
        };

        Self::new(&jwt_secret)
    }

    /// Validate a session token and return its claims
    pub fn validate_session_token(
        &self,
        token: &str,
    ) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())?;
        Ok(token_data.claims)
    }

    /// Generate a session token
    ///
    /// 生产部署中 token 由身份提供方签发；这里的实现用于本地
    /// 开发和集成测试（共享同一个 secret）。
    pub fn generate_session_token(
        &self,
        identity_id: &str,
        email: &str,
        username: &str,
        valid_hours: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let claims = SessionClaims {
            sub: identity_id.to_string(),
            email: email.to_string(),
            username: username.to_string(),
            picture: None,
            iat: now.timestamp(),
            exp: (now + chrono::Duration::hours(valid_hours)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> JwtService {
        JwtService::new("test_secret_key_32_bytes_long!!")
    }

    #[test]
    fn test_generate_and_validate_session_token() {
        let service = create_test_service();
        let token = service
            .generate_session_token("user_2abc", "a@example.com", "alice", 1)
            .unwrap();
        let claims = service.validate_session_token(&token).unwrap();

        assert_eq!(claims.sub, "user_2abc");
        assert_eq!(claims.email, "a@example.com");
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_invalid_token_rejected() {
        let service = create_test_service();
        assert!(service.validate_session_token("invalid.token.here").is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service1 = create_test_service();
        let service2 = JwtService::new("different_secret_key_32_bytes!!");

        let token = service1
            .generate_session_token("user_2abc", "a@example.com", "alice", 1)
            .unwrap();
        assert!(service2.validate_session_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = create_test_service();

        // 过期时间在默认 leeway 之前
        let now = chrono::Utc::now();
        let claims = SessionClaims {
            sub: "user_2abc".to_string(),
            email: "a@example.com".to_string(),
            username: "alice".to_string(),
            picture: None,
            iat: (now - chrono::Duration::hours(2)).timestamp(),
            exp: (now - chrono::Duration::hours(1)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        let encoding_key =
            jsonwebtoken::EncodingKey::from_secret(b"test_secret_key_32_bytes_long!!");
        let token =
            jsonwebtoken::encode(&jsonwebtoken::Header::default(), &claims, &encoding_key).unwrap();

        assert!(service.validate_session_token(&token).is_err());
    }
}
