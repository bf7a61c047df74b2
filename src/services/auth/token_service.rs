//! JWT 토큰 관리 서비스 구현
//!
//! HS256 서명의 액세스 토큰과 리프레시 토큰을 생성하고 검증합니다.
//! 두 토큰은 `kind` 클레임으로 구분되며, 서로의 자리에서 쓰일 수 없습니다.

use std::sync::Arc;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;
use crate::config::JwtConfig;
use crate::core::registry::{Service, ServiceLocator};
use crate::domain::entities::users::UserRole;
use crate::domain::models::token::{TokenClaims, TokenKind, TokenPair};
use crate::errors::{AppError, ErrorContext};

pub struct TokenService {
    secret: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new() -> Self {
        Self::with_settings(
            JwtConfig::secret(),
            Duration::hours(JwtConfig::expiration_hours()),
            Duration::days(JwtConfig::refresh_expiration_days()),
        )
    }

    pub fn with_settings(secret: String, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            secret,
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    pub fn refresh_ttl_seconds(&self) -> u64 {
        self.refresh_ttl.num_seconds().max(0) as u64
    }

    fn issue(&self, user_id: &str, role: UserRole, kind: TokenKind, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: user_id.to_string(),
            role,
            kind,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_ref());
        encode(&Header::default(), &claims, &encoding_key)
            .context("JWT 토큰 생성 실패")
    }

    pub fn generate_access_token(&self, user_id: &str, role: UserRole) -> Result<String, AppError> {
        self.issue(user_id, role, TokenKind::Access, self.access_ttl)
    }

    pub fn generate_refresh_token(&self, user_id: &str, role: UserRole) -> Result<String, AppError> {
        self.issue(user_id, role, TokenKind::Refresh, self.refresh_ttl)
    }

    pub fn generate_token_pair(&self, user_id: &str, role: UserRole) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.generate_access_token(user_id, role)?,
            refresh_token: self.generate_refresh_token(user_id, role)?,
            expires_in: self.access_ttl.num_seconds(),
        })
    }

    /// 서명과 만료를 검증하고, 기대한 용도의 토큰인지 확인합니다.
    pub fn verify_token(&self, token: &str, expected: TokenKind) -> Result<TokenClaims, AppError> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_ref());

        let claims = decode::<TokenClaims>(token, &decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("Token has expired".to_string())
                }
                _ => AppError::AuthenticationError("Invalid token".to_string()),
            })?;

        if claims.kind != expected {
            return Err(AppError::AuthenticationError("Invalid token type".to_string()));
        }

        Ok(claims)
    }

    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::AuthenticationError("Invalid authorization header".to_string()))
    }
}

impl Service for TokenService {
    fn name(&self) -> &str {
        "TokenService"
    }
}

/// 테스트용 TokenService를 레지스트리에 등록합니다. 모든 테스트가 같은 비밀키를 공유합니다.
#[cfg(test)]
pub(crate) fn register_test_token_service() -> Arc<TokenService> {
    let service = Arc::new(TokenService::with_settings(
        "integration-test-secret".to_string(),
        Duration::minutes(5),
        Duration::days(1),
    ));
    ServiceLocator::set(service.clone());
    service
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::with_settings("test-secret".to_string(), Duration::hours(1), Duration::days(7))
    }

    #[test]
    fn test_access_token_roundtrip() {
        let service = service();
        let token = service.generate_access_token("user-1", UserRole::Provider).unwrap();

        let claims = service.verify_token(&token, TokenKind::Access).unwrap();

        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.role, UserRole::Provider);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_refresh_token_cannot_be_used_as_access_token() {
        let service = service();
        let pair = service.generate_token_pair("user-1", UserRole::Seeker).unwrap();

        assert!(service.verify_token(&pair.refresh_token, TokenKind::Access).is_err());
        assert!(service.verify_token(&pair.refresh_token, TokenKind::Refresh).is_ok());
        assert_eq!(pair.expires_in, 3600);
    }

    #[test]
    fn test_refresh_tokens_are_unique() {
        let service = service();

        let a = service.generate_refresh_token("user-1", UserRole::Seeker).unwrap();
        let b = service.generate_refresh_token("user-1", UserRole::Seeker).unwrap();

        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().generate_access_token("user-1", UserRole::Admin).unwrap();
        let other = TokenService::with_settings("other".to_string(), Duration::hours(1), Duration::days(1));

        assert!(matches!(
            other.verify_token(&token, TokenKind::Access),
            Err(AppError::AuthenticationError(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = TokenService::with_settings(
            "test-secret".to_string(),
            Duration::hours(-2),
            Duration::days(1),
        );
        let token = service.generate_access_token("user-1", UserRole::Seeker).unwrap();

        match service.verify_token(&token, TokenKind::Access) {
            Err(AppError::AuthenticationError(msg)) => assert!(msg.contains("expired")),
            other => panic!("expected expiry error, got {:?}", other.map(|c| c.sub)),
        }
    }

    #[test]
    fn test_extract_bearer_token() {
        let service = service();

        assert_eq!(service.extract_bearer_token("Bearer abc").unwrap(), "abc");
        assert!(service.extract_bearer_token("Basic abc").is_err());
        assert!(service.extract_bearer_token("Bearer ").is_err());
    }
}
