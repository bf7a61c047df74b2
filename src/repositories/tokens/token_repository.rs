use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use crate::caching::redis::RedisClient;
use crate::core::registry::{Repository, ServiceLocator};
use crate::errors::AppError;

/// 최소 보관 시간 (초)
const MIN_TTL_SECONDS: u64 = 60;

/// 사용자별 리프레시 토큰 정보. 토큰 원문 대신 SHA-256 해시만 보관합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenInfo {
    pub user_id: String,
    pub token_hash: String,
    pub login_at: i64,
    pub expires_at: i64,
}

pub struct TokenRepository {
    redis: Arc<RedisClient>,
}

impl TokenRepository {
    pub fn new() -> Self {
        Self {
            redis: ServiceLocator::get::<RedisClient>(),
        }
    }

    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    fn key(user_id: &str) -> String {
        format!("refresh_token:{}", user_id)
    }

    pub fn hash_token(token: &str) -> String {
        format!("{:x}", Sha256::digest(token.as_bytes()))
    }

    /// 사용자당 하나의 리프레시 토큰만 유지합니다. 새로 저장하면 이전 토큰은 무효가 됩니다.
    pub async fn store_refresh_token(
        &self,
        user_id: &str,
        refresh_token: &str,
        ttl_seconds: u64,
    ) -> Result<(), AppError> {
        let safe_ttl = if ttl_seconds < MIN_TTL_SECONDS {
            log::warn!("TTL이 너무 작습니다 ({}초). 최소값 {}초로 설정합니다.", ttl_seconds, MIN_TTL_SECONDS);
            MIN_TTL_SECONDS
        } else {
            ttl_seconds
        };

        let now = Utc::now().timestamp();
        let info = RefreshTokenInfo {
            user_id: user_id.to_string(),
            token_hash: Self::hash_token(refresh_token),
            login_at: now,
            expires_at: now + safe_ttl as i64,
        };

        self.redis.set_with_expiry(&Self::key(user_id), &info, safe_ttl).await?;

        log::debug!("Refresh token 저장 완료 - user_id: {}, ttl: {}초", user_id, safe_ttl);
        Ok(())
    }

    /// 저장된 토큰과 일치하고 만료되지 않았는지 확인합니다.
    pub async fn verify_refresh_token(&self, user_id: &str, refresh_token: &str) -> Result<bool, AppError> {
        let Some(info) = self.redis.get::<RefreshTokenInfo>(&Self::key(user_id)).await? else {
            return Ok(false);
        };

        Ok(info.token_hash == Self::hash_token(refresh_token) && info.expires_at > Utc::now().timestamp())
    }

    pub async fn delete_refresh_token(&self, user_id: &str) -> Result<(), AppError> {
        self.redis.del(&Self::key(user_id)).await?;
        Ok(())
    }
}

#[async_trait]
impl Repository for TokenRepository {
    fn name(&self) -> &str {
        "TokenRepository"
    }

    fn collection_name(&self) -> &str {
        "refresh_token:*"
    }

    async fn init(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_stable_hex() {
        let hash = TokenRepository::hash_token("abc");

        assert_eq!(hash.len(), 64);
        assert_eq!(hash, TokenRepository::hash_token("abc"));
        assert_ne!(hash, TokenRepository::hash_token("abd"));
        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
