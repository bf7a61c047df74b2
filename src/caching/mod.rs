//! 캐싱 모듈
//!
//! Redis 기반 캐시 클라이언트를 제공합니다.
//!
//! - 사용자 프로필 캐시: `user:{id}` (TTL `USER_CACHE_TTL_SECONDS`, 기본 10분)
//! - 리프레시 토큰: `refresh_token:{user_id}`

pub mod redis;

pub use self::redis::RedisClient;
