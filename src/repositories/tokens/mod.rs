//! 리프레시 토큰 저장소 모듈
//!
//! Redis에 사용자별 리프레시 토큰 해시를 TTL과 함께 보관합니다.
//!
//! ```rust,ignore
//! let token_repo = TokenRepository::instance();
//! token_repo.store_refresh_token("user123", "refresh_token", 86400).await?;
//! ```

pub mod token_repository;

pub use token_repository::{RefreshTokenInfo, TokenRepository};
