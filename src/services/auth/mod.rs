//! 인증 서비스 모듈
//!
//! - [`TokenService`]: HS256 액세스/리프레시 토큰 발급과 검증
//! - [`AuthService`]: 가입, 로그인, 토큰 갱신, 로그아웃
//! - [`AccountGuard`]: 요청마다 계정 차단/정지 상태 확인
//!
//! ```rust,ignore
//! use crate::services::auth::{AuthService, TokenService};
//!
//! let tokens = TokenService::instance().generate_token_pair(&user_id, role)?;
//! let response = AuthService::instance().login(request).await?;
//! ```

pub mod token_service;
pub mod auth_service;
pub mod account_guard;

pub use token_service::TokenService;
pub use auth_service::AuthService;
pub use account_guard::AccountGuard;
