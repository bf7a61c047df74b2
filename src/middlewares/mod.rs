//! 미들웨어 모듈
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - Bearer 액세스 토큰 추출 및 검증
//! - 사용자 정보를 request extension에 저장
//! - 선택적/강제 인증 모드와 역할 조건 지원
//!
//! ## 특정 스코프에만 적용
//! ```rust,ignore
//! use actix_web::web;
//! use crate::domain::entities::users::UserRole;
//!
//! web::scope("/api/admin")
//!     .wrap(AuthMiddleware::required_with_role(UserRole::Admin))
//!     .service(admin_stats)
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
