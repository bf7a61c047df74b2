//! # 사용자 관련 요청 DTO 모듈
//!
//! 클라이언트 JSON을 구조화된 타입으로 역직렬화하고 `validator`로 검증합니다.

pub mod auth_request;
pub mod profile_request;

pub use auth_request::{LoginRequest, RefreshTokenRequest, RegisterRequest};
pub use profile_request::{
    ChangePasswordRequest, ProviderSearchQuery, UpdateProfileRequest, UpdateSettingsRequest,
};
