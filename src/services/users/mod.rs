//! 사용자 프로필/설정 서비스

pub mod user_service;

pub use user_service::UserService;
