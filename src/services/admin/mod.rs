//! 관리자 기능 서비스

pub mod admin_service;

pub use admin_service::AdminService;
