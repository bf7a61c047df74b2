//! 에러 처리 모듈
//!
//! [`errors::AppError`]가 애플리케이션 전역 에러 타입입니다.

pub mod errors;

pub use errors::{AppError, AppResult, ErrorContext};
