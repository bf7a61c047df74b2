//! HTTP 요청 핸들러
//!
//! 핸들러는 요청을 추출하고 역할을 확인한 뒤 서비스에 위임합니다.
//! 비즈니스 규칙은 서비스와 엔티티에 있으며, 오류는 [`AppError`](crate::errors::AppError)로
//! 반환되어 `{"error": ...}` 본문으로 변환됩니다.

pub mod auth;
pub mod users;
pub mod jobs;
pub mod reviews;
pub mod messages;
pub mod tickets;
pub mod admin;
pub mod realtime;
