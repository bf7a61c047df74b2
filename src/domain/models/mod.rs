//! # Domain Models
//!
//! 저장소에 기록되지 않는 도메인 값들입니다.
//!
//! - `auth`: 요청에 부착되는 인증 사용자와 라우트 권한 요구사항
//! - `token`: JWT 클레임과 토큰 쌍
//! - `events`: 실시간 채널로 오가는 이벤트 프레임

pub mod auth;
pub mod token;
pub mod events;
