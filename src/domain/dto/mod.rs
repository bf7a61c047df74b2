//! # Data Transfer Objects
//!
//! HTTP 경계에서 주고받는 요청/응답 구조체입니다.
//!
//! - 요청 DTO는 `serde`로 역직렬화한 뒤 `validator`로 검증합니다.
//! - 응답 DTO는 엔티티에서 `From`으로 변환하며, `ObjectId`는 hex 문자열,
//!   날짜는 RFC 3339 문자열로 내보냅니다.
//!
//! ```text
//! dto/
//! ├── common     ← 날짜/ID 변환, 페이지 파라미터
//! ├── users/     ← 인증, 프로필, 설정
//! ├── jobs/
//! ├── reviews/
//! ├── messages/
//! ├── tickets/
//! └── admin/
//! ```

pub mod common;
pub mod users;
pub mod jobs;
pub mod reviews;
pub mod messages;
pub mod tickets;
pub mod admin;
