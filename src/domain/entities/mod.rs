//! # Domain Entities Module
//!
//! MongoDB 컬렉션과 1:1로 대응되는 문서 구조체들입니다.
//!
//! ```text
//! users          ← User (구직자/제공자/관리자)
//! jobs           ← Job (지원, 직접 고용, 신고 내역 포함)
//! reviews        ← Review
//! conversations  ← Conversation
//! messages       ← Message
//! tickets        ← Ticket
//! ```
//!
//! 모든 문서는 `_id`를 `Option<ObjectId>`로 가지며, 삽입 전에는 `None`입니다.
//! 상태 전이와 권한 규칙은 엔티티 메서드로 표현되어 데이터베이스 없이
//! 테스트할 수 있습니다.

pub mod common;
pub mod users;
pub mod jobs;
pub mod reviews;
pub mod messages;
pub mod tickets;
