//! # Domain Layer
//!
//! ```text
//! domain/
//! ├── entities/  ← MongoDB 문서와 상태 전이 규칙
//! ├── models/    ← 인증 정보, 토큰, 실시간 이벤트
//! └── dto/       ← HTTP 요청/응답
//! ```
//!
//! 엔티티는 웹 프레임워크에 의존하지 않으며, DTO는 엔티티에서 변환됩니다.

pub mod entities;
pub mod dto;
pub mod models;
