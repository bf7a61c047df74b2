//! 서비스 마켓플레이스 백엔드
//!
//! 구직자(seeker)가 작업을 등록하고 제공자(provider)가 지원하거나 직접 고용되는
//! 마켓플레이스의 REST + WebSocket 서버입니다.
//!
//! # Features
//!
//! - **작업 라이프사이클**: 등록, 지원, 선정, 직접 고용, 완료, 취소, 신고
//! - **채팅**: 1:1 대화와 읽음 처리, WebSocket 실시간 전달
//! - **리뷰**: 작성/수정/삭제와 평점 재계산
//! - **관리자**: 통계, 정지/차단, 신고 처리, 문의 응답
//! - **JWT 인증**: 액세스/리프레시 토큰, 역할 기반 접근 제어
//!
//! # Architecture
//!
//! ```text
//! routes -> handlers -> services -> repositories -> MongoDB / Redis
//!                          │
//!                          └── EventHub -> /ws 세션
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
