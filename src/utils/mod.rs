//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증/정리, ObjectId 파싱
//! - [`display_terminal`] - 레지스트리 초기화 로그 포맷팅
//! - [`geo`] - 좌표 검증과 거리 계산

pub mod string_utils;
pub mod display_terminal;
pub mod geo;
