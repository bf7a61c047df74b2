//! # 사용자/인증 DTO 모듈
//!
//! ```text
//! users/
//! ├── request/   ← 가입, 로그인, 프로필/설정 변경, 제공자 검색
//! └── response/  ← 본인용 전체 정보, 공개 프로필, 인증 응답
//! ```

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
