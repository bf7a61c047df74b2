//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 모든 설정은 환경 변수에서 읽으며, 실행 시 `PROFILE`에 따라
//! `.env.dev` / `.env.prod` 파일이 먼저 로드됩니다 (`main.rs` 참고).
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 환경, 서버, MongoDB, Redis, CORS, Rate Limiting 설정
//! - [`auth_config`] - JWT, 비밀번호 해싱 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export ENVIRONMENT="production"      # development, test, staging, production
//!
//! # 저장소
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="marketplace"
//! export REDIS_URL="redis://localhost:6379"
//!
//! # 인증
//! export JWT_SECRET="your-super-secret-key"
//! export JWT_EXPIRATION_HOURS="24"
//! export JWT_REFRESH_EXPIRATION_DAYS="7"
//! export BCRYPT_COST="12"               # 4-15 범위
//!
//! # 프론트엔드
//! export CORS_ALLOWED_ORIGINS="http://localhost:3000,https://app.example.com"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
