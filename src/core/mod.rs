//! # Core Framework Module
//!
//! 백엔드 서비스 전역에서 쓰이는 의존성 주입 컨테이너를 제공합니다.
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceLocator**: 타입 기반 싱글톤 저장소
//! - **Service / Repository**: 컴포넌트 공통 인터페이스와 초기화 훅
//!
//! ```rust,ignore
//! use crate::services::jobs::JobService;
//!
//! // 서버 기동 시 한 번
//! ServiceLocator::initialize_all().await?;
//!
//! // 이후 어디서든
//! let job_service = JobService::instance();
//! ```

pub mod registry;

pub use registry::{Repository, Service, ServiceLocator};
