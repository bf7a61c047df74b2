//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 각 서비스는 시작 시 [`ServiceLocator`](crate::core::registry::ServiceLocator)에
//! 등록되며, 핸들러는 `instance()`로 꺼내 씁니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::jobs::JobService;
//!
//! let job = JobService::instance().get(&job_id).await?;
//! ```

pub mod users;
pub mod auth;
pub mod jobs;
pub mod reviews;
pub mod messages;
pub mod tickets;
pub mod admin;
pub mod realtime;
