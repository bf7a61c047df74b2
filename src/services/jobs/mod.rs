//! 작업 등록/지원/고용/완료 흐름 서비스

pub mod job_service;

pub use job_service::JobService;
