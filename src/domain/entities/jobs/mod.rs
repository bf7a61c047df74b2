//! 작업(Job) 엔티티 모듈

pub mod job;

pub use job::{
    ApplicationStatus, DirectHire, DirectHireStatus, Job, JobApplication, JobChanges, JobReport,
    JobStatus, ProviderSnapshot,
};
