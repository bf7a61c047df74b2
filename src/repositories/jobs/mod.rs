pub mod job_repo;

pub use job_repo::{JobListFilter, JobRepository};
