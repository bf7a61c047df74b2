//! 작업 응답 DTO
use serde::Serialize;
use crate::domain::dto::common::{format_datetime, format_optional_datetime, hex_id};
use crate::domain::entities::common::Coordinates;
use crate::domain::entities::jobs::{
    ApplicationStatus, DirectHire, DirectHireStatus, Job, JobApplication, JobReport, JobStatus,
};

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationResponse {
    pub provider_id: String,
    pub provider_name: String,
    pub provider_rating: f64,
    pub message: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: String,
}

impl From<JobApplication> for ApplicationResponse {
    fn from(application: JobApplication) -> Self {
        Self {
            provider_id: application.provider.to_hex(),
            provider_name: application.provider_name,
            provider_rating: application.provider_rating,
            message: application.message,
            status: application.status,
            applied_at: format_datetime(&application.applied_at),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DirectHireResponse {
    pub provider_id: String,
    pub status: DirectHireStatus,
    pub requested_at: String,
    pub responded_at: Option<String>,
}

impl From<DirectHire> for DirectHireResponse {
    fn from(hire: DirectHire) -> Self {
        Self {
            provider_id: hire.provider.to_hex(),
            status: hire.status,
            requested_at: format_datetime(&hire.requested_at),
            responded_at: format_optional_datetime(&hire.responded_at),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportResponse {
    pub reporter_id: String,
    pub reason: String,
    pub created_at: String,
}

impl From<JobReport> for ReportResponse {
    fn from(report: JobReport) -> Self {
        Self {
            reporter_id: report.reporter.to_hex(),
            reason: report.reason,
            created_at: format_datetime(&report.created_at),
        }
    }
}

/// 작업 상세 응답. 신고 내용은 건수만 노출합니다.
#[derive(Debug, Clone, Serialize)]
pub struct JobResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub budget: f64,
    pub location: Option<Coordinates>,
    pub address: Option<String>,
    pub seeker_id: String,
    pub status: JobStatus,
    pub applications: Vec<ApplicationResponse>,
    pub selected_provider_id: Option<String>,
    pub direct_hire: Option<DirectHireResponse>,
    pub completion_notes: Option<String>,
    pub completed_at: Option<String>,
    pub report_count: usize,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            id: hex_id(&job.id),
            location: job.location.as_ref().map(Coordinates::from),
            seeker_id: job.seeker.to_hex(),
            selected_provider_id: job.selected_provider.map(|id| id.to_hex()),
            completed_at: format_optional_datetime(&job.completed_at),
            report_count: job.pending_report_count(),
            created_at: format_datetime(&job.created_at),
            updated_at: format_datetime(&job.updated_at),
            applications: job.applications.into_iter().map(ApplicationResponse::from).collect(),
            direct_hire: job.direct_hire.map(DirectHireResponse::from),
            title: job.title,
            description: job.description,
            category: job.category,
            budget: job.budget,
            address: job.address,
            status: job.status,
            completion_notes: job.completion_notes,
        }
    }
}

/// 관리자용 신고 작업 응답
#[derive(Debug, Clone, Serialize)]
pub struct ReportedJobResponse {
    #[serde(flatten)]
    pub job: JobResponse,
    pub reports: Vec<ReportResponse>,
}

impl From<Job> for ReportedJobResponse {
    fn from(mut job: Job) -> Self {
        let reports = std::mem::take(&mut job.reports);
        let report_count = reports.len();
        let mut response = JobResponse::from(job);
        response.report_count = report_count;

        Self {
            job: response,
            reports: reports.into_iter().map(ReportResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{oid::ObjectId, DateTime};

    #[test]
    fn test_job_response_shape() {
        let mut job = Job::new(
            ObjectId::new(),
            "Mow lawn".to_string(),
            "Front and back".to_string(),
            "gardening".to_string(),
            80.0,
            None,
            None,
        );
        job.id = Some(ObjectId::new());
        job.add_report(ObjectId::new(), "spam".to_string(), DateTime::now()).unwrap();

        let json = serde_json::to_value(JobResponse::from(job.clone())).unwrap();
        assert_eq!(json["status"], "open");
        assert_eq!(json["report_count"], 1);
        assert!(json.get("reports").is_none());

        let json = serde_json::to_value(ReportedJobResponse::from(job)).unwrap();
        assert_eq!(json["report_count"], 1);
        assert_eq!(json["reports"][0]["reason"], "spam");
    }
}
