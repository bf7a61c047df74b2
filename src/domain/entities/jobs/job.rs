//! Job Entity Implementation
//!
//! 구직자가 올린 작업 문서와 그 생명주기 전이 규칙입니다.
//!
//! ## 상태 전이
//!
//! ```text
//!            apply / reject-application (상태 유지)
//!              ┌───┐
//!              ▼   │
//!   ┌────────────────┐ select-provider    ┌─────────────┐  complete  ┌───────────┐
//!   │      open      ├───────────────────▶│ in-progress ├───────────▶│ completed │
//!   └──────┬─────────┘ accept-hire        └─────────────┘            └───────────┘
//!          │ cancel / decline-hire
//!          ▼
//!   ┌────────────────┐
//!   │   cancelled    │
//!   └────────────────┘
//! ```
//!
//! 전이 메서드는 문서만 변경하는 순수 함수입니다. 서비스는 문서를 읽고,
//! 전이를 적용한 뒤 통째로 저장합니다 (마지막 쓰기 우선).
//! 규칙 위반은 400, 행위자 불일치는 403으로 응답합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::entities::common::GeoPoint;
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    Open,
    InProgress,
    Completed,
    Cancelled,
}

impl JobStatus {
    pub fn from_str(s: &str) -> Result<Self, AppError> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(JobStatus::Open),
            "in-progress" | "in_progress" => Ok(JobStatus::InProgress),
            "completed" => Ok(JobStatus::Completed),
            "cancelled" => Ok(JobStatus::Cancelled),
            _ => Err(AppError::ValidationError(format!("Unknown job status: {}", s))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Open => "open",
            JobStatus::InProgress => "in-progress",
            JobStatus::Completed => "completed",
            JobStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectHireStatus {
    Pending,
    Accepted,
    Declined,
}

/// 제공자의 지원 내역. 이름과 평점은 지원 시점의 스냅샷입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobApplication {
    pub provider: ObjectId,
    pub provider_name: String,
    pub provider_rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: DateTime,
}

/// 직접 고용 제안
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectHire {
    pub provider: ObjectId,
    pub status: DirectHireStatus,
    pub requested_at: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<DateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobReport {
    pub reporter: ObjectId,
    pub reason: String,
    pub created_at: DateTime,
}

/// 지원자/직접 고용 대상의 표시용 정보
#[derive(Debug, Clone)]
pub struct ProviderSnapshot {
    pub id: ObjectId,
    pub name: String,
    pub rating: f64,
}

/// 작성자가 수정할 수 있는 필드. `None`은 기존 값 유지
#[derive(Debug, Clone, Default)]
pub struct JobChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub budget: Option<f64>,
    pub location: Option<GeoPoint>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub description: String,
    pub category: String,
    pub budget: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub seeker: ObjectId,
    pub status: JobStatus,
    #[serde(default)]
    pub applications: Vec<JobApplication>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_provider: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_hire: Option<DirectHire>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime>,
    #[serde(default)]
    pub reports: Vec<JobReport>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

fn invalid(msg: &str) -> AppError {
    AppError::ValidationError(msg.to_string())
}

fn forbidden(msg: &str) -> AppError {
    AppError::AuthorizationError(msg.to_string())
}

impl Job {
    pub fn new(
        seeker: ObjectId,
        title: String,
        description: String,
        category: String,
        budget: f64,
        location: Option<GeoPoint>,
        address: Option<String>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            title,
            description,
            category,
            budget,
            location,
            address,
            seeker,
            status: JobStatus::Open,
            applications: Vec::new(),
            selected_provider: None,
            direct_hire: None,
            completion_notes: None,
            completed_at: None,
            reports: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// 특정 제공자에게 직접 고용을 제안하는 작업
    pub fn with_direct_hire(mut self, provider: ObjectId) -> Self {
        self.direct_hire = Some(DirectHire {
            provider,
            status: DirectHireStatus::Pending,
            requested_at: self.created_at,
            responded_at: None,
        });
        self
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn is_owner(&self, user_id: &ObjectId) -> bool {
        &self.seeker == user_id
    }

    pub fn ensure_owner(&self, user_id: &ObjectId) -> Result<(), AppError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(forbidden("Only the job owner can perform this action"))
        }
    }

    pub fn find_application(&self, provider: &ObjectId) -> Option<&JobApplication> {
        self.applications.iter().find(|a| &a.provider == provider)
    }

    pub fn has_applied(&self, provider: &ObjectId) -> bool {
        self.find_application(provider).is_some()
    }

    fn pending_direct_hire(&self) -> Option<&DirectHire> {
        self.direct_hire
            .as_ref()
            .filter(|hire| hire.status == DirectHireStatus::Pending)
    }

    /// 작성자, 지원자, 선정된 제공자, 직접 고용 대상 중 하나인지
    pub fn involves(&self, user_id: &ObjectId) -> bool {
        self.is_owner(user_id)
            || self.selected_provider.as_ref() == Some(user_id)
            || self.has_applied(user_id)
            || self.direct_hire.as_ref().map(|h| &h.provider) == Some(user_id)
    }

    pub fn pending_report_count(&self) -> usize {
        self.reports.len()
    }

    fn touch(&mut self, now: DateTime) {
        self.updated_at = now;
    }

    /// 제공자가 작업에 지원합니다.
    pub fn apply(
        &mut self,
        provider: ProviderSnapshot,
        message: Option<String>,
        now: DateTime,
    ) -> Result<(), AppError> {
        if self.is_owner(&provider.id) {
            return Err(invalid("You cannot apply to your own job"));
        }
        if self.status != JobStatus::Open {
            return Err(invalid("This job is no longer accepting applications"));
        }
        if let Some(hire) = self.pending_direct_hire() {
            if hire.provider != provider.id {
                return Err(invalid("This job is reserved for a direct hire request"));
            }
        }
        if self.has_applied(&provider.id) {
            return Err(invalid("You have already applied to this job"));
        }

        self.applications.push(JobApplication {
            provider: provider.id,
            provider_name: provider.name,
            provider_rating: provider.rating,
            message,
            status: ApplicationStatus::Pending,
            applied_at: now,
        });
        self.touch(now);
        Ok(())
    }

    /// 작성자가 지원자 중 한 명을 선정합니다. 다른 지원의 상태는 건드리지 않습니다.
    pub fn select_provider(
        &mut self,
        owner: &ObjectId,
        provider: &ObjectId,
        now: DateTime,
    ) -> Result<(), AppError> {
        self.ensure_owner(owner)?;
        if self.status != JobStatus::Open {
            return Err(invalid("A provider can only be selected while the job is open"));
        }

        let application = self
            .applications
            .iter_mut()
            .find(|a| &a.provider == provider)
            .ok_or_else(|| invalid("This provider has not applied to the job"))?;

        if application.status == ApplicationStatus::Rejected {
            return Err(invalid("This application was already rejected"));
        }

        application.status = ApplicationStatus::Accepted;
        self.selected_provider = Some(*provider);
        self.status = JobStatus::InProgress;
        self.touch(now);
        Ok(())
    }

    fn ensure_direct_hire_target(&self, provider: &ObjectId) -> Result<(), AppError> {
        let hire = self
            .direct_hire
            .as_ref()
            .ok_or_else(|| invalid("This job has no direct hire request"))?;

        if &hire.provider != provider {
            return Err(forbidden("This hire request was sent to another provider"));
        }
        if hire.status != DirectHireStatus::Pending {
            return Err(invalid("This hire request has already been answered"));
        }
        if self.status != JobStatus::Open {
            return Err(invalid("This job is no longer open"));
        }
        Ok(())
    }

    /// 직접 고용 대상 제공자가 제안을 수락합니다.
    pub fn accept_hire_request(
        &mut self,
        provider: ProviderSnapshot,
        now: DateTime,
    ) -> Result<(), AppError> {
        self.ensure_direct_hire_target(&provider.id)?;

        match self.applications.iter_mut().find(|a| a.provider == provider.id) {
            Some(application) => application.status = ApplicationStatus::Accepted,
            None => self.applications.push(JobApplication {
                provider: provider.id,
                provider_name: provider.name,
                provider_rating: provider.rating,
                message: None,
                status: ApplicationStatus::Accepted,
                applied_at: now,
            }),
        }

        if let Some(hire) = self.direct_hire.as_mut() {
            hire.status = DirectHireStatus::Accepted;
            hire.responded_at = Some(now);
        }
        self.selected_provider = Some(provider.id);
        self.status = JobStatus::InProgress;
        self.touch(now);
        Ok(())
    }

    /// 직접 고용 대상 제공자가 제안을 거절합니다. 작업은 취소됩니다.
    pub fn decline_hire_request(&mut self, provider: &ObjectId, now: DateTime) -> Result<(), AppError> {
        self.ensure_direct_hire_target(provider)?;

        if let Some(hire) = self.direct_hire.as_mut() {
            hire.status = DirectHireStatus::Declined;
            hire.responded_at = Some(now);
        }
        self.status = JobStatus::Cancelled;
        self.touch(now);
        Ok(())
    }

    /// 지원을 거절합니다. 작업 상태는 바뀌지 않습니다.
    pub fn reject_application(
        &mut self,
        owner: &ObjectId,
        provider: &ObjectId,
        now: DateTime,
    ) -> Result<(), AppError> {
        self.ensure_owner(owner)?;

        let application = self
            .applications
            .iter_mut()
            .find(|a| &a.provider == provider)
            .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

        if application.status == ApplicationStatus::Accepted {
            return Err(invalid("The selected provider's application cannot be rejected"));
        }

        application.status = ApplicationStatus::Rejected;
        self.touch(now);
        Ok(())
    }

    /// 작성자 또는 선정된 제공자가 작업을 완료 처리합니다.
    pub fn complete(
        &mut self,
        actor: &ObjectId,
        notes: Option<String>,
        now: DateTime,
    ) -> Result<(), AppError> {
        let is_selected = self.selected_provider.as_ref() == Some(actor);
        if !self.is_owner(actor) && !is_selected {
            return Err(forbidden("Only the job owner or the selected provider can complete this job"));
        }
        if self.status != JobStatus::InProgress {
            return Err(invalid("Only jobs in progress can be completed"));
        }

        self.status = JobStatus::Completed;
        self.completed_at = Some(now);
        if notes.is_some() {
            self.completion_notes = notes;
        }
        self.touch(now);
        Ok(())
    }

    pub fn cancel(&mut self, owner: &ObjectId, now: DateTime) -> Result<(), AppError> {
        self.ensure_owner(owner)?;
        if self.status != JobStatus::Open {
            return Err(invalid("Only open jobs can be cancelled"));
        }

        self.status = JobStatus::Cancelled;
        if let Some(hire) = self.direct_hire.as_mut() {
            if hire.status == DirectHireStatus::Pending {
                hire.status = DirectHireStatus::Declined;
                hire.responded_at = Some(now);
            }
        }
        self.touch(now);
        Ok(())
    }

    pub fn update_details(
        &mut self,
        owner: &ObjectId,
        changes: JobChanges,
        now: DateTime,
    ) -> Result<(), AppError> {
        self.ensure_owner(owner)?;
        if self.status != JobStatus::Open {
            return Err(invalid("Only open jobs can be edited"));
        }
        if let Some(budget) = changes.budget {
            if !(budget > 0.0) {
                return Err(invalid("Budget must be greater than zero"));
            }
            self.budget = budget;
        }
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(location) = changes.location {
            self.location = Some(location);
        }
        if let Some(address) = changes.address {
            self.address = Some(address);
        }
        self.touch(now);
        Ok(())
    }

    /// 신고를 추가합니다. 같은 사용자의 중복 신고와 자기 작업 신고는 거부합니다.
    pub fn add_report(&mut self, reporter: ObjectId, reason: String, now: DateTime) -> Result<(), AppError> {
        if self.is_owner(&reporter) {
            return Err(invalid("You cannot report your own job"));
        }
        if self.reports.iter().any(|r| r.reporter == reporter) {
            return Err(invalid("You have already reported this job"));
        }

        self.reports.push(JobReport {
            reporter,
            reason,
            created_at: now,
        });
        self.touch(now);
        Ok(())
    }

    pub fn ensure_can_delete(&self, actor: &ObjectId, is_admin: bool) -> Result<(), AppError> {
        if is_admin || self.is_owner(actor) {
            Ok(())
        } else {
            Err(forbidden("Only the job owner or an admin can delete this job"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn job(owner: ObjectId) -> Job {
        Job::new(
            owner,
            "Fix kitchen sink".to_string(),
            "Leaking under the counter".to_string(),
            "plumbing".to_string(),
            120.0,
            None,
            None,
        )
    }

    fn provider(name: &str) -> ProviderSnapshot {
        ProviderSnapshot {
            id: ObjectId::new(),
            name: name.to_string(),
            rating: 4.5,
        }
    }

    #[test]
    fn test_new_job_is_open() {
        let job = job(ObjectId::new());

        assert_eq!(job.status, JobStatus::Open);
        assert!(job.applications.is_empty());
        assert!(job.selected_provider.is_none());
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&JobStatus::InProgress).unwrap(), "\"in-progress\"");
        assert_eq!(JobStatus::from_str("in-progress").unwrap(), JobStatus::InProgress);
        assert!(JobStatus::from_str("archived").is_err());
    }

    #[test]
    fn test_apply_records_snapshot() {
        let mut job = job(ObjectId::new());
        let p = provider("Lee");
        let pid = p.id;

        job.apply(p, Some("Available tomorrow".to_string()), DateTime::now()).unwrap();

        let application = job.find_application(&pid).unwrap();
        assert_eq!(application.provider_name, "Lee");
        assert_eq!(application.provider_rating, 4.5);
        assert_eq!(application.status, ApplicationStatus::Pending);
    }

    #[test]
    fn test_apply_twice_is_rejected() {
        let mut job = job(ObjectId::new());
        let p = provider("Lee");

        job.apply(p.clone(), None, DateTime::now()).unwrap();
        let second = job.apply(p, None, DateTime::now());

        assert!(matches!(second, Err(AppError::ValidationError(_))));
        assert_eq!(job.applications.len(), 1);
    }

    #[rstest]
    #[case(JobStatus::InProgress)]
    #[case(JobStatus::Completed)]
    #[case(JobStatus::Cancelled)]
    fn test_apply_requires_open(#[case] status: JobStatus) {
        let mut job = job(ObjectId::new());
        job.status = status;

        assert!(matches!(
            job.apply(provider("Lee"), None, DateTime::now()),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_select_provider_moves_to_in_progress() {
        let owner = ObjectId::new();
        let mut job = job(owner);
        let a = provider("A");
        let b = provider("B");
        let (aid, bid) = (a.id, b.id);
        job.apply(a, None, DateTime::now()).unwrap();
        job.apply(b, None, DateTime::now()).unwrap();

        job.select_provider(&owner, &aid, DateTime::now()).unwrap();

        assert_eq!(job.status, JobStatus::InProgress);
        assert_eq!(job.selected_provider, Some(aid));
        assert_eq!(job.find_application(&aid).unwrap().status, ApplicationStatus::Accepted);
        assert_eq!(job.find_application(&bid).unwrap().status, ApplicationStatus::Pending);
    }

    #[test]
    fn test_select_provider_who_never_applied_is_rejected() {
        let owner = ObjectId::new();
        let mut job = job(owner);

        let result = job.select_provider(&owner, &ObjectId::new(), DateTime::now());

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(job.status, JobStatus::Open);
    }

    #[test]
    fn test_select_provider_by_non_owner_is_forbidden() {
        let mut job = job(ObjectId::new());
        let p = provider("A");
        let pid = p.id;
        job.apply(p, None, DateTime::now()).unwrap();

        let result = job.select_provider(&ObjectId::new(), &pid, DateTime::now());

        assert!(matches!(result, Err(AppError::AuthorizationError(_))));
    }

    #[test]
    fn test_reject_application_keeps_status() {
        let owner = ObjectId::new();
        let mut job = job(owner);
        let p = provider("A");
        let pid = p.id;
        job.apply(p, None, DateTime::now()).unwrap();

        job.reject_application(&owner, &pid, DateTime::now()).unwrap();

        assert_eq!(job.status, JobStatus::Open);
        assert_eq!(job.find_application(&pid).unwrap().status, ApplicationStatus::Rejected);
        assert!(job.select_provider(&owner, &pid, DateTime::now()).is_err());
    }

    #[test]
    fn test_reject_missing_application_is_not_found() {
        let owner = ObjectId::new();
        let mut job = job(owner);

        assert!(matches!(
            job.reject_application(&owner, &ObjectId::new(), DateTime::now()),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_complete_by_selected_provider() {
        let owner = ObjectId::new();
        let mut job = job(owner);
        let p = provider("A");
        let pid = p.id;
        job.apply(p, None, DateTime::now()).unwrap();
        job.select_provider(&owner, &pid, DateTime::now()).unwrap();

        job.complete(&pid, Some("Replaced the trap".to_string()), DateTime::now()).unwrap();

        assert_eq!(job.status, JobStatus::Completed);
        assert!(job.completed_at.is_some());
        assert_eq!(job.completion_notes.as_deref(), Some("Replaced the trap"));
    }

    #[test]
    fn test_complete_from_open_is_rejected() {
        let owner = ObjectId::new();
        let mut job = job(owner);

        assert!(matches!(
            job.complete(&owner, None, DateTime::now()),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_complete_by_stranger_is_forbidden() {
        let owner = ObjectId::new();
        let mut job = job(owner);
        let p = provider("A");
        let pid = p.id;
        job.apply(p, None, DateTime::now()).unwrap();
        job.select_provider(&owner, &pid, DateTime::now()).unwrap();

        assert!(matches!(
            job.complete(&ObjectId::new(), None, DateTime::now()),
            Err(AppError::AuthorizationError(_))
        ));
    }

    #[test]
    fn test_direct_hire_blocks_other_applicants() {
        let target = provider("Target");
        let mut job = job(ObjectId::new()).with_direct_hire(target.id);

        assert!(job.apply(provider("Other"), None, DateTime::now()).is_err());
        assert!(job.apply(target, None, DateTime::now()).is_ok());
    }

    #[test]
    fn test_accept_hire_request() {
        let target = provider("Target");
        let tid = target.id;
        let mut job = job(ObjectId::new()).with_direct_hire(tid);

        job.accept_hire_request(target, DateTime::now()).unwrap();

        assert_eq!(job.status, JobStatus::InProgress);
        assert_eq!(job.selected_provider, Some(tid));
        assert_eq!(job.direct_hire.as_ref().unwrap().status, DirectHireStatus::Accepted);
        assert_eq!(job.find_application(&tid).unwrap().status, ApplicationStatus::Accepted);
        assert_eq!(job.applications.len(), 1);
    }

    #[test]
    fn test_accept_hire_request_by_other_provider_is_forbidden() {
        let mut job = job(ObjectId::new()).with_direct_hire(ObjectId::new());

        assert!(matches!(
            job.accept_hire_request(provider("Other"), DateTime::now()),
            Err(AppError::AuthorizationError(_))
        ));
    }

    #[test]
    fn test_accept_hire_request_twice_is_rejected() {
        let target = provider("Target");
        let mut job = job(ObjectId::new()).with_direct_hire(target.id);
        job.accept_hire_request(target.clone(), DateTime::now()).unwrap();

        assert!(matches!(
            job.accept_hire_request(target, DateTime::now()),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_accept_on_regular_job_is_rejected() {
        let mut job = job(ObjectId::new());

        assert!(matches!(
            job.accept_hire_request(provider("A"), DateTime::now()),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_decline_hire_request_cancels_job() {
        let target = provider("Target");
        let mut job = job(ObjectId::new()).with_direct_hire(target.id);

        job.decline_hire_request(&target.id, DateTime::now()).unwrap();

        assert_eq!(job.status, JobStatus::Cancelled);
        assert_eq!(job.direct_hire.as_ref().unwrap().status, DirectHireStatus::Declined);
    }

    #[test]
    fn test_cancel_only_from_open() {
        let owner = ObjectId::new();
        let mut job = job(owner);
        let p = provider("A");
        let pid = p.id;
        job.apply(p, None, DateTime::now()).unwrap();
        job.select_provider(&owner, &pid, DateTime::now()).unwrap();

        assert!(job.cancel(&owner, DateTime::now()).is_err());
    }

    #[test]
    fn test_update_details_rejects_non_positive_budget() {
        let owner = ObjectId::new();
        let mut job = job(owner);
        let changes = JobChanges {
            budget: Some(0.0),
            ..Default::default()
        };

        assert!(job.update_details(&owner, changes, DateTime::now()).is_err());
        assert_eq!(job.budget, 120.0);
    }

    #[test]
    fn test_update_details_applies_changes() {
        let owner = ObjectId::new();
        let mut job = job(owner);
        let changes = JobChanges {
            title: Some("Fix bathroom sink".to_string()),
            budget: Some(150.0),
            ..Default::default()
        };

        job.update_details(&owner, changes, DateTime::now()).unwrap();

        assert_eq!(job.title, "Fix bathroom sink");
        assert_eq!(job.budget, 150.0);
        assert_eq!(job.category, "plumbing");
    }

    #[test]
    fn test_reports() {
        let owner = ObjectId::new();
        let reporter = ObjectId::new();
        let mut job = job(owner);

        assert!(job.add_report(owner, "spam".to_string(), DateTime::now()).is_err());
        job.add_report(reporter, "spam".to_string(), DateTime::now()).unwrap();
        assert!(job.add_report(reporter, "again".to_string(), DateTime::now()).is_err());
        assert_eq!(job.pending_report_count(), 1);
    }

    #[test]
    fn test_delete_permissions() {
        let owner = ObjectId::new();
        let job = job(owner);

        assert!(job.ensure_can_delete(&owner, false).is_ok());
        assert!(job.ensure_can_delete(&ObjectId::new(), true).is_ok());
        assert!(job.ensure_can_delete(&ObjectId::new(), false).is_err());
    }

    #[test]
    fn test_involves() {
        let owner = ObjectId::new();
        let mut job = job(owner);
        let p = provider("A");
        let pid = p.id;
        job.apply(p, None, DateTime::now()).unwrap();

        assert!(job.involves(&owner));
        assert!(job.involves(&pid));
        assert!(!job.involves(&ObjectId::new()));
    }
}
