//! # 작업(Job) 서비스 구현
//!
//! 작업 등록부터 완료까지의 고용 흐름을 담당합니다.
//!
//! 모든 상태 변경은 같은 순서로 진행됩니다.
//!
//! 1. 문서를 읽어옵니다 (없으면 404)
//! 2. [`Job`]의 전이 메서드로 전제 조건을 검사하고 상태를 바꿉니다
//! 3. 문서 전체를 저장합니다
//! 4. 실시간 이벤트를 방송합니다
//!
//! 문서 간 트랜잭션은 없으며, 동시에 들어온 변경은 마지막 저장이 남습니다.

use std::sync::Arc;
use mongodb::bson::{oid::ObjectId, DateTime};
use validator::Validate;
use crate::core::registry::{Service, ServiceLocator};
use crate::domain::dto::common::{PageQuery, PageResponse};
use crate::domain::dto::jobs::{
    ApplyJobRequest, CompleteJobRequest, CreateJobRequest, DirectHireJobRequest, JobListQuery,
    JobResponse, ProviderActionRequest, ReportJobRequest, UpdateJobRequest,
};
use crate::domain::entities::common::GeoPoint;
use crate::domain::entities::jobs::{Job, JobChanges, JobStatus, ProviderSnapshot};
use crate::domain::entities::users::{User, UserRole};
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::events::RealtimeEvent;
use crate::errors::AppError;
use crate::repositories::{
    jobs::{JobListFilter, JobRepository},
    users::UserRepository,
};
use crate::services::realtime::EventHub;
use crate::utils::geo::search_area;
use crate::utils::string_utils::{clean_optional_string, parse_object_id};

pub struct JobService {
    job_repo: Arc<JobRepository>,
    user_repo: Arc<UserRepository>,
    hub: Arc<EventHub>,
}

fn snapshot(user: &User) -> Result<ProviderSnapshot, AppError> {
    let id = user
        .id
        .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

    Ok(ProviderSnapshot {
        id,
        name: user.name.clone(),
        rating: user.rating,
    })
}

/// 등록 요청을 새 작업 문서로 변환합니다.
pub fn build_job(seeker: ObjectId, request: CreateJobRequest) -> Result<Job, AppError> {
    let location = request.location.map(GeoPoint::try_from).transpose()?;

    Ok(Job::new(
        seeker,
        request.title.trim().to_string(),
        request.description.trim().to_string(),
        request.category.trim().to_string(),
        request.budget,
        location,
        clean_optional_string(request.address),
    ))
}

fn job_changes(request: UpdateJobRequest) -> Result<JobChanges, AppError> {
    Ok(JobChanges {
        title: clean_optional_string(request.title),
        description: clean_optional_string(request.description),
        category: clean_optional_string(request.category),
        budget: request.budget,
        location: request.location.map(GeoPoint::try_from).transpose()?,
        address: clean_optional_string(request.address),
    })
}

fn id_of(job: &Job) -> String {
    job.id_string().unwrap_or_default()
}

impl JobService {
    pub fn new() -> Self {
        Self {
            job_repo: ServiceLocator::get::<JobRepository>(),
            user_repo: ServiceLocator::get::<UserRepository>(),
            hub: ServiceLocator::get::<EventHub>(),
        }
    }

    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    async fn load(&self, job_id: &str) -> Result<Job, AppError> {
        let id = parse_object_id(job_id, "job id")?;
        self.job_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("Job not found".to_string()))
    }

    async fn load_provider(&self, provider_id: &ObjectId) -> Result<User, AppError> {
        let user = self
            .user_repo
            .find_by_id(provider_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Provider not found".to_string()))?;

        if !user.is_provider() {
            return Err(AppError::ValidationError("The target user is not a provider".to_string()));
        }
        Ok(user)
    }

    async fn save_and_publish_update(&self, job: Job) -> Result<JobResponse, AppError> {
        self.job_repo.save(&job).await?;
        let response = JobResponse::from(job);
        self.hub.publish(RealtimeEvent::JobUpdated(response.clone()));
        Ok(response)
    }

    pub async fn list(&self, query: JobListQuery) -> Result<PageResponse<JobResponse>, AppError> {
        let status = match query.status.as_deref() {
            Some(status) => JobStatus::from_str(status)?,
            None => JobStatus::Open,
        };
        let filter = JobListFilter {
            status,
            category: query.category,
            near: search_area(query.lat, query.lng, query.radius_km)?,
        };
        let page = PageQuery::new(query.page, query.limit);

        let (jobs, total) = self.job_repo.list(filter.to_filter(), &page).await?;
        let items = jobs.into_iter().map(JobResponse::from).collect();

        Ok(PageResponse::new(items, total, &page))
    }

    /// 구직자는 등록한 작업, 제공자는 지원했거나 고용된 작업을 봅니다.
    pub async fn mine(&self, user: &AuthenticatedUser) -> Result<Vec<JobResponse>, AppError> {
        let id = user.object_id()?;
        let jobs = match user.role {
            UserRole::Provider => self.job_repo.find_by_provider(&id).await?,
            _ => self.job_repo.find_by_seeker(&id).await?,
        };

        Ok(jobs.into_iter().map(JobResponse::from).collect())
    }

    pub async fn get(&self, job_id: &str) -> Result<JobResponse, AppError> {
        Ok(JobResponse::from(self.load(job_id).await?))
    }

    pub async fn create(&self, seeker: &ObjectId, request: CreateJobRequest) -> Result<JobResponse, AppError> {
        request.validate()?;

        let job = self.job_repo.insert(build_job(*seeker, request)?).await?;
        log::info!("작업 등록 - job_id: {}, seeker: {}", id_of(&job), seeker);

        let response = JobResponse::from(job);
        self.hub.publish(RealtimeEvent::JobCreated(response.clone()));
        Ok(response)
    }

    /// 특정 제공자를 지정해 작업을 등록하고, 해당 제공자에게 고용 요청을 알립니다.
    pub async fn direct_hire(&self, seeker: &ObjectId, request: DirectHireJobRequest) -> Result<JobResponse, AppError> {
        request.validate()?;

        let provider_id = parse_object_id(&request.provider_id, "provider id")?;
        if &provider_id == seeker {
            return Err(AppError::ValidationError("You cannot hire yourself".to_string()));
        }
        self.load_provider(&provider_id).await?;

        let job = build_job(*seeker, request.job)?.with_direct_hire(provider_id);
        let job = self.job_repo.insert(job).await?;
        log::info!("직접 고용 요청 - job_id: {}, provider: {}", id_of(&job), provider_id);

        self.hub.publish(RealtimeEvent::DirectHireRequest {
            job_id: id_of(&job),
            seeker_id: seeker.to_hex(),
            provider_id: provider_id.to_hex(),
            title: job.title.clone(),
        });
        Ok(JobResponse::from(job))
    }

    pub async fn update(&self, actor: &ObjectId, job_id: &str, request: UpdateJobRequest) -> Result<JobResponse, AppError> {
        request.validate()?;

        let mut job = self.load(job_id).await?;
        job.update_details(actor, job_changes(request)?, DateTime::now())?;
        self.save_and_publish_update(job).await
    }

    pub async fn apply(&self, provider_id: &ObjectId, job_id: &str, request: ApplyJobRequest) -> Result<JobResponse, AppError> {
        request.validate()?;

        let provider = self.load_provider(provider_id).await?;
        let mut job = self.load(job_id).await?;
        job.apply(snapshot(&provider)?, clean_optional_string(request.message), DateTime::now())?;
        self.job_repo.save(&job).await?;

        log::info!("작업 지원 - job_id: {}, provider: {}", job_id, provider_id);
        self.hub.publish(RealtimeEvent::JobApplication {
            job_id: id_of(&job),
            seeker_id: job.seeker.to_hex(),
            provider_id: provider_id.to_hex(),
            provider_name: provider.name.clone(),
        });
        Ok(JobResponse::from(job))
    }

    pub async fn select_provider(&self, owner: &ObjectId, job_id: &str, request: ProviderActionRequest) -> Result<JobResponse, AppError> {
        request.validate()?;

        let provider_id = parse_object_id(&request.provider_id, "provider id")?;
        let mut job = self.load(job_id).await?;
        job.select_provider(owner, &provider_id, DateTime::now())?;
        self.job_repo.save(&job).await?;

        log::info!("제공자 선정 - job_id: {}, provider: {}", job_id, provider_id);
        self.hub.publish(RealtimeEvent::JobProviderSelected {
            job_id: id_of(&job),
            seeker_id: job.seeker.to_hex(),
            provider_id: provider_id.to_hex(),
        });
        Ok(JobResponse::from(job))
    }

    pub async fn accept_hire(&self, provider_id: &ObjectId, job_id: &str) -> Result<JobResponse, AppError> {
        let provider = self.load_provider(provider_id).await?;
        let mut job = self.load(job_id).await?;
        job.accept_hire_request(snapshot(&provider)?, DateTime::now())?;
        self.job_repo.save(&job).await?;

        log::info!("직접 고용 수락 - job_id: {}, provider: {}", job_id, provider_id);
        self.hub.publish(RealtimeEvent::JobProviderSelected {
            job_id: id_of(&job),
            seeker_id: job.seeker.to_hex(),
            provider_id: provider_id.to_hex(),
        });
        Ok(JobResponse::from(job))
    }

    pub async fn decline_hire(&self, provider_id: &ObjectId, job_id: &str) -> Result<JobResponse, AppError> {
        let mut job = self.load(job_id).await?;
        job.decline_hire_request(provider_id, DateTime::now())?;

        log::info!("직접 고용 거절 - job_id: {}, provider: {}", job_id, provider_id);
        self.save_and_publish_update(job).await
    }

    pub async fn reject_application(&self, owner: &ObjectId, job_id: &str, request: ProviderActionRequest) -> Result<JobResponse, AppError> {
        request.validate()?;

        let provider_id = parse_object_id(&request.provider_id, "provider id")?;
        let mut job = self.load(job_id).await?;
        job.reject_application(owner, &provider_id, DateTime::now())?;
        self.save_and_publish_update(job).await
    }

    pub async fn complete(&self, actor: &ObjectId, job_id: &str, request: CompleteJobRequest) -> Result<JobResponse, AppError> {
        request.validate()?;

        let mut job = self.load(job_id).await?;
        job.complete(actor, clean_optional_string(request.completion_notes), DateTime::now())?;
        self.job_repo.save(&job).await?;

        log::info!("작업 완료 - job_id: {}", job_id);
        self.hub.publish(RealtimeEvent::JobCompleted {
            job_id: id_of(&job),
            seeker_id: job.seeker.to_hex(),
            provider_id: job.selected_provider.map(|p| p.to_hex()),
        });
        Ok(JobResponse::from(job))
    }

    pub async fn cancel(&self, owner: &ObjectId, job_id: &str) -> Result<JobResponse, AppError> {
        let mut job = self.load(job_id).await?;
        job.cancel(owner, DateTime::now())?;

        log::info!("작업 취소 - job_id: {}", job_id);
        self.save_and_publish_update(job).await
    }

    pub async fn report(&self, reporter: &ObjectId, job_id: &str, request: ReportJobRequest) -> Result<(), AppError> {
        request.validate()?;

        let mut job = self.load(job_id).await?;
        job.add_report(*reporter, request.reason.trim().to_string(), DateTime::now())?;
        self.job_repo.save(&job).await?;

        log::warn!("작업 신고 접수 - job_id: {}, reporter: {}", job_id, reporter);
        Ok(())
    }

    pub async fn delete(&self, user: &AuthenticatedUser, job_id: &str) -> Result<(), AppError> {
        let job = self.load(job_id).await?;
        job.ensure_can_delete(&user.object_id()?, user.is_admin())?;
        self.remove(job).await
    }

    /// 권한 확인 없이 작업을 지우고 `jobDeleted`를 방송합니다.
    pub async fn remove(&self, job: Job) -> Result<(), AppError> {
        let id = job
            .id
            .ok_or_else(|| AppError::InternalError("작업 ID가 없습니다".to_string()))?;

        if !self.job_repo.delete(&id).await? {
            return Err(AppError::NotFound("Job not found".to_string()));
        }

        log::info!("작업 삭제 - job_id: {}", id);
        self.hub.publish(RealtimeEvent::JobDeleted { job_id: id.to_hex() });
        Ok(())
    }

    /// 관리자용 작업 조회
    pub async fn find(&self, job_id: &str) -> Result<Job, AppError> {
        self.load(job_id).await
    }
}

impl Service for JobService {
    fn name(&self) -> &str {
        "JobService"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::common::Coordinates;

    fn create_request() -> CreateJobRequest {
        CreateJobRequest {
            title: "  Paint fence ".to_string(),
            description: "Two coats".to_string(),
            category: "painting".to_string(),
            budget: 80.0,
            location: Some(Coordinates { lat: 37.5, lng: 127.0 }),
            address: Some("".to_string()),
        }
    }

    #[test]
    fn test_build_job_starts_open() {
        let seeker = ObjectId::new();
        let job = build_job(seeker, create_request()).unwrap();

        assert_eq!(job.title, "Paint fence");
        assert_eq!(job.status, JobStatus::Open);
        assert_eq!(job.seeker, seeker);
        assert!(job.address.is_none());
        assert!(job.location.is_some());
    }

    #[test]
    fn test_build_job_rejects_bad_coordinates() {
        let mut request = create_request();
        request.location = Some(Coordinates { lat: 120.0, lng: 0.0 });

        assert!(build_job(ObjectId::new(), request).is_err());
    }

    #[test]
    fn test_job_changes_drops_blank_fields() {
        let changes = job_changes(UpdateJobRequest {
            title: Some("  ".to_string()),
            budget: Some(50.0),
            ..Default::default()
        })
        .unwrap();

        assert!(changes.title.is_none());
        assert_eq!(changes.budget, Some(50.0));
    }

    #[test]
    fn test_snapshot_requires_id() {
        let mut user = User::new("p@x.com".into(), "h".into(), UserRole::Provider, "P".into());
        assert!(snapshot(&user).is_err());

        user.id = Some(ObjectId::new());
        user.rating = 4.5;
        let snap = snapshot(&user).unwrap();
        assert_eq!(snap.name, "P");
        assert_eq!(snap.rating, 4.5);
    }
}
