//! # 관리자 서비스 구현
//!
//! 대시보드 집계, 사용자 제재(차단/정지), 신고된 작업 처리, 문의 응대를 담당합니다.
//!
//! 차단이나 정지가 걸리면 저장된 리프레시 토큰을 폐기하므로
//! 해당 사용자는 액세스 토큰이 만료된 뒤 다시 로그인할 수 없습니다.

use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use validator::Validate;
use crate::core::registry::{Service, ServiceLocator};
use crate::domain::dto::admin::{
    AdminUserQuery, BanUserRequest, JobStats, StatsResponse, SuspendUserRequest, TicketStats, UserStats,
};
use crate::domain::dto::common::{PageQuery, PageResponse};
use crate::domain::dto::jobs::{JobResponse, ReportedJobResponse};
use crate::domain::dto::tickets::{RespondTicketRequest, TicketListQuery, TicketResponse};
use crate::domain::dto::users::UserResponse;
use crate::domain::entities::jobs::JobStatus;
use crate::domain::entities::tickets::TicketStatus;
use crate::domain::entities::users::{User, UserRole};
use crate::errors::AppError;
use crate::repositories::{
    jobs::{job_repo::reported_jobs_filter, JobRepository},
    reviews::ReviewRepository,
    tickets::TicketRepository,
    tokens::TokenRepository,
    users::{user_repo::admin_user_filter, UserRepository},
};
use crate::services::{jobs::JobService, tickets::TicketService, users::UserService};
use crate::utils::string_utils::parse_object_id;

pub struct AdminService {
    user_repo: Arc<UserRepository>,
    job_repo: Arc<JobRepository>,
    review_repo: Arc<ReviewRepository>,
    ticket_repo: Arc<TicketRepository>,
    token_repo: Arc<TokenRepository>,
    user_service: Arc<UserService>,
    job_service: Arc<JobService>,
    ticket_service: Arc<TicketService>,
}

/// 정지 만료 시각
pub fn suspension_end(days: i64) -> DateTime {
    const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;
    DateTime::from_millis(DateTime::now().timestamp_millis() + days * DAY_MILLIS)
}

/// 관리자 계정은 제재 대상이 될 수 없습니다.
fn ensure_not_admin(user: &User) -> Result<(), AppError> {
    if user.is_admin() {
        return Err(AppError::AuthorizationError("Admin accounts cannot be moderated".to_string()));
    }
    Ok(())
}

impl AdminService {
    pub fn new() -> Self {
        Self {
            user_repo: ServiceLocator::get::<UserRepository>(),
            job_repo: ServiceLocator::get::<JobRepository>(),
            review_repo: ServiceLocator::get::<ReviewRepository>(),
            ticket_repo: ServiceLocator::get::<TicketRepository>(),
            token_repo: ServiceLocator::get::<TokenRepository>(),
            user_service: ServiceLocator::get::<UserService>(),
            job_service: ServiceLocator::get::<JobService>(),
            ticket_service: ServiceLocator::get::<TicketService>(),
        }
    }

    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    async fn load_user(&self, user_id: &str) -> Result<User, AppError> {
        let id = parse_object_id(user_id, "user id")?;
        self.user_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    async fn moderate(&self, user_id: &str, set: mongodb::bson::Document, unset: &[&str]) -> Result<UserResponse, AppError> {
        let user = self.load_user(user_id).await?;
        ensure_not_admin(&user)?;

        let id = user
            .id
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;
        let updated = self
            .user_repo
            .update_and_unset(&id, set, unset)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(UserResponse::from(updated))
    }

    pub async fn stats(&self) -> Result<StatsResponse, AppError> {
        let users = &self.user_repo;
        let jobs = &self.job_repo;
        let tickets = &self.ticket_repo;

        let (total, seekers, providers, admins, banned, suspended) = futures_util::try_join!(
            users.count(doc! {}),
            users.count(doc! { "role": UserRole::Seeker.as_str() }),
            users.count(doc! { "role": UserRole::Provider.as_str() }),
            users.count(doc! { "role": UserRole::Admin.as_str() }),
            users.count(doc! { "is_banned": true }),
            users.count(doc! { "is_suspended": true }),
        )?;

        let (job_total, open, in_progress, completed, cancelled, reported) = futures_util::try_join!(
            jobs.count(doc! {}),
            jobs.count(doc! { "status": JobStatus::Open.as_str() }),
            jobs.count(doc! { "status": JobStatus::InProgress.as_str() }),
            jobs.count(doc! { "status": JobStatus::Completed.as_str() }),
            jobs.count(doc! { "status": JobStatus::Cancelled.as_str() }),
            jobs.count(reported_jobs_filter()),
        )?;

        let (ticket_total, ticket_open, ticket_in_progress, resolved, closed) = futures_util::try_join!(
            tickets.count(doc! {}),
            tickets.count(doc! { "status": TicketStatus::Open.as_str() }),
            tickets.count(doc! { "status": TicketStatus::InProgress.as_str() }),
            tickets.count(doc! { "status": TicketStatus::Resolved.as_str() }),
            tickets.count(doc! { "status": TicketStatus::Closed.as_str() }),
        )?;

        Ok(StatsResponse {
            users: UserStats { total, seekers, providers, admins, banned, suspended },
            jobs: JobStats { total: job_total, open, in_progress, completed, cancelled, reported },
            tickets: TicketStats {
                total: ticket_total,
                open: ticket_open,
                in_progress: ticket_in_progress,
                resolved,
                closed,
            },
            reviews: self.review_repo.count().await?,
        })
    }

    pub async fn users(&self, query: AdminUserQuery) -> Result<PageResponse<UserResponse>, AppError> {
        let role = query.role.as_deref().map(UserRole::from_str).transpose()?;
        let filter = admin_user_filter(role, query.search.as_deref());
        let page = PageQuery::new(query.page, query.limit);

        let (users, total) = self.user_repo.list(filter, &page).await?;
        let items = users.into_iter().map(UserResponse::from).collect();

        Ok(PageResponse::new(items, total, &page))
    }

    pub async fn ban_user(&self, user_id: &str, request: BanUserRequest) -> Result<UserResponse, AppError> {
        request.validate()?;

        let response = self
            .moderate(user_id, doc! { "is_banned": true, "ban_reason": request.reason.trim() }, &[])
            .await?;
        self.token_repo.delete_refresh_token(&response.id).await?;

        log::warn!("사용자 차단 - user_id: {}", user_id);
        Ok(response)
    }

    pub async fn unban_user(&self, user_id: &str) -> Result<UserResponse, AppError> {
        let response = self.moderate(user_id, doc! { "is_banned": false }, &["ban_reason"]).await?;
        log::info!("사용자 차단 해제 - user_id: {}", user_id);
        Ok(response)
    }

    pub async fn suspend_user(&self, user_id: &str, request: SuspendUserRequest) -> Result<UserResponse, AppError> {
        request.validate()?;

        let set = doc! {
            "is_suspended": true,
            "suspension_reason": request.reason.trim(),
            "suspended_until": suspension_end(request.days),
        };
        let response = self.moderate(user_id, set, &[]).await?;
        self.token_repo.delete_refresh_token(&response.id).await?;

        log::warn!("사용자 정지 - user_id: {}, days: {}", user_id, request.days);
        Ok(response)
    }

    pub async fn unsuspend_user(&self, user_id: &str) -> Result<UserResponse, AppError> {
        let response = self
            .moderate(user_id, doc! { "is_suspended": false }, &["suspension_reason", "suspended_until"])
            .await?;
        log::info!("사용자 정지 해제 - user_id: {}", user_id);
        Ok(response)
    }

    pub async fn delete_user(&self, admin_id: &ObjectId, user_id: &str) -> Result<(), AppError> {
        let user = self.load_user(user_id).await?;
        let id = user
            .id
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;
        if &id == admin_id {
            return Err(AppError::ValidationError("Use account deletion to remove your own account".to_string()));
        }
        ensure_not_admin(&user)?;

        self.user_service.delete_account(&id).await?;
        log::warn!("관리자에 의한 사용자 삭제 - user_id: {}, admin: {}", id, admin_id);
        Ok(())
    }

    pub async fn reported_jobs(&self) -> Result<Vec<ReportedJobResponse>, AppError> {
        let jobs = self.job_repo.find_reported().await?;
        Ok(jobs.into_iter().map(ReportedJobResponse::from).collect())
    }

    pub async fn dismiss_reports(&self, job_id: &str) -> Result<JobResponse, AppError> {
        let id = parse_object_id(job_id, "job id")?;
        let job = self
            .job_repo
            .clear_reports(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

        log::info!("신고 기각 - job_id: {}", job_id);
        Ok(JobResponse::from(job))
    }

    pub async fn delete_job(&self, job_id: &str) -> Result<(), AppError> {
        let job = self.job_service.find(job_id).await?;
        self.job_service.remove(job).await
    }

    pub async fn tickets(&self, query: TicketListQuery) -> Result<PageResponse<TicketResponse>, AppError> {
        self.ticket_service.list(query).await
    }

    pub async fn respond_ticket(&self, ticket_id: &str, request: RespondTicketRequest) -> Result<TicketResponse, AppError> {
        self.ticket_service.respond(ticket_id, request).await
    }
}

impl Service for AdminService {
    fn name(&self) -> &str {
        "AdminService"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suspension_end_is_in_the_future() {
        let now = DateTime::now().timestamp_millis();
        let end = suspension_end(3).timestamp_millis();
        let three_days = 3 * 24 * 60 * 60 * 1000;

        assert!(end - now >= three_days - 1_000);
        assert!(end - now <= three_days + 1_000);
    }

    #[test]
    fn test_admin_cannot_be_moderated() {
        let admin = User::new("a@x.com".into(), "h".into(), UserRole::Admin, "A".into());
        let seeker = User::new("s@x.com".into(), "h".into(), UserRole::Seeker, "S".into());

        assert!(matches!(ensure_not_admin(&admin), Err(AppError::AuthorizationError(_))));
        assert!(ensure_not_admin(&seeker).is_ok());
    }
}
