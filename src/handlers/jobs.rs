//! # Job HTTP Handlers
//!
//! 작업 목록/상세는 누구나 볼 수 있고, 나머지는 로그인이 필요합니다.
//! 역할 조건은 핸들러에서, 작성자/선정 제공자 조건은 작업 엔티티에서 검사합니다.
//!
//! | 메서드 | 경로 | 역할 |
//! |--------|------|------|
//! | `GET` | `/api/jobs` | - |
//! | `GET` | `/api/jobs/mine` | 로그인 |
//! | `GET` | `/api/jobs/{id}` | - |
//! | `POST` | `/api/jobs` | seeker |
//! | `POST` | `/api/jobs/direct-hire` | seeker |
//! | `PUT` | `/api/jobs/{id}` | 작성자 |
//! | `POST` | `/api/jobs/{id}/apply` | provider |
//! | `POST` | `/api/jobs/{id}/select-provider` | 작성자 |
//! | `POST` | `/api/jobs/{id}/accept-hire` | provider |
//! | `POST` | `/api/jobs/{id}/decline-hire` | provider |
//! | `POST` | `/api/jobs/{id}/reject-application` | 작성자 |
//! | `POST` | `/api/jobs/{id}/complete` | 작성자 또는 선정 제공자 |
//! | `POST` | `/api/jobs/{id}/cancel` | 작성자 |
//! | `POST` | `/api/jobs/{id}/report` | 로그인 |
//! | `DELETE` | `/api/jobs/{id}` | 작성자 또는 admin |

use actix_web::{delete, get, post, put, web, HttpResponse};
use crate::domain::dto::common::StatusMessage;
use crate::domain::dto::jobs::{
    ApplyJobRequest, CompleteJobRequest, CreateJobRequest, DirectHireJobRequest, JobListQuery,
    ProviderActionRequest, ReportJobRequest, UpdateJobRequest,
};
use crate::domain::entities::users::UserRole;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::services::jobs::JobService;

/// 작업 목록. `status`가 없으면 모집 중(`open`)인 작업만 보여줍니다.
#[get("")]
pub async fn list_jobs(
    query: web::Query<JobListQuery>,
) -> Result<HttpResponse, AppError> {
    let response = JobService::instance().list(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[get("/mine")]
pub async fn my_jobs(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = JobService::instance().mine(&user).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[post("")]
pub async fn create_job(
    user: AuthenticatedUser,
    payload: web::Json<CreateJobRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(&[UserRole::Seeker])?;
    let response = JobService::instance()
        .create(&user.object_id()?, payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}

/// 특정 제공자에게 직접 고용 요청을 보내며 작업을 등록합니다.
#[post("/direct-hire")]
pub async fn create_direct_hire(
    user: AuthenticatedUser,
    payload: web::Json<DirectHireJobRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(&[UserRole::Seeker])?;
    let response = JobService::instance()
        .direct_hire(&user.object_id()?, payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}

#[get("/{job_id}")]
pub async fn get_job(
    job_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = JobService::instance().get(&job_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[put("/{job_id}")]
pub async fn update_job(
    user: AuthenticatedUser,
    job_id: web::Path<String>,
    payload: web::Json<UpdateJobRequest>,
) -> Result<HttpResponse, AppError> {
    let response = JobService::instance()
        .update(&user.object_id()?, &job_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 작업 지원. 본문(`message`)은 생략할 수 있습니다.
#[post("/{job_id}/apply")]
pub async fn apply_to_job(
    user: AuthenticatedUser,
    job_id: web::Path<String>,
    payload: Option<web::Json<ApplyJobRequest>>,
) -> Result<HttpResponse, AppError> {
    user.require_any(&[UserRole::Provider])?;
    let request = payload.map(web::Json::into_inner).unwrap_or_default();
    let response = JobService::instance()
        .apply(&user.object_id()?, &job_id, request)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[post("/{job_id}/select-provider")]
pub async fn select_provider(
    user: AuthenticatedUser,
    job_id: web::Path<String>,
    payload: web::Json<ProviderActionRequest>,
) -> Result<HttpResponse, AppError> {
    let response = JobService::instance()
        .select_provider(&user.object_id()?, &job_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[post("/{job_id}/accept-hire")]
pub async fn accept_hire_request(
    user: AuthenticatedUser,
    job_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    user.require_any(&[UserRole::Provider])?;
    let response = JobService::instance()
        .accept_hire(&user.object_id()?, &job_id)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[post("/{job_id}/decline-hire")]
pub async fn decline_hire_request(
    user: AuthenticatedUser,
    job_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    user.require_any(&[UserRole::Provider])?;
    let response = JobService::instance()
        .decline_hire(&user.object_id()?, &job_id)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[post("/{job_id}/reject-application")]
pub async fn reject_application(
    user: AuthenticatedUser,
    job_id: web::Path<String>,
    payload: web::Json<ProviderActionRequest>,
) -> Result<HttpResponse, AppError> {
    let response = JobService::instance()
        .reject_application(&user.object_id()?, &job_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[post("/{job_id}/complete")]
pub async fn complete_job(
    user: AuthenticatedUser,
    job_id: web::Path<String>,
    payload: Option<web::Json<CompleteJobRequest>>,
) -> Result<HttpResponse, AppError> {
    let request = payload.map(web::Json::into_inner).unwrap_or_default();
    let response = JobService::instance()
        .complete(&user.object_id()?, &job_id, request)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[post("/{job_id}/cancel")]
pub async fn cancel_job(
    user: AuthenticatedUser,
    job_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = JobService::instance()
        .cancel(&user.object_id()?, &job_id)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[post("/{job_id}/report")]
pub async fn report_job(
    user: AuthenticatedUser,
    job_id: web::Path<String>,
    payload: web::Json<ReportJobRequest>,
) -> Result<HttpResponse, AppError> {
    JobService::instance()
        .report(&user.object_id()?, &job_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(StatusMessage::new("Report submitted")))
}

#[delete("/{job_id}")]
pub async fn delete_job(
    user: AuthenticatedUser,
    job_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    JobService::instance().delete(&user, &job_id).await?;

    Ok(HttpResponse::Ok().json(StatusMessage::new("Job deleted")))
}
