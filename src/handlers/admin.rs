//! # Admin HTTP Handlers
//!
//! `/api/admin` 스코프는 admin 역할 토큰이 있어야 접근할 수 있습니다.
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` | `/stats` | 사용자/작업/문의 집계 |
//! | `GET` | `/users` | 사용자 목록 (`role`, `search`) |
//! | `PUT` | `/users/{id}/ban` | 차단 |
//! | `PUT` | `/users/{id}/unban` | 차단 해제 |
//! | `PUT` | `/users/{id}/suspend` | 기간 정지 |
//! | `PUT` | `/users/{id}/unsuspend` | 정지 해제 |
//! | `DELETE` | `/users/{id}` | 사용자 삭제 |
//! | `GET` | `/jobs/reported` | 신고된 작업 |
//! | `PUT` | `/jobs/{id}/dismiss-reports` | 신고 기각 |
//! | `DELETE` | `/jobs/{id}` | 작업 삭제 |
//! | `GET` | `/tickets` | 문의 목록 (`status`) |
//! | `PUT` | `/tickets/{id}` | 문의 답변/상태 변경 |

use actix_web::{delete, get, put, web, HttpResponse};
use crate::domain::dto::admin::{AdminUserQuery, BanUserRequest, SuspendUserRequest};
use crate::domain::dto::common::StatusMessage;
use crate::domain::dto::tickets::{RespondTicketRequest, TicketListQuery};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::services::admin::AdminService;

#[get("/stats")]
pub async fn stats() -> Result<HttpResponse, AppError> {
    let response = AdminService::instance().stats().await?;

    Ok(HttpResponse::Ok().json(response))
}

#[get("/users")]
pub async fn list_users(
    query: web::Query<AdminUserQuery>,
) -> Result<HttpResponse, AppError> {
    let response = AdminService::instance().users(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[put("/users/{user_id}/ban")]
pub async fn ban_user(
    user_id: web::Path<String>,
    payload: web::Json<BanUserRequest>,
) -> Result<HttpResponse, AppError> {
    let response = AdminService::instance()
        .ban_user(&user_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[put("/users/{user_id}/unban")]
pub async fn unban_user(
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = AdminService::instance().unban_user(&user_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 기간 정지. 만료 후 첫 로그인에서 자동으로 해제됩니다.
#[put("/users/{user_id}/suspend")]
pub async fn suspend_user(
    user_id: web::Path<String>,
    payload: web::Json<SuspendUserRequest>,
) -> Result<HttpResponse, AppError> {
    let response = AdminService::instance()
        .suspend_user(&user_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[put("/users/{user_id}/unsuspend")]
pub async fn unsuspend_user(
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = AdminService::instance().unsuspend_user(&user_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[delete("/users/{user_id}")]
pub async fn delete_user(
    admin: AuthenticatedUser,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    AdminService::instance()
        .delete_user(&admin.object_id()?, &user_id)
        .await?;

    Ok(HttpResponse::Ok().json(StatusMessage::new("User deleted")))
}

#[get("/jobs/reported")]
pub async fn reported_jobs() -> Result<HttpResponse, AppError> {
    let response = AdminService::instance().reported_jobs().await?;

    Ok(HttpResponse::Ok().json(response))
}

#[put("/jobs/{job_id}/dismiss-reports")]
pub async fn dismiss_reports(
    job_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = AdminService::instance().dismiss_reports(&job_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[delete("/jobs/{job_id}")]
pub async fn delete_job(
    job_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    AdminService::instance().delete_job(&job_id).await?;

    Ok(HttpResponse::Ok().json(StatusMessage::new("Job deleted")))
}

#[get("/tickets")]
pub async fn list_tickets(
    query: web::Query<TicketListQuery>,
) -> Result<HttpResponse, AppError> {
    let response = AdminService::instance().tickets(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[put("/tickets/{ticket_id}")]
pub async fn respond_ticket(
    ticket_id: web::Path<String>,
    payload: web::Json<RespondTicketRequest>,
) -> Result<HttpResponse, AppError> {
    let response = AdminService::instance()
        .respond_ticket(&ticket_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
