//! # User Profile HTTP Handlers
//!
//! 제공자 검색, 공개 프로필, 본인 프로필/설정/비밀번호 변경, 계정 삭제를 처리합니다.
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `/api/users/providers` | 제공자 검색 | 200 OK |
//! | `GET` | `/api/users/{id}` | 공개 프로필 | 200 OK |
//! | `PUT` | `/api/users/profile` | 프로필 수정 | 200 OK |
//! | `PUT` | `/api/users/settings` | 알림/공개 설정 | 200 OK |
//! | `PUT` | `/api/users/password` | 비밀번호 변경 | 200 OK |
//! | `DELETE` | `/api/users/account` | 계정 삭제 | 200 OK |
//!
//! 고정 경로(`/providers`, `/profile` 등)는 `/{user_id}`보다 먼저 등록해야 합니다.

use actix_web::{delete, get, put, web, HttpResponse};
use crate::domain::dto::common::StatusMessage;
use crate::domain::dto::users::{
    ChangePasswordRequest, ProviderSearchQuery, UpdateProfileRequest, UpdateSettingsRequest,
};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::services::users::UserService;
use crate::utils::string_utils::parse_object_id;

/// 제공자 검색
///
/// 전문 분야, 최소 평점, 좌표 반경(`lat`, `lng`, `radius_km`)으로 거를 수 있습니다.
#[get("/providers")]
pub async fn search_providers(
    query: web::Query<ProviderSearchQuery>,
) -> Result<HttpResponse, AppError> {
    let response = UserService::instance().search_providers(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[put("/profile")]
pub async fn update_profile(
    user: AuthenticatedUser,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let response = UserService::instance()
        .update_profile(&user.object_id()?, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[put("/settings")]
pub async fn update_settings(
    user: AuthenticatedUser,
    payload: web::Json<UpdateSettingsRequest>,
) -> Result<HttpResponse, AppError> {
    let response = UserService::instance()
        .update_settings(&user.object_id()?, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[put("/password")]
pub async fn change_password(
    user: AuthenticatedUser,
    payload: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    UserService::instance()
        .change_password(&user.object_id()?, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(StatusMessage::new("Password updated")))
}

/// 본인 계정 삭제
///
/// 작성한 작업, 리뷰, 대화, 문의가 함께 삭제됩니다.
#[delete("/account")]
pub async fn delete_account(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    UserService::instance().delete_account(&user.object_id()?).await?;

    Ok(HttpResponse::Ok().json(StatusMessage::new("Account deleted")))
}

/// 공개 프로필. 공개 설정에 따라 연락처와 위치가 숨겨집니다.
#[get("/{user_id}")]
pub async fn get_public_profile(
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&user_id, "user id")?;
    let response = UserService::instance().public_profile(&id).await?;

    Ok(HttpResponse::Ok().json(response))
}
