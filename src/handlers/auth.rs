//! # Authentication HTTP Handlers
//!
//! 가입, 로그인, 토큰 갱신, 로그아웃, 현재 사용자 조회 엔드포인트입니다.
//!
//! | 메서드 | 경로 | 인증 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/api/auth/register` | - | 201 Created |
//! | `POST` | `/api/auth/login` | - | 200 OK |
//! | `POST` | `/api/auth/refresh` | - | 200 OK |
//! | `GET` | `/api/auth/me` | Bearer | 200 OK |
//! | `POST` | `/api/auth/logout` | Bearer | 200 OK |

use actix_web::{get, post, web, HttpResponse};
use crate::domain::dto::common::StatusMessage;
use crate::domain::dto::users::{LoginRequest, RefreshTokenRequest, RegisterRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::services::auth::AuthService;

/// 회원가입 핸들러
///
/// # Endpoint
/// `POST /api/auth/register`
#[post("/register")]
pub async fn register(
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let response = AuthService::instance().register(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

/// 로컬 로그인 핸들러
///
/// 차단된 계정과 정지 기간 중인 계정은 403을 받습니다.
///
/// # Endpoint
/// `POST /api/auth/login`
#[post("/login")]
pub async fn login(
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("로컬 로그인 시도 - 사용자: {}", payload.email);
    let response = AuthService::instance().login(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 토큰 갱신 핸들러
///
/// # Endpoint
/// `POST /api/auth/refresh`
#[post("/refresh")]
pub async fn refresh_tokens(
    payload: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    let response = AuthService::instance().refresh(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 현재 사용자 정보 조회
///
/// # Endpoint
/// `GET /api/auth/me`
#[get("/me")]
pub async fn get_current_user(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = AuthService::instance().me(&user.object_id()?).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 로그아웃. 저장된 리프레시 토큰을 폐기합니다.
///
/// # Endpoint
/// `POST /api/auth/logout`
#[post("/logout")]
pub async fn logout(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    AuthService::instance().logout(&user.user_id).await?;

    Ok(HttpResponse::Ok().json(StatusMessage::new("Logged out")))
}
