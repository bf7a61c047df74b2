//! # Review HTTP Handlers

use actix_web::{delete, get, post, put, web, HttpResponse};
use crate::domain::dto::common::StatusMessage;
use crate::domain::dto::reviews::{CreateReviewRequest, UpdateReviewRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::services::reviews::ReviewService;

/// 리뷰 작성. 같은 대상(과 같은 작업)에 대한 두 번째 리뷰는 400입니다.
///
/// # Endpoint
/// `POST /api/reviews`
#[post("")]
pub async fn create_review(
    user: AuthenticatedUser,
    payload: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    let response = ReviewService::instance()
        .create(&user.object_id()?, payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}

/// 사용자가 받은 리뷰 목록과 현재 평점
///
/// # Endpoint
/// `GET /api/reviews/user/{user_id}`
#[get("/user/{user_id}")]
pub async fn user_reviews(
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = ReviewService::instance().list_for_user(&user_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[put("/{review_id}")]
pub async fn update_review(
    user: AuthenticatedUser,
    review_id: web::Path<String>,
    payload: web::Json<UpdateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    let response = ReviewService::instance()
        .update(&user.object_id()?, &review_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[delete("/{review_id}")]
pub async fn delete_review(
    user: AuthenticatedUser,
    review_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    ReviewService::instance().delete(&user, &review_id).await?;

    Ok(HttpResponse::Ok().json(StatusMessage::new("Review deleted")))
}
