//! # Support Ticket HTTP Handlers

use actix_web::{get, post, web, HttpResponse};
use crate::domain::dto::tickets::CreateTicketRequest;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::services::tickets::TicketService;

#[post("")]
pub async fn create_ticket(
    user: AuthenticatedUser,
    payload: web::Json<CreateTicketRequest>,
) -> Result<HttpResponse, AppError> {
    let response = TicketService::instance()
        .create(&user.object_id()?, payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}

#[get("/mine")]
pub async fn my_tickets(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = TicketService::instance().mine(&user.object_id()?).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 문의 상세. 작성자와 관리자만 볼 수 있습니다.
#[get("/{ticket_id}")]
pub async fn get_ticket(
    user: AuthenticatedUser,
    ticket_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = TicketService::instance().get(&user, &ticket_id).await?;

    Ok(HttpResponse::Ok().json(response))
}
