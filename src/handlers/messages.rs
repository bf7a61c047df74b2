//! # Messaging HTTP Handlers
//!
//! 모든 엔드포인트는 로그인이 필요합니다. 대화방 조회/읽음 처리는 참여자만 할 수 있습니다.

use actix_web::{get, post, put, web, HttpResponse};
use crate::domain::dto::messages::{SendMessageRequest, StartConversationRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::services::messages::MessageService;

#[get("/conversations")]
pub async fn list_conversations(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = MessageService::instance().conversations(&user.object_id()?).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 대화방 열기. 같은 상대와의 대화방이 있으면 그대로 돌려줍니다.
#[post("/conversations")]
pub async fn start_conversation(
    user: AuthenticatedUser,
    payload: web::Json<StartConversationRequest>,
) -> Result<HttpResponse, AppError> {
    let response = MessageService::instance()
        .start_conversation(&user.object_id()?, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[get("/conversations/{conversation_id}")]
pub async fn get_conversation(
    user: AuthenticatedUser,
    conversation_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = MessageService::instance()
        .conversation_detail(&user.object_id()?, &conversation_id)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[put("/conversations/{conversation_id}/read")]
pub async fn mark_conversation_read(
    user: AuthenticatedUser,
    conversation_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = MessageService::instance()
        .mark_read(&user.object_id()?, &conversation_id)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 메시지 전송. 저장 후 모든 WebSocket 연결에 `receiveMessage`로 방송됩니다.
#[post("")]
pub async fn send_message(
    user: AuthenticatedUser,
    payload: web::Json<SendMessageRequest>,
) -> Result<HttpResponse, AppError> {
    let response = MessageService::instance()
        .send(&user.object_id()?, payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}

#[get("/unread-count")]
pub async fn unread_count(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = MessageService::instance().unread_count(&user.object_id()?).await?;

    Ok(HttpResponse::Ok().json(response))
}
