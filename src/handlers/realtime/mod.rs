//! WebSocket 실시간 채널
//!
//! `GET /ws`로 연결을 올리면 서버의 모든 실시간 이벤트가 그대로 전달됩니다.
//! 클라이언트는 `sendMessage` 프레임으로 메시지를 보낼 수 있으며,
//! 이때 프레임에 담긴 액세스 토큰으로 보낸 사람을 확인하고, 차단/정지된 계정의 전송은 거부합니다.

use actix_web::{get, web, HttpRequest, HttpResponse};
use crate::services::messages::MessageService;
use crate::services::auth::{AccountGuard, TokenService};
use crate::services::realtime::EventHub;

mod session;

/// WebSocket 업그레이드
#[get("/ws")]
pub async fn ws_entry(
    req: HttpRequest,
    stream: web::Payload,
) -> actix_web::Result<HttpResponse> {
    let (response, ws_session, messages) = actix_ws::handle(&req, stream).map_err(|error| {
        log::error!("WebSocket 업그레이드 실패: {}", error);
        error
    })?;

    let events = EventHub::instance().subscribe();
    let relay = session::WsSession::new(TokenService::instance(), AccountGuard::instance(), MessageService::instance());
    log::debug!("WebSocket 연결 - peer: {:?}", req.peer_addr());

    actix_web::rt::spawn(async move {
        relay.run(ws_session, messages, events).await;
    });

    Ok(response)
}
