//! 연결별 WebSocket 세션
//!
//! 5초마다 ping을 보내고, 10초 동안 클라이언트 트래픽이 없으면 연결을 닫습니다.
//! 테스트에서는 간격을 줄입니다.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_ws::{CloseCode, CloseReason, Closed, Message, MessageStream, ProtocolError, Session};
use mongodb::bson::oid::ObjectId;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::time;

use crate::domain::dto::messages::SendMessageRequest;
use crate::domain::models::events::{ClientEvent, RealtimeEvent};
use crate::domain::models::token::TokenKind;
use crate::errors::AppError;
use crate::services::auth::{AccountGuard, TokenService};
use crate::services::messages::MessageService;

#[cfg(not(test))]
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
#[cfg(test)]
const HEARTBEAT_INTERVAL: Duration = Duration::from_millis(50);

#[cfg(not(test))]
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);
#[cfg(test)]
const CLIENT_TIMEOUT: Duration = Duration::from_millis(100);

#[derive(Debug)]
enum SessionError {
    ClientClosed(Option<CloseReason>),
    StreamClosed,
    HubClosed,
    HeartbeatTimeout,
    Protocol(ProtocolError),
    InvalidPayload,
    Network(Closed),
}

#[derive(Debug, PartialEq)]
enum CloseAction {
    None,
    Close(Option<CloseReason>),
}

pub(super) struct WsSession {
    tokens: Arc<TokenService>,
    guard: Arc<AccountGuard>,
    messages: Arc<MessageService>,
}

impl WsSession {
    pub(super) fn new(tokens: Arc<TokenService>, guard: Arc<AccountGuard>, messages: Arc<MessageService>) -> Self {
        Self { tokens, guard, messages }
    }

    pub(super) async fn run(
        &self,
        mut session: Session,
        mut stream: MessageStream,
        mut events: broadcast::Receiver<RealtimeEvent>,
    ) {
        let mut last_heartbeat = Instant::now();
        let mut heartbeat = time::interval(HEARTBEAT_INTERVAL);

        loop {
            let result = tokio::select! {
                _ = heartbeat.tick() => {
                    handle_heartbeat_tick(&mut session, &last_heartbeat).await
                }
                message = stream.recv() => {
                    self.handle_stream_message(&mut session, &mut last_heartbeat, message).await
                }
                event = events.recv() => {
                    forward_event(&mut session, event).await
                }
            };

            if let Err(error) = result {
                log_shutdown_reason(&error);
                close_session_if_needed(session, close_action_for(&error)).await;
                return;
            }
        }
    }

    async fn handle_stream_message(
        &self,
        session: &mut Session,
        last_heartbeat: &mut Instant,
        message: Option<Result<Message, ProtocolError>>,
    ) -> Result<(), SessionError> {
        let Some(message) = message else {
            return Err(SessionError::StreamClosed);
        };

        match message {
            Ok(Message::Ping(payload)) => {
                *last_heartbeat = Instant::now();
                session.pong(&payload).await.map_err(SessionError::Network)
            }
            Ok(Message::Text(text)) => {
                *last_heartbeat = Instant::now();
                self.handle_text_message(session, text.as_ref()).await
            }
            Ok(Message::Close(reason)) => Err(SessionError::ClientClosed(reason)),
            Ok(_) => {
                *last_heartbeat = Instant::now();
                Ok(())
            }
            Err(error) => Err(SessionError::Protocol(error)),
        }
    }

    async fn handle_text_message(&self, session: &mut Session, text: &str) -> Result<(), SessionError> {
        let event = parse_client_event(text)?;

        match self.relay(event).await {
            Ok(()) => Ok(()),
            Err(error) => {
                log::debug!("WebSocket 메시지 거부: {}", error);
                send_json(session, &rejection(&error)).await.map_err(SessionError::Network)
            }
        }
    }

    /// 저장에 성공하면 `receiveMessage`는 허브를 통해 이 연결을 포함한 모두에게 전달됩니다.
    async fn relay(&self, event: ClientEvent) -> Result<(), AppError> {
        match event {
            ClientEvent::SendMessage { token, recipient_id, content } => {
                let sender = sender_from_token(&self.tokens, &token)?;
                self.guard.check(&sender.to_hex()).await?;

                self.messages
                    .send(&sender, SendMessageRequest { recipient_id, content })
                    .await?;
                Ok(())
            }
        }
    }
}

/// 프레임의 토큰을 액세스 토큰으로 검증해 보낸 사람 ID를 얻습니다.
fn sender_from_token(tokens: &TokenService, token: &str) -> Result<ObjectId, AppError> {
    let claims = tokens.verify_token(token, TokenKind::Access)?;
    ObjectId::parse_str(&claims.sub)
        .map_err(|_| AppError::AuthenticationError("Invalid token subject".to_string()))
}

/// 거부된 전송은 보낸 연결에만 `messageError`로 알립니다.
fn rejection(error: &AppError) -> RealtimeEvent {
    RealtimeEvent::MessageError { message: error.client_message() }
}

fn parse_client_event(text: &str) -> Result<ClientEvent, SessionError> {
    serde_json::from_str::<ClientEvent>(text).map_err(|error| {
        log::warn!("잘못된 WebSocket 페이로드: {}", error);
        SessionError::InvalidPayload
    })
}

async fn handle_heartbeat_tick(session: &mut Session, last_heartbeat: &Instant) -> Result<(), SessionError> {
    if Instant::now().duration_since(*last_heartbeat) > CLIENT_TIMEOUT {
        return Err(SessionError::HeartbeatTimeout);
    }

    session.ping(b"").await.map_err(SessionError::Network)
}

async fn forward_event(
    session: &mut Session,
    event: Result<RealtimeEvent, RecvError>,
) -> Result<(), SessionError> {
    match event {
        Ok(event) => send_json(session, &event).await.map_err(SessionError::Network),
        Err(RecvError::Lagged(skipped)) => {
            log::warn!("WebSocket 구독자가 뒤처져 이벤트 {}개를 건너뜀", skipped);
            Ok(())
        }
        Err(RecvError::Closed) => Err(SessionError::HubClosed),
    }
}

async fn send_json<T: serde::Serialize>(session: &mut Session, payload: &T) -> Result<(), Closed> {
    match serde_json::to_string(payload) {
        Ok(body) => session.text(body).await,
        Err(error) => {
            log::warn!("WebSocket 페이로드 직렬화 실패: {}", error);
            Ok(())
        }
    }
}

fn log_shutdown_reason(error: &SessionError) {
    match error {
        SessionError::HeartbeatTimeout => log::info!("WebSocket heartbeat timeout; closing connection"),
        SessionError::Protocol(error) => log::warn!("WebSocket protocol error: {}", error),
        SessionError::Network(error) => log::warn!("WebSocket send failed: {}", error),
        SessionError::HubClosed => log::warn!("이벤트 허브가 닫혀 WebSocket을 종료합니다"),
        SessionError::InvalidPayload | SessionError::ClientClosed(_) | SessionError::StreamClosed => {}
    }
}

fn close_action_for(error: &SessionError) -> CloseAction {
    match error {
        SessionError::HeartbeatTimeout => CloseAction::Close(Some(CloseReason {
            code: CloseCode::Normal,
            description: Some("heartbeat timeout".to_owned()),
        })),
        SessionError::HubClosed => CloseAction::Close(Some(CloseReason {
            code: CloseCode::Away,
            description: Some("server shutting down".to_owned()),
        })),
        SessionError::Protocol(_) => CloseAction::Close(Some(CloseReason {
            code: CloseCode::Protocol,
            description: Some("protocol error".to_owned()),
        })),
        SessionError::InvalidPayload => CloseAction::Close(Some(CloseReason {
            code: CloseCode::Policy,
            description: Some("invalid payload".to_owned()),
        })),
        SessionError::ClientClosed(reason) => CloseAction::Close(reason.clone()),
        SessionError::StreamClosed | SessionError::Network(_) => CloseAction::None,
    }
}

async fn close_session_if_needed(session: Session, close_action: CloseAction) {
    if let CloseAction::Close(reason) = close_action {
        if let Err(error) = session.close(reason).await {
            log::warn!("WebSocket 종료 실패: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use chrono::Duration as TokenTtl;
    use crate::domain::entities::users::UserRole;

    fn tokens() -> TokenService {
        TokenService::with_settings("relay-secret".to_string(), TokenTtl::minutes(5), TokenTtl::days(1))
    }

    #[test]
    fn test_access_token_identifies_sender() {
        let tokens = tokens();
        let id = ObjectId::new();
        let token = tokens.generate_access_token(&id.to_hex(), UserRole::Seeker).unwrap();

        assert_eq!(sender_from_token(&tokens, &token).unwrap(), id);
    }

    #[rstest]
    #[case::garbage("not-a-jwt", "Invalid token")]
    #[case::refresh_token("refresh", "Invalid token type")]
    #[case::foreign_secret("foreign", "Invalid token")]
    fn test_bad_token_is_answered_with_message_error(#[case] kind: &str, #[case] expected: &str) {
        let tokens = tokens();
        let id = ObjectId::new().to_hex();
        let token = match kind {
            "refresh" => tokens.generate_refresh_token(&id, UserRole::Seeker).unwrap(),
            "foreign" => TokenService::with_settings("other-secret".to_string(), TokenTtl::minutes(5), TokenTtl::days(1))
                .generate_access_token(&id, UserRole::Seeker)
                .unwrap(),
            other => other.to_string(),
        };

        let error = sender_from_token(&tokens, &token).unwrap_err();
        assert!(matches!(error, AppError::AuthenticationError(_)));

        match rejection(&error) {
            RealtimeEvent::MessageError { message } => assert_eq!(message, expected),
            other => panic!("unexpected reply: {}", other.name()),
        }
    }

    #[test]
    fn test_parse_send_message_frame() {
        let frame = r#"{"event":"sendMessage","data":{"token":"t","recipient_id":"r","content":"hi"}}"#;

        match parse_client_event(frame) {
            Ok(ClientEvent::SendMessage { token, recipient_id, content }) => {
                assert_eq!(token, "t");
                assert_eq!(recipient_id, "r");
                assert_eq!(content, "hi");
            }
            other => panic!("unexpected parse result: {:?}", other.map(|_| ())),
        }
    }

    #[rstest]
    #[case::not_json("hello")]
    #[case::unknown_event(r#"{"event":"joinRoom","data":{}}"#)]
    #[case::missing_fields(r#"{"event":"sendMessage","data":{"token":"t"}}"#)]
    fn test_malformed_frames_are_rejected(#[case] frame: &str) {
        assert!(matches!(parse_client_event(frame), Err(SessionError::InvalidPayload)));
    }

    #[rstest]
    #[case(SessionError::HeartbeatTimeout, Some(CloseCode::Normal))]
    #[case(SessionError::InvalidPayload, Some(CloseCode::Policy))]
    #[case(SessionError::HubClosed, Some(CloseCode::Away))]
    fn test_close_codes(#[case] error: SessionError, #[case] expected: Option<CloseCode>) {
        match close_action_for(&error) {
            CloseAction::Close(reason) => assert_eq!(reason.map(|r| r.code), expected),
            CloseAction::None => panic!("expected a close frame"),
        }
    }

    #[test]
    fn test_stream_end_sends_no_close_frame() {
        assert_eq!(close_action_for(&SessionError::StreamClosed), CloseAction::None);
    }

    #[test]
    fn test_test_intervals_are_short() {
        assert!(HEARTBEAT_INTERVAL < CLIENT_TIMEOUT);
        assert!(CLIENT_TIMEOUT <= Duration::from_millis(100));
    }
}
