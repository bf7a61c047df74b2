//! 실시간 이벤트 프레임
//!
//! 모든 프레임은 `{"event": <이름>, "data": <페이로드>}` 형태입니다.
//! 서버는 이벤트를 모든 연결에 그대로 방송하고, 클라이언트가 페이로드에 담긴
//! id로 자신과 관련된 이벤트만 골라냅니다.

use serde::{Deserialize, Serialize};
use crate::domain::dto::jobs::JobResponse;
use crate::domain::dto::messages::MessageResponse;

/// 서버 → 클라이언트
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum RealtimeEvent {
    JobCreated(JobResponse),
    JobUpdated(JobResponse),
    JobApplication {
        job_id: String,
        seeker_id: String,
        provider_id: String,
        provider_name: String,
    },
    JobProviderSelected {
        job_id: String,
        seeker_id: String,
        provider_id: String,
    },
    JobCompleted {
        job_id: String,
        seeker_id: String,
        provider_id: Option<String>,
    },
    JobDeleted {
        job_id: String,
    },
    DirectHireRequest {
        job_id: String,
        seeker_id: String,
        provider_id: String,
        title: String,
    },
    ReceiveMessage(MessageResponse),
    /// 전송한 연결에만 돌려주는 오류. 방송하지 않습니다.
    MessageError {
        message: String,
    },
}

impl RealtimeEvent {
    pub fn name(&self) -> &'static str {
        match self {
            RealtimeEvent::JobCreated(_) => "jobCreated",
            RealtimeEvent::JobUpdated(_) => "jobUpdated",
            RealtimeEvent::JobApplication { .. } => "jobApplication",
            RealtimeEvent::JobProviderSelected { .. } => "jobProviderSelected",
            RealtimeEvent::JobCompleted { .. } => "jobCompleted",
            RealtimeEvent::JobDeleted { .. } => "jobDeleted",
            RealtimeEvent::DirectHireRequest { .. } => "directHireRequest",
            RealtimeEvent::ReceiveMessage(_) => "receiveMessage",
            RealtimeEvent::MessageError { .. } => "messageError",
        }
    }
}

/// 클라이언트 → 서버
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    SendMessage {
        token: String,
        recipient_id: String,
        content: String,
    },
}
