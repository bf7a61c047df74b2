//! 실시간 이벤트 허브
//!
//! 프로세스 전체에서 하나의 `tokio::sync::broadcast` 채널을 공유합니다.
//! 핸들러/서비스는 변경 직후 `publish`하고, 각 WebSocket 세션은 `subscribe`한
//! 수신기에서 이벤트를 꺼내 그대로 클라이언트에 전달합니다.
//!
//! 발행은 기다리지 않습니다. 구독자가 없으면 이벤트는 버려지고, 느린 구독자는
//! 밀린 이벤트를 잃습니다 (`RecvError::Lagged`).

use std::sync::Arc;
use tokio::sync::broadcast;
use crate::config::RealtimeConfig;
use crate::core::registry::{Service, ServiceLocator};
use crate::domain::models::events::RealtimeEvent;

pub struct EventHub {
    sender: broadcast::Sender<RealtimeEvent>,
}

impl EventHub {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn from_config() -> Self {
        Self::new(RealtimeConfig::channel_capacity())
    }

    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    /// 이벤트를 모든 구독자에게 보내고 받은 구독자 수를 돌려줍니다.
    pub fn publish(&self, event: RealtimeEvent) -> usize {
        let name = event.name();
        match self.sender.send(event) {
            Ok(receivers) => {
                log::debug!("📣 {} → {}개 연결", name, receivers);
                receivers
            }
            Err(_) => {
                log::debug!("📣 {} (구독자 없음)", name);
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RealtimeEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Service for EventHub {
    fn name(&self) -> &str {
        "EventHub"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_subscribers_is_dropped() {
        let hub = EventHub::new(4);

        assert_eq!(hub.publish(RealtimeEvent::JobDeleted { job_id: "a".to_string() }), 0);
    }

    #[actix_web::test]
    async fn test_every_subscriber_receives_event() {
        let hub = EventHub::new(4);
        let mut first = hub.subscribe();
        let mut second = hub.subscribe();

        assert_eq!(hub.subscriber_count(), 2);
        let delivered = hub.publish(RealtimeEvent::JobDeleted { job_id: "a".to_string() });

        assert_eq!(delivered, 2);
        assert_eq!(first.recv().await.unwrap().name(), "jobDeleted");
        assert_eq!(second.recv().await.unwrap().name(), "jobDeleted");
    }

    #[actix_web::test]
    async fn test_slow_subscriber_lags() {
        let hub = EventHub::new(1);
        let mut receiver = hub.subscribe();

        hub.publish(RealtimeEvent::JobDeleted { job_id: "a".to_string() });
        hub.publish(RealtimeEvent::JobDeleted { job_id: "b".to_string() });

        assert!(matches!(
            receiver.recv().await,
            Err(broadcast::error::RecvError::Lagged(1))
        ));
        match receiver.recv().await.unwrap() {
            RealtimeEvent::JobDeleted { job_id } => assert_eq!(job_id, "b"),
            other => panic!("unexpected event {}", other.name()),
        }
    }
}
