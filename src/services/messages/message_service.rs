//! # 메시지 서비스 구현
//!
//! 1:1 대화방과 메시지를 관리합니다. HTTP 엔드포인트와 WebSocket 릴레이가
//! 같은 [`MessageService::send`]를 사용하므로 저장과 방송 규칙이 한 곳에 모입니다.

use std::collections::HashMap;
use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use validator::Validate;
use crate::core::registry::{Service, ServiceLocator};
use crate::domain::dto::messages::{
    ConversationDetailResponse, ConversationResponse, MarkReadResponse, MessageResponse,
    ParticipantSummary, SendMessageRequest, StartConversationRequest, UnreadCountResponse,
};
use crate::domain::entities::messages::{participant_pair, preview, Conversation, Message};
use crate::domain::models::events::RealtimeEvent;
use crate::errors::AppError;
use crate::repositories::{
    messages::{ConversationRepository, MessageRepository},
    users::UserRepository,
};
use crate::services::realtime::EventHub;
use crate::utils::string_utils::parse_object_id;

pub struct MessageService {
    conversation_repo: Arc<ConversationRepository>,
    message_repo: Arc<MessageRepository>,
    user_repo: Arc<UserRepository>,
    hub: Arc<EventHub>,
}

impl MessageService {
    pub fn new() -> Self {
        Self {
            conversation_repo: ServiceLocator::get::<ConversationRepository>(),
            message_repo: ServiceLocator::get::<MessageRepository>(),
            user_repo: ServiceLocator::get::<UserRepository>(),
            hub: ServiceLocator::get::<EventHub>(),
        }
    }

    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    async fn ensure_user_exists(&self, id: &ObjectId) -> Result<(), AppError> {
        match self.user_repo.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound("User not found".to_string())),
        }
    }

    async fn load_for(&self, user: &ObjectId, conversation_id: &str) -> Result<Conversation, AppError> {
        let id = parse_object_id(conversation_id, "conversation id")?;
        let conversation = self
            .conversation_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conversation not found".to_string()))?;

        conversation.ensure_participant(user)?;
        Ok(conversation)
    }

    async fn describe(&self, user: &ObjectId, conversation: Conversation) -> Result<ConversationResponse, AppError> {
        let other = match conversation.other_participant(user) {
            Some(other) => self.user_repo.find_by_id(&other).await?.map(ParticipantSummary::from),
            None => None,
        };
        let unread = match &conversation.id {
            Some(id) => self.message_repo.count_unread_in(id, user).await?,
            None => 0,
        };

        Ok(ConversationResponse::new(conversation, other, unread))
    }

    /// 최근 대화 순으로 정렬된 내 대화방 목록
    pub async fn conversations(&self, user: &ObjectId) -> Result<Vec<ConversationResponse>, AppError> {
        let conversations = self.conversation_repo.find_for_user(user).await?;

        let mut others: Vec<ObjectId> = conversations
            .iter()
            .filter_map(|c| c.other_participant(user))
            .collect();
        others.sort_by_key(|id| id.bytes());
        others.dedup();

        let mut summaries: HashMap<ObjectId, ParticipantSummary> = HashMap::new();
        for other in self.user_repo.find_by_ids(&others).await? {
            if let Some(id) = other.id {
                summaries.insert(id, ParticipantSummary::from(other));
            }
        }

        let mut responses = Vec::with_capacity(conversations.len());
        for conversation in conversations {
            let other = conversation
                .other_participant(user)
                .and_then(|id| summaries.get(&id).cloned());
            let unread = match &conversation.id {
                Some(id) => self.message_repo.count_unread_in(id, user).await?,
                None => 0,
            };
            responses.push(ConversationResponse::new(conversation, other, unread));
        }

        Ok(responses)
    }

    /// 같은 두 사람의 대화방이 있으면 그것을, 없으면 새로 만들어 돌려줍니다.
    pub async fn start_conversation(&self, user: &ObjectId, request: StartConversationRequest) -> Result<ConversationResponse, AppError> {
        request.validate()?;

        let other = parse_object_id(&request.participant_id, "participant id")?;
        let pair = participant_pair(*user, other)?;
        self.ensure_user_exists(&other).await?;

        let conversation = self.conversation_repo.find_or_create(pair).await?;
        self.describe(user, conversation).await
    }

    pub async fn conversation_detail(&self, user: &ObjectId, conversation_id: &str) -> Result<ConversationDetailResponse, AppError> {
        let conversation = self.load_for(user, conversation_id).await?;
        let messages = match &conversation.id {
            Some(id) => self.message_repo.find_by_conversation(id).await?,
            None => Vec::new(),
        };

        Ok(ConversationDetailResponse {
            conversation: self.describe(user, conversation).await?,
            messages: messages.into_iter().map(MessageResponse::from).collect(),
        })
    }

    /// 내게 온 메시지를 읽음으로 표시합니다.
    pub async fn mark_read(&self, user: &ObjectId, conversation_id: &str) -> Result<MarkReadResponse, AppError> {
        let conversation = self.load_for(user, conversation_id).await?;
        let updated = match &conversation.id {
            Some(id) => self.message_repo.mark_read(id, user).await?,
            None => 0,
        };

        Ok(MarkReadResponse { updated })
    }

    /// 메시지를 저장하고 대화방 미리보기를 갱신한 뒤 `receiveMessage`를 방송합니다.
    pub async fn send(&self, sender: &ObjectId, request: SendMessageRequest) -> Result<MessageResponse, AppError> {
        request.validate()?;

        let content = request.content.trim().to_string();
        if content.is_empty() {
            return Err(AppError::ValidationError("Message content is required".to_string()));
        }

        let recipient = parse_object_id(&request.recipient_id, "recipient id")?;
        let pair = participant_pair(*sender, recipient)?;
        self.ensure_user_exists(&recipient).await?;

        let conversation = self.conversation_repo.find_or_create(pair).await?;
        let conversation_id = conversation
            .id
            .ok_or_else(|| AppError::InternalError("대화방 ID가 없습니다".to_string()))?;

        let message = self
            .message_repo
            .insert(Message::new(conversation_id, *sender, recipient, content))
            .await?;
        self.conversation_repo
            .touch_last_message(&conversation_id, &preview(&message.content), message.created_at)
            .await?;

        let response = MessageResponse::from(message);
        let receivers = self.hub.publish(RealtimeEvent::ReceiveMessage(response.clone()));
        log::debug!("메시지 전송 - conversation: {}, receivers: {}", conversation_id, receivers);

        Ok(response)
    }

    pub async fn unread_count(&self, user: &ObjectId) -> Result<UnreadCountResponse, AppError> {
        Ok(UnreadCountResponse {
            count: self.message_repo.count_unread(user).await?,
        })
    }
}

impl Service for MessageService {
    fn name(&self) -> &str {
        "MessageService"
    }
}
