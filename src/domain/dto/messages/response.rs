use serde::Serialize;
use crate::domain::dto::common::{format_datetime, format_optional_datetime, hex_id};
use crate::domain::entities::messages::{Conversation, Message};
use crate::domain::entities::users::User;

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub content: String,
    pub read: bool,
    pub created_at: String,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: hex_id(&message.id),
            conversation_id: message.conversation.to_hex(),
            sender_id: message.sender.to_hex(),
            recipient_id: message.recipient.to_hex(),
            content: message.content,
            read: message.read,
            created_at: format_datetime(&message.created_at),
        }
    }
}

/// 대화 상대 요약
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantSummary {
    pub id: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

impl From<User> for ParticipantSummary {
    fn from(user: User) -> Self {
        Self {
            id: hex_id(&user.id),
            name: user.name,
            avatar_url: user.avatar_url,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationResponse {
    pub id: String,
    pub participant_ids: Vec<String>,
    pub other_participant: Option<ParticipantSummary>,
    pub last_message: Option<String>,
    pub last_message_at: Option<String>,
    pub unread_count: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl ConversationResponse {
    pub fn new(
        conversation: Conversation,
        other_participant: Option<ParticipantSummary>,
        unread_count: u64,
    ) -> Self {
        Self {
            id: hex_id(&conversation.id),
            participant_ids: conversation.participants.iter().map(|p| p.to_hex()).collect(),
            other_participant,
            last_message: conversation.last_message,
            last_message_at: format_optional_datetime(&conversation.last_message_at),
            unread_count,
            created_at: format_datetime(&conversation.created_at),
            updated_at: format_datetime(&conversation.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationDetailResponse {
    pub conversation: ConversationResponse,
    pub messages: Vec<MessageResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnreadCountResponse {
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkReadResponse {
    pub updated: u64,
}
