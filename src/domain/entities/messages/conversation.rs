//! Conversation Entity Implementation
//!
//! 두 사용자 사이의 대화방입니다. 참여자는 항상 정렬된 상태로 저장되고,
//! 정렬된 쌍으로 만든 `pair_key`에 유니크 인덱스가 걸리므로 같은 두 사람은
//! 순서와 관계없이 하나의 대화방을 공유합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::errors::AppError;

/// 미리보기로 저장하는 마지막 메시지의 최대 글자 수
pub const PREVIEW_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub participants: Vec<ObjectId>,
    pub pair_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// 두 참여자를 정렬된 쌍으로 만듭니다. 자기 자신과의 대화는 허용하지 않습니다.
pub fn participant_pair(a: ObjectId, b: ObjectId) -> Result<[ObjectId; 2], AppError> {
    if a == b {
        return Err(AppError::ValidationError(
            "You cannot start a conversation with yourself".to_string(),
        ));
    }
    if a.bytes() <= b.bytes() { Ok([a, b]) } else { Ok([b, a]) }
}

/// 정렬된 쌍의 고유 키
pub fn pair_key(pair: &[ObjectId; 2]) -> String {
    format!("{}:{}", pair[0].to_hex(), pair[1].to_hex())
}

impl Conversation {
    pub fn new(pair: [ObjectId; 2]) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            participants: pair.to_vec(),
            pair_key: pair_key(&pair),
            last_message: None,
            last_message_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn includes(&self, user_id: &ObjectId) -> bool {
        self.participants.contains(user_id)
    }

    pub fn ensure_participant(&self, user_id: &ObjectId) -> Result<(), AppError> {
        if self.includes(user_id) {
            Ok(())
        } else {
            Err(AppError::AuthorizationError(
                "You are not a participant of this conversation".to_string(),
            ))
        }
    }

    /// 상대방 id
    pub fn other_participant(&self, user_id: &ObjectId) -> Option<ObjectId> {
        self.participants.iter().find(|p| *p != user_id).copied()
    }
}

pub fn preview(content: &str) -> String {
    if content.chars().count() <= PREVIEW_MAX_CHARS {
        content.to_string()
    } else {
        let cut: String = content.chars().take(PREVIEW_MAX_CHARS).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_is_order_independent() {
        let a = ObjectId::new();
        let b = ObjectId::new();

        assert_eq!(participant_pair(a, b).unwrap(), participant_pair(b, a).unwrap());
        assert_eq!(
            pair_key(&participant_pair(a, b).unwrap()),
            pair_key(&participant_pair(b, a).unwrap())
        );
    }

    #[test]
    fn test_pair_with_self_rejected() {
        let a = ObjectId::new();

        assert!(participant_pair(a, a).is_err());
    }

    #[test]
    fn test_participants() {
        let a = ObjectId::new();
        let b = ObjectId::new();
        let conversation = Conversation::new(participant_pair(a, b).unwrap());

        assert!(conversation.includes(&a));
        assert_eq!(conversation.other_participant(&a), Some(b));
        assert!(conversation.ensure_participant(&ObjectId::new()).is_err());
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "가".repeat(150);
        let short = preview(&long);

        assert_eq!(short.chars().count(), PREVIEW_MAX_CHARS + 3);
        assert_eq!(preview("hello"), "hello");
    }
}
