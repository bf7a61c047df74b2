use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 대화방에 속한 단일 메시지
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub conversation: ObjectId,
    pub sender: ObjectId,
    pub recipient: ObjectId,
    pub content: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime,
}

impl Message {
    pub fn new(conversation: ObjectId, sender: ObjectId, recipient: ObjectId, content: String) -> Self {
        Self {
            id: None,
            conversation,
            sender,
            recipient,
            content,
            read: false,
            created_at: DateTime::now(),
        }
    }
}
