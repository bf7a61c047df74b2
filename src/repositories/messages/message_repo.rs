use std::sync::Arc;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    Collection, IndexModel,
};
use crate::core::registry::{Repository, ServiceLocator};
use crate::db::Database;
use crate::domain::entities::messages::Message;
use crate::errors::AppError;

const COLLECTION: &str = "messages";

/// 메시지 리포지토리
pub struct MessageRepository {
    db: Arc<Database>,
}

impl MessageRepository {
    pub fn new() -> Self {
        Self {
            db: ServiceLocator::get::<Database>(),
        }
    }

    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    fn collection(&self) -> Collection<Message> {
        self.db.collection::<Message>(COLLECTION)
    }

    pub async fn insert(&self, mut message: Message) -> Result<Message, AppError> {
        let result = self.collection().insert_one(&message).await?;
        message.id = result.inserted_id.as_object_id();
        Ok(message)
    }

    /// 대화방 메시지 (오래된 순)
    pub async fn find_by_conversation(&self, conversation: &ObjectId) -> Result<Vec<Message>, AppError> {
        let messages = self
            .collection()
            .find(doc! { "conversation": conversation })
            .sort(doc! { "created_at": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(messages)
    }

    /// 받은 메시지를 읽음 처리하고 변경된 개수를 돌려줍니다.
    pub async fn mark_read(&self, conversation: &ObjectId, recipient: &ObjectId) -> Result<u64, AppError> {
        let result = self
            .collection()
            .update_many(
                doc! { "conversation": conversation, "recipient": recipient, "read": false },
                doc! { "$set": { "read": true } },
            )
            .await?;
        Ok(result.modified_count)
    }

    pub async fn count_unread(&self, recipient: &ObjectId) -> Result<u64, AppError> {
        Ok(self
            .collection()
            .count_documents(doc! { "recipient": recipient, "read": false })
            .await?)
    }

    pub async fn count_unread_in(&self, conversation: &ObjectId, recipient: &ObjectId) -> Result<u64, AppError> {
        Ok(self
            .collection()
            .count_documents(doc! { "conversation": conversation, "recipient": recipient, "read": false })
            .await?)
    }

    pub async fn delete_by_conversations(&self, conversations: &[ObjectId]) -> Result<u64, AppError> {
        if conversations.is_empty() {
            return Ok(0);
        }
        let result = self
            .collection()
            .delete_many(doc! { "conversation": { "$in": conversations } })
            .await?;
        Ok(result.deleted_count)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let conversation_index = IndexModel::builder()
            .keys(doc! { "conversation": 1, "created_at": 1 })
            .options(IndexOptions::builder().name("conversation_created_at".to_string()).build())
            .build();

        let unread_index = IndexModel::builder()
            .keys(doc! { "recipient": 1, "read": 1 })
            .options(IndexOptions::builder().name("recipient_read".to_string()).build())
            .build();

        self.collection().create_indexes([conversation_index, unread_index]).await?;
        Ok(())
    }
}

#[async_trait]
impl Repository for MessageRepository {
    fn name(&self) -> &str {
        "MessageRepository"
    }

    fn collection_name(&self) -> &str {
        COLLECTION
    }

    async fn init(&self) -> Result<(), AppError> {
        self.create_indexes().await
    }
}
