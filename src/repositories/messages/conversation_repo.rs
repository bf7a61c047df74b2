use std::sync::Arc;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime},
    options::IndexOptions,
    Collection, IndexModel,
};
use crate::core::registry::{Repository, ServiceLocator};
use crate::db::Database;
use crate::domain::entities::messages::{pair_key, preview, Conversation};
use crate::errors::AppError;
use crate::repositories::is_duplicate_key;

const COLLECTION: &str = "conversations";

/// 대화방 리포지토리
///
/// `pair_key` 유니크 인덱스로 같은 두 사람의 대화방은 하나만 존재합니다.
pub struct ConversationRepository {
    db: Arc<Database>,
}

impl ConversationRepository {
    pub fn new() -> Self {
        Self {
            db: ServiceLocator::get::<Database>(),
        }
    }

    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    fn collection(&self) -> Collection<Conversation> {
        self.db.collection::<Conversation>(COLLECTION)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Conversation>, AppError> {
        Ok(self.collection().find_one(doc! { "_id": id }).await?)
    }

    /// 정렬된 참여자 쌍과 정확히 일치하는 대화방
    pub async fn find_by_pair(&self, pair: &[ObjectId; 2]) -> Result<Option<Conversation>, AppError> {
        Ok(self
            .collection()
            .find_one(doc! { "pair_key": pair_key(pair) })
            .await?)
    }

    /// 대화방을 찾거나 새로 만듭니다.
    ///
    /// 동시에 생성이 겹쳐 유니크 인덱스에 걸리면 이미 만들어진 방을 다시 읽습니다.
    pub async fn find_or_create(&self, pair: [ObjectId; 2]) -> Result<Conversation, AppError> {
        if let Some(existing) = self.find_by_pair(&pair).await? {
            return Ok(existing);
        }

        let mut conversation = Conversation::new(pair);
        match self.collection().insert_one(&conversation).await {
            Ok(result) => {
                conversation.id = result.inserted_id.as_object_id();
                Ok(conversation)
            }
            Err(e) if is_duplicate_key(&e) => self
                .find_by_pair(&pair)
                .await?
                .ok_or_else(|| AppError::InternalError("Conversation vanished after conflict".to_string())),
            Err(e) => Err(AppError::DatabaseError(e.to_string())),
        }
    }

    /// 사용자가 참여한 대화방 (최근 활동순)
    pub async fn find_for_user(&self, user: &ObjectId) -> Result<Vec<Conversation>, AppError> {
        let conversations = self
            .collection()
            .find(doc! { "participants": user })
            .sort(doc! { "updated_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(conversations)
    }

    pub async fn touch_last_message(&self, id: &ObjectId, content: &str, at: DateTime) -> Result<(), AppError> {
        self.collection()
            .update_one(
                doc! { "_id": id },
                doc! { "$set": {
                    "last_message": preview(content),
                    "last_message_at": at,
                    "updated_at": at,
                } },
            )
            .await?;
        Ok(())
    }

    /// 사용자가 참여한 대화방을 모두 지우고 그 id를 돌려줍니다.
    pub async fn delete_for_user(&self, user: &ObjectId) -> Result<Vec<ObjectId>, AppError> {
        let ids: Vec<ObjectId> = self
            .find_for_user(user)
            .await?
            .into_iter()
            .filter_map(|c| c.id)
            .collect();

        if !ids.is_empty() {
            self.collection().delete_many(doc! { "_id": { "$in": &ids } }).await?;
        }
        Ok(ids)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let pair_index = IndexModel::builder()
            .keys(doc! { "pair_key": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("pair_key_unique".to_string())
                .build())
            .build();

        let participants_index = IndexModel::builder()
            .keys(doc! { "participants": 1 })
            .options(IndexOptions::builder().name("participants".to_string()).build())
            .build();

        let updated_index = IndexModel::builder()
            .keys(doc! { "updated_at": -1 })
            .options(IndexOptions::builder().name("updated_at_desc".to_string()).build())
            .build();

        self.collection().create_indexes([pair_index, participants_index, updated_index]).await?;
        Ok(())
    }
}

#[async_trait]
impl Repository for ConversationRepository {
    fn name(&self) -> &str {
        "ConversationRepository"
    }

    fn collection_name(&self) -> &str {
        COLLECTION
    }

    async fn init(&self) -> Result<(), AppError> {
        self.create_indexes().await
    }
}
