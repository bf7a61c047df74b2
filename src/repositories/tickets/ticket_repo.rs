//! 문의(티켓) 리포지토리

use std::sync::Arc;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::IndexOptions,
    Collection, IndexModel,
};
use crate::core::registry::{Repository, ServiceLocator};
use crate::db::Database;
use crate::domain::dto::common::PageQuery;
use crate::domain::entities::tickets::{Ticket, TicketStatus};
use crate::errors::AppError;

const COLLECTION: &str = "tickets";

pub struct TicketRepository {
    db: Arc<Database>,
}

impl TicketRepository {
    pub fn new() -> Self {
        Self {
            db: ServiceLocator::get::<Database>(),
        }
    }

    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    fn collection(&self) -> Collection<Ticket> {
        self.db.collection::<Ticket>(COLLECTION)
    }

    pub async fn insert(&self, mut ticket: Ticket) -> Result<Ticket, AppError> {
        let result = self.collection().insert_one(&ticket).await?;
        ticket.id = result.inserted_id.as_object_id();
        Ok(ticket)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Ticket>, AppError> {
        Ok(self.collection().find_one(doc! { "_id": id }).await?)
    }

    pub async fn save(&self, ticket: &Ticket) -> Result<(), AppError> {
        let id = ticket
            .id
            .ok_or_else(|| AppError::InternalError("Cannot save a ticket without an id".to_string()))?;
        self.collection().replace_one(doc! { "_id": id }, ticket).await?;
        Ok(())
    }

    pub async fn find_by_user(&self, user: &ObjectId) -> Result<Vec<Ticket>, AppError> {
        let tickets = self
            .collection()
            .find(doc! { "user": user })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(tickets)
    }

    /// 관리자 목록 (최신순, 상태 필터 선택)
    pub async fn list(&self, status: Option<TicketStatus>, page: &PageQuery) -> Result<(Vec<Ticket>, u64), AppError> {
        let filter = match status {
            Some(status) => doc! { "status": status.as_str() },
            None => Document::new(),
        };

        let total = self.collection().count_documents(filter.clone()).await?;
        let tickets = self
            .collection()
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .skip(page.skip())
            .limit(page.limit())
            .await?
            .try_collect()
            .await?;

        Ok((tickets, total))
    }

    pub async fn count(&self, filter: Document) -> Result<u64, AppError> {
        Ok(self.collection().count_documents(filter).await?)
    }

    pub async fn delete_by_user(&self, user: &ObjectId) -> Result<u64, AppError> {
        let result = self.collection().delete_many(doc! { "user": user }).await?;
        Ok(result.deleted_count)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let user_index = IndexModel::builder()
            .keys(doc! { "user": 1, "created_at": -1 })
            .options(IndexOptions::builder().name("user_created_at".to_string()).build())
            .build();

        let status_index = IndexModel::builder()
            .keys(doc! { "status": 1 })
            .options(IndexOptions::builder().name("status".to_string()).build())
            .build();

        self.collection().create_indexes([user_index, status_index]).await?;
        Ok(())
    }
}

#[async_trait]
impl Repository for TicketRepository {
    fn name(&self) -> &str {
        "TicketRepository"
    }

    fn collection_name(&self) -> &str {
        COLLECTION
    }

    async fn init(&self) -> Result<(), AppError> {
        self.create_indexes().await
    }
}
