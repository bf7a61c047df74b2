//! 리뷰 리포지토리
//!
//! (작성자, 대상자, 작업) 조합의 유니크 인덱스로 중복 리뷰를 막습니다.

use std::sync::Arc;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    options::IndexOptions,
    Collection, IndexModel,
};
use crate::core::registry::{Repository, ServiceLocator};
use crate::db::Database;
use crate::domain::entities::reviews::Review;
use crate::errors::AppError;
use crate::repositories::is_duplicate_key;

const COLLECTION: &str = "reviews";

/// 중복 검사용 필터. 작업이 없는 리뷰는 `job: null`로 묶입니다.
pub fn review_key_filter(reviewer: &ObjectId, reviewee: &ObjectId, job: Option<&ObjectId>) -> Document {
    let job = job.map(|id| Bson::ObjectId(*id)).unwrap_or(Bson::Null);
    doc! { "reviewer": reviewer, "reviewee": reviewee, "job": job }
}

pub struct ReviewRepository {
    db: Arc<Database>,
}

impl ReviewRepository {
    pub fn new() -> Self {
        Self {
            db: ServiceLocator::get::<Database>(),
        }
    }

    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    fn collection(&self) -> Collection<Review> {
        self.db.collection::<Review>(COLLECTION)
    }

    pub async fn insert(&self, mut review: Review) -> Result<Review, AppError> {
        let result = self.collection().insert_one(&review).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::ValidationError("You have already reviewed this user for this job".to_string())
            } else {
                AppError::DatabaseError(e.to_string())
            }
        })?;

        review.id = result.inserted_id.as_object_id();
        Ok(review)
    }

    pub async fn exists(&self, reviewer: &ObjectId, reviewee: &ObjectId, job: Option<&ObjectId>) -> Result<bool, AppError> {
        let count = self
            .collection()
            .count_documents(review_key_filter(reviewer, reviewee, job))
            .await?;
        Ok(count > 0)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Review>, AppError> {
        Ok(self.collection().find_one(doc! { "_id": id }).await?)
    }

    pub async fn save(&self, review: &Review) -> Result<(), AppError> {
        let id = review
            .id
            .ok_or_else(|| AppError::InternalError("Cannot save a review without an id".to_string()))?;
        self.collection().replace_one(doc! { "_id": id }, review).await?;
        Ok(())
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection().delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    /// 사용자가 받은 리뷰 (최신순)
    pub async fn find_by_reviewee(&self, reviewee: &ObjectId) -> Result<Vec<Review>, AppError> {
        let reviews = self
            .collection()
            .find(doc! { "reviewee": reviewee })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(reviews)
    }

    /// 평점 재계산용 점수 목록
    pub async fn ratings_for(&self, reviewee: &ObjectId) -> Result<Vec<i32>, AppError> {
        let reviews = self.find_by_reviewee(reviewee).await?;
        Ok(reviews.into_iter().map(|r| r.rating).collect())
    }

    /// 사용자가 작성하거나 받은 리뷰를 모두 지우고, 영향을 받은 대상자 목록을 돌려줍니다.
    pub async fn delete_involving(&self, user: &ObjectId) -> Result<Vec<ObjectId>, AppError> {
        let filter = doc! { "$or": [{ "reviewer": user }, { "reviewee": user }] };
        let affected: Vec<Review> = self.collection().find(filter.clone()).await?.try_collect().await?;
        self.collection().delete_many(filter).await?;

        let mut reviewees: Vec<ObjectId> = affected
            .into_iter()
            .map(|r| r.reviewee)
            .filter(|reviewee| reviewee != user)
            .collect();
        reviewees.sort_by_key(|id| id.bytes());
        reviewees.dedup();
        Ok(reviewees)
    }

    pub async fn count(&self) -> Result<u64, AppError> {
        Ok(self.collection().count_documents(doc! {}).await?)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let unique_index = IndexModel::builder()
            .keys(doc! { "reviewer": 1, "reviewee": 1, "job": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("reviewer_reviewee_job_unique".to_string())
                .build())
            .build();

        let reviewee_index = IndexModel::builder()
            .keys(doc! { "reviewee": 1, "created_at": -1 })
            .options(IndexOptions::builder().name("reviewee_created_at".to_string()).build())
            .build();

        self.collection().create_indexes([unique_index, reviewee_index]).await?;
        Ok(())
    }
}

#[async_trait]
impl Repository for ReviewRepository {
    fn name(&self) -> &str {
        "ReviewRepository"
    }

    fn collection_name(&self) -> &str {
        COLLECTION
    }

    async fn init(&self) -> Result<(), AppError> {
        self.create_indexes().await
    }
}
