//! # 작업 리포지토리 구현
//!
//! 작업 문서는 지원/직접 고용/신고 내역을 모두 포함한 하나의 문서입니다.
//! 상태 전이는 엔티티에서 계산하고 여기서는 문서를 통째로 교체합니다.
//! 동시에 들어온 두 전이는 나중에 저장된 쪽이 남습니다.

use std::sync::Arc;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use crate::core::registry::{Repository, ServiceLocator};
use crate::db::Database;
use crate::domain::dto::common::PageQuery;
use crate::domain::entities::common::GeoPoint;
use crate::domain::entities::jobs::{Job, JobStatus};
use crate::errors::AppError;
use crate::utils::geo::km_to_radians;
use crate::utils::string_utils::escape_regex;

const COLLECTION: &str = "jobs";

/// 공개 작업 목록 조건
#[derive(Debug, Clone)]
pub struct JobListFilter {
    pub status: JobStatus,
    pub category: Option<String>,
    pub near: Option<(GeoPoint, f64)>,
}

impl JobListFilter {
    pub fn to_filter(&self) -> Document {
        let mut filter = doc! { "status": self.status.as_str() };

        if let Some(category) = self.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            filter.insert(
                "category",
                doc! { "$regex": format!("^{}$", escape_regex(category)), "$options": "i" },
            );
        }

        if let Some((center, radius_km)) = &self.near {
            filter.insert(
                "location",
                doc! {
                    "$geoWithin": {
                        "$centerSphere": [[center.lng(), center.lat()], km_to_radians(*radius_km)]
                    }
                },
            );
        }

        filter
    }
}

/// 제공자가 지원했거나 선정/직접 고용된 작업
pub fn provider_jobs_filter(provider: &ObjectId) -> Document {
    doc! {
        "$or": [
            { "applications.provider": provider },
            { "selected_provider": provider },
            { "direct_hire.provider": provider },
        ]
    }
}

pub fn reported_jobs_filter() -> Document {
    doc! { "reports.0": { "$exists": true } }
}

pub struct JobRepository {
    db: Arc<Database>,
}

impl JobRepository {
    pub fn new() -> Self {
        Self {
            db: ServiceLocator::get::<Database>(),
        }
    }

    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    fn collection(&self) -> Collection<Job> {
        self.db.collection::<Job>(COLLECTION)
    }

    pub async fn insert(&self, mut job: Job) -> Result<Job, AppError> {
        let result = self.collection().insert_one(&job).await?;
        job.id = result.inserted_id.as_object_id();
        Ok(job)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Job>, AppError> {
        Ok(self.collection().find_one(doc! { "_id": id }).await?)
    }

    /// 문서 전체를 교체합니다 (마지막 쓰기 우선).
    pub async fn save(&self, job: &Job) -> Result<(), AppError> {
        let id = job
            .id
            .ok_or_else(|| AppError::InternalError("Cannot save a job without an id".to_string()))?;

        let result = self.collection().replace_one(doc! { "_id": id }, job).await?;
        if result.matched_count == 0 {
            return Err(AppError::NotFound("Job not found".to_string()));
        }
        Ok(())
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection().delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn list(&self, filter: Document, page: &PageQuery) -> Result<(Vec<Job>, u64), AppError> {
        let total = self.collection().count_documents(filter.clone()).await?;

        let jobs = self
            .collection()
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .skip(page.skip())
            .limit(page.limit())
            .await?
            .try_collect()
            .await?;

        Ok((jobs, total))
    }

    /// 조건에 맞는 작업 전체 (최신순)
    pub async fn find_all(&self, filter: Document) -> Result<Vec<Job>, AppError> {
        let jobs = self
            .collection()
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;

        Ok(jobs)
    }

    pub async fn find_by_seeker(&self, seeker: &ObjectId) -> Result<Vec<Job>, AppError> {
        self.find_all(doc! { "seeker": seeker }).await
    }

    pub async fn find_by_provider(&self, provider: &ObjectId) -> Result<Vec<Job>, AppError> {
        self.find_all(provider_jobs_filter(provider)).await
    }

    pub async fn find_reported(&self) -> Result<Vec<Job>, AppError> {
        self.find_all(reported_jobs_filter()).await
    }

    /// 신고 내역을 비우고 수정된 문서를 반환합니다.
    pub async fn clear_reports(&self, id: &ObjectId) -> Result<Option<Job>, AppError> {
        let job = self
            .collection()
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": { "reports": [], "updated_at": DateTime::now() } },
            )
            .return_document(ReturnDocument::After)
            .await?;

        Ok(job)
    }

    pub async fn count(&self, filter: Document) -> Result<u64, AppError> {
        Ok(self.collection().count_documents(filter).await?)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let status_index = IndexModel::builder()
            .keys(doc! { "status": 1, "created_at": -1 })
            .options(IndexOptions::builder().name("status_created_at".to_string()).build())
            .build();

        let seeker_index = IndexModel::builder()
            .keys(doc! { "seeker": 1 })
            .options(IndexOptions::builder().name("seeker".to_string()).build())
            .build();

        let provider_index = IndexModel::builder()
            .keys(doc! { "applications.provider": 1 })
            .options(IndexOptions::builder().name("application_provider".to_string()).build())
            .build();

        let location_index = IndexModel::builder()
            .keys(doc! { "location": "2dsphere" })
            .options(IndexOptions::builder().name("location_2dsphere".to_string()).build())
            .build();

        self.collection()
            .create_indexes([status_index, seeker_index, provider_index, location_index])
            .await?;

        Ok(())
    }
}

#[async_trait]
impl Repository for JobRepository {
    fn name(&self) -> &str {
        "JobRepository"
    }

    fn collection_name(&self) -> &str {
        COLLECTION
    }

    async fn init(&self) -> Result<(), AppError> {
        self.create_indexes().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_filter_status_only() {
        let filter = JobListFilter {
            status: JobStatus::Open,
            category: None,
            near: None,
        }
        .to_filter();

        assert_eq!(filter, doc! { "status": "open" });
    }

    #[test]
    fn test_list_filter_category_is_exact_and_case_insensitive() {
        let filter = JobListFilter {
            status: JobStatus::InProgress,
            category: Some("Home Repair".to_string()),
            near: None,
        }
        .to_filter();

        assert_eq!(filter.get_str("status").unwrap(), "in-progress");
        let category = filter.get_document("category").unwrap();
        assert_eq!(category.get_str("$regex").unwrap(), "^Home Repair$");
        assert_eq!(category.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_list_filter_near() {
        let filter = JobListFilter {
            status: JobStatus::Open,
            category: None,
            near: Some((GeoPoint::new(10.0, 20.0).unwrap(), 5.0)),
        }
        .to_filter();

        assert!(filter.get_document("location").unwrap().contains_key("$geoWithin"));
    }

    #[test]
    fn test_provider_filter_covers_all_roles() {
        let provider = ObjectId::new();
        let filter = provider_jobs_filter(&provider);

        assert_eq!(filter.get_array("$or").unwrap().len(), 3);
    }
}
