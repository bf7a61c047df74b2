//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//! MongoDB를 주 저장소로 사용하고, Redis를 통한 캐싱을 지원합니다.
//!
//! ## 캐싱 전략
//!
//! - **키 패턴**: `user:{user_id}`
//! - **TTL**: `RedisConfig::user_cache_ttl_seconds()` (기본 10분)
//! - 모든 쓰기 연산 직후 해당 키를 지웁니다.
//! - Redis 오류는 조회를 막지 않습니다. 캐시를 건너뛰고 MongoDB에서 읽습니다.
//!
//! ## 인덱스
//!
//! - `email` 유니크
//! - `role` + `rating` (제공자 검색 정렬)
//! - `location` 2dsphere (반경 검색)

use std::sync::Arc;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use crate::caching::redis::RedisClient;
use crate::config::RedisConfig;
use crate::core::registry::{Repository, ServiceLocator};
use crate::db::Database;
use crate::domain::dto::common::PageQuery;
use crate::domain::entities::common::GeoPoint;
use crate::domain::entities::users::{User, UserRole};
use crate::errors::AppError;
use crate::repositories::is_duplicate_key;
use crate::utils::geo::km_to_radians;
use crate::utils::string_utils::escape_regex;

const COLLECTION: &str = "users";

/// 제공자 검색 조건
#[derive(Debug, Clone, Default)]
pub struct ProviderSearch {
    pub specialty: Option<String>,
    /// 중심점과 반경(km)
    pub near: Option<(GeoPoint, f64)>,
    pub min_rating: Option<f64>,
}

impl ProviderSearch {
    /// MongoDB 필터 문서로 변환합니다. 차단된 제공자는 제외됩니다.
    pub fn to_filter(&self) -> Document {
        let mut filter = doc! {
            "role": UserRole::Provider.as_str(),
            "is_banned": { "$ne": true },
        };

        if let Some(specialty) = self.specialty.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            filter.insert(
                "specialties",
                doc! { "$regex": escape_regex(specialty), "$options": "i" },
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

        if let Some(min_rating) = self.min_rating {
            filter.insert("rating", doc! { "$gte": min_rating });
        }

        filter
    }
}

/// 관리자 사용자 목록 필터
pub fn admin_user_filter(role: Option<UserRole>, search: Option<&str>) -> Document {
    let mut filter = Document::new();

    if let Some(role) = role {
        filter.insert("role", role.as_str());
    }

    if let Some(search) = search.map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = escape_regex(search);
        filter.insert(
            "$or",
            vec![
                doc! { "name": { "$regex": &pattern, "$options": "i" } },
                doc! { "email": { "$regex": &pattern, "$options": "i" } },
            ],
        );
    }

    filter
}

/// 사용자 데이터 액세스 리포지토리
pub struct UserRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,

    /// Redis 캐시 클라이언트
    redis: Arc<RedisClient>,
}

impl UserRepository {
    pub fn new() -> Self {
        Self {
            db: ServiceLocator::get::<Database>(),
            redis: ServiceLocator::get::<RedisClient>(),
        }
    }

    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    fn collection(&self) -> Collection<User> {
        self.db.collection::<User>(COLLECTION)
    }

    fn cache_key(id: &ObjectId) -> String {
        format!("user:{}", id.to_hex())
    }

    async fn invalidate_cache(&self, id: &ObjectId) {
        if let Err(e) = self.redis.del(&Self::cache_key(id)).await {
            log::warn!("사용자 캐시 삭제 실패 - {}: {}", id, e);
        }
    }

    /// 이메일 주소로 사용자 조회 (소문자로 정규화해 비교)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.collection()
            .find_one(doc! { "email": email.trim().to_lowercase() })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// ID로 사용자 조회
    ///
    /// 가장 빈번한 조회 패턴이므로 캐시를 먼저 확인합니다.
    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        let cache_key = Self::cache_key(id);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self
            .collection()
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            let _ = self
                .redis
                .set_with_expiry(&cache_key, user, RedisConfig::user_cache_ttl_seconds())
                .await;
        }

        Ok(user)
    }

    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<User>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self
            .collection()
            .find(doc! { "_id": { "$in": ids } })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 새 사용자 생성
    ///
    /// 이메일 유니크 인덱스 위반은 400으로 변환됩니다.
    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        user.email = user.email.trim().to_lowercase();

        let result = self.collection().insert_one(&user).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::ValidationError("Email is already registered".to_string())
            } else {
                AppError::DatabaseError(e.to_string())
            }
        })?;

        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }

    /// `$set` 문서로 부분 수정하고 수정된 문서를 반환합니다.
    pub async fn update_fields(&self, id: &ObjectId, mut fields: Document) -> Result<Option<User>, AppError> {
        fields.insert("updated_at", mongodb::bson::DateTime::now());

        let updated = self
            .collection()
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": fields })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        self.invalidate_cache(id).await;
        Ok(updated)
    }

    /// `$set`과 `$unset`을 함께 적용합니다. 정지/차단 해제에 사용합니다.
    pub async fn update_and_unset(
        &self,
        id: &ObjectId,
        mut set: Document,
        unset: &[&str],
    ) -> Result<Option<User>, AppError> {
        set.insert("updated_at", mongodb::bson::DateTime::now());

        let mut unset_doc = Document::new();
        for field in unset {
            unset_doc.insert(*field, "");
        }

        let mut update = doc! { "$set": set };
        if !unset_doc.is_empty() {
            update.insert("$unset", unset_doc);
        }

        let updated = self
            .collection()
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        self.invalidate_cache(id).await;
        Ok(updated)
    }

    /// 리뷰 집계 필드 갱신
    pub async fn update_rating(&self, id: &ObjectId, rating: f64, review_count: i64) -> Result<(), AppError> {
        self.update_fields(id, doc! { "rating": rating, "review_count": review_count })
            .await
            .map(|_| ())
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        self.invalidate_cache(id).await;
        Ok(result.deleted_count > 0)
    }

    /// 제공자 검색 (평점 내림차순)
    pub async fn search_providers(
        &self,
        search: &ProviderSearch,
        page: &PageQuery,
    ) -> Result<(Vec<User>, u64), AppError> {
        self.find_page(search.to_filter(), doc! { "rating": -1, "review_count": -1 }, page)
            .await
    }

    /// 관리자 사용자 목록 (최신 가입순)
    pub async fn list(&self, filter: Document, page: &PageQuery) -> Result<(Vec<User>, u64), AppError> {
        self.find_page(filter, doc! { "created_at": -1 }, page).await
    }

    async fn find_page(
        &self,
        filter: Document,
        sort: Document,
        page: &PageQuery,
    ) -> Result<(Vec<User>, u64), AppError> {
        let total = self
            .collection()
            .count_documents(filter.clone())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let users = self
            .collection()
            .find(filter)
            .sort(sort)
            .skip(page.skip())
            .limit(page.limit())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok((users, total))
    }

    pub async fn count(&self, filter: Document) -> Result<u64, AppError> {
        self.collection()
            .count_documents(filter)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let role_rating_index = IndexModel::builder()
            .keys(doc! { "role": 1, "rating": -1 })
            .options(IndexOptions::builder()
                .name("role_rating".to_string())
                .build())
            .build();

        let location_index = IndexModel::builder()
            .keys(doc! { "location": "2dsphere" })
            .options(IndexOptions::builder()
                .name("location_2dsphere".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([email_index, role_rating_index, location_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl Repository for UserRepository {
    fn name(&self) -> &str {
        "UserRepository"
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
    use crate::utils::geo::EARTH_RADIUS_KM;

    #[test]
    fn test_provider_filter_defaults() {
        let filter = ProviderSearch::default().to_filter();

        assert_eq!(filter.get_str("role").unwrap(), "provider");
        assert!(filter.get_document("is_banned").is_ok());
        assert!(!filter.contains_key("location"));
        assert!(!filter.contains_key("rating"));
    }

    #[test]
    fn test_provider_filter_with_all_conditions() {
        let search = ProviderSearch {
            specialty: Some("c++".to_string()),
            near: Some((GeoPoint::new(37.5, 127.0).unwrap(), EARTH_RADIUS_KM)),
            min_rating: Some(4.0),
        };
        let filter = search.to_filter();

        let specialty = filter.get_document("specialties").unwrap();
        assert_eq!(specialty.get_str("$regex").unwrap(), r"c\+\+");

        let sphere = filter
            .get_document("location").unwrap()
            .get_document("$geoWithin").unwrap()
            .get_array("$centerSphere").unwrap();
        assert_eq!(sphere[1].as_f64().unwrap(), 1.0);
        let center = sphere[0].as_array().unwrap();
        assert_eq!(center[0].as_f64().unwrap(), 127.0);

        assert_eq!(filter.get_document("rating").unwrap().get_f64("$gte").unwrap(), 4.0);
    }

    #[test]
    fn test_blank_specialty_ignored() {
        let search = ProviderSearch {
            specialty: Some("  ".to_string()),
            ..Default::default()
        };

        assert!(!search.to_filter().contains_key("specialties"));
    }

    #[test]
    fn test_admin_user_filter() {
        assert!(admin_user_filter(None, None).is_empty());

        let filter = admin_user_filter(Some(UserRole::Seeker), Some("kim"));
        assert_eq!(filter.get_str("role").unwrap(), "seeker");
        assert_eq!(filter.get_array("$or").unwrap().len(), 2);
    }
}
