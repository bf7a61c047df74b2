//! # 사용자 서비스 구현
//!
//! 프로필 조회/수정, 알림/공개 설정, 비밀번호 변경, 제공자 검색, 계정 삭제를 담당합니다.
//!
//! ## 계정 삭제
//!
//! 사용자가 작성한 작업, 주고받은 리뷰, 대화방과 메시지, 문의, 리프레시 토큰을
//! 함께 지웁니다. 리뷰가 지워진 상대방의 평점은 다시 계산됩니다.
//! 다른 사람의 작업에 남은 지원 기록은 스냅샷이므로 그대로 둡니다.

use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId, to_bson, Document};
use validator::Validate;
use crate::config::PasswordConfig;
use crate::core::registry::{Service, ServiceLocator};
use crate::domain::dto::common::{PageQuery, PageResponse};
use crate::domain::dto::users::{
    ChangePasswordRequest, ProviderSearchQuery, PublicProfileResponse, UpdateProfileRequest,
    UpdateSettingsRequest, UserResponse,
};
use crate::domain::entities::common::GeoPoint;
use crate::domain::entities::users::User;
use crate::domain::models::events::RealtimeEvent;
use crate::errors::{AppError, ErrorContext};
use crate::repositories::{
    jobs::JobRepository,
    messages::{ConversationRepository, MessageRepository},
    reviews::ReviewRepository,
    tickets::TicketRepository,
    tokens::TokenRepository,
    users::{ProviderSearch, UserRepository},
};
use crate::services::realtime::EventHub;
use crate::services::reviews::recompute_rating;
use crate::utils::geo::{distance_km, search_area};
use crate::utils::string_utils::clean_optional_string;

pub struct UserService {
    user_repo: Arc<UserRepository>,
    job_repo: Arc<JobRepository>,
    review_repo: Arc<ReviewRepository>,
    conversation_repo: Arc<ConversationRepository>,
    message_repo: Arc<MessageRepository>,
    ticket_repo: Arc<TicketRepository>,
    token_repo: Arc<TokenRepository>,
    hub: Arc<EventHub>,
}

fn bson_value<T: serde::Serialize>(value: &T) -> Result<mongodb::bson::Bson, AppError> {
    to_bson(value).context("BSON 변환 실패")
}

/// 프로필 수정 내용. 빈 문자열로 보낸 선택 필드는 `unset`으로 지웁니다.
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub set: Document,
    pub unset: Vec<&'static str>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.unset.is_empty()
    }

    fn text(&mut self, field: &'static str, value: Option<String>) {
        if value.is_none() {
            return;
        }
        match clean_optional_string(value) {
            Some(text) => {
                self.set.insert(field, text);
            }
            None => self.unset.push(field),
        }
    }
}

/// 프로필 수정 요청을 `$set`/`$unset` 대상으로 변환합니다.
pub fn profile_update_document(request: UpdateProfileRequest) -> Result<ProfileUpdate, AppError> {
    let mut update = ProfileUpdate::default();

    if let Some(name) = clean_optional_string(request.name) {
        update.set.insert("name", name);
    }
    update.text("phone", request.phone);
    update.text("bio", request.bio);
    if let Some(avatar_url) = request.avatar_url {
        update.set.insert("avatar_url", avatar_url);
    }
    update.text("address", request.address);
    if let Some(location) = request.location {
        update.set.insert("location", bson_value(&GeoPoint::try_from(location)?)?);
    }
    if let Some(specialties) = request.specialties {
        let cleaned: Vec<String> = specialties
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        update.set.insert("specialties", cleaned);
    }
    if let Some(hourly_rate) = request.hourly_rate {
        update.set.insert("hourly_rate", hourly_rate);
    }

    Ok(update)
}

impl UserService {
    pub fn new() -> Self {
        Self {
            user_repo: ServiceLocator::get::<UserRepository>(),
            job_repo: ServiceLocator::get::<JobRepository>(),
            review_repo: ServiceLocator::get::<ReviewRepository>(),
            conversation_repo: ServiceLocator::get::<ConversationRepository>(),
            message_repo: ServiceLocator::get::<MessageRepository>(),
            ticket_repo: ServiceLocator::get::<TicketRepository>(),
            token_repo: ServiceLocator::get::<TokenRepository>(),
            hub: ServiceLocator::get::<EventHub>(),
        }
    }

    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    pub fn hash_password(password: &str) -> Result<String, AppError> {
        let started = std::time::Instant::now();
        let hashed = bcrypt::hash(password, PasswordConfig::bcrypt_cost())
            .context("비밀번호 해싱 실패")?;
        log::debug!("Password hashing took: {:?}", started.elapsed());
        Ok(hashed)
    }

    pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
        bcrypt::verify(password, password_hash)
            .context("비밀번호 검증 실패")
    }

    pub async fn get_user(&self, id: &ObjectId) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn get_me(&self, id: &ObjectId) -> Result<UserResponse, AppError> {
        Ok(UserResponse::from(self.get_user(id).await?))
    }

    pub async fn public_profile(&self, id: &ObjectId) -> Result<PublicProfileResponse, AppError> {
        Ok(PublicProfileResponse::from(self.get_user(id).await?))
    }

    pub async fn search_providers(
        &self,
        query: ProviderSearchQuery,
    ) -> Result<PageResponse<PublicProfileResponse>, AppError> {
        let near = search_area(query.lat, query.lng, query.radius_km)?;
        let page = PageQuery::new(query.page, query.limit);
        let search = ProviderSearch {
            specialty: query.specialty,
            near: near.clone(),
            min_rating: query.min_rating,
        };

        let (providers, total) = self.user_repo.search_providers(&search, &page).await?;

        let items = providers
            .into_iter()
            .map(|user| {
                let distance = match (&near, &user.location) {
                    (Some((center, _)), Some(location)) => Some(distance_km(
                        center.lat(),
                        center.lng(),
                        location.lat(),
                        location.lng(),
                    )),
                    _ => None,
                };
                PublicProfileResponse::from(user).with_distance(distance)
            })
            .collect();

        Ok(PageResponse::new(items, total, &page))
    }

    pub async fn update_profile(&self, id: &ObjectId, request: UpdateProfileRequest) -> Result<UserResponse, AppError> {
        request.validate()?;

        let update = profile_update_document(request)?;
        if update.is_empty() {
            return self.get_me(id).await;
        }

        let user = self
            .user_repo
            .update_and_unset(id, update.set, &update.unset)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        log::info!("프로필 수정 - user_id: {}", id);
        Ok(UserResponse::from(user))
    }

    pub async fn update_settings(&self, id: &ObjectId, request: UpdateSettingsRequest) -> Result<UserResponse, AppError> {
        let mut set = Document::new();
        if let Some(preferences) = &request.notification_preferences {
            set.insert("notification_preferences", bson_value(preferences)?);
        }
        if let Some(privacy) = &request.privacy_settings {
            set.insert("privacy_settings", bson_value(privacy)?);
        }

        if set.is_empty() {
            return Err(AppError::ValidationError("No settings to update".to_string()));
        }

        let user = self
            .user_repo
            .update_fields(id, set)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(UserResponse::from(user))
    }

    /// 비밀번호를 바꾸면 기존 리프레시 토큰은 폐기됩니다.
    pub async fn change_password(&self, id: &ObjectId, request: ChangePasswordRequest) -> Result<(), AppError> {
        request.validate()?;

        let user = self.get_user(id).await?;
        if !Self::verify_password(&request.current_password, &user.password_hash)? {
            return Err(AppError::AuthenticationError("Current password is incorrect".to_string()));
        }

        let password_hash = Self::hash_password(&request.new_password)?;
        self.user_repo
            .update_fields(id, doc! { "password_hash": password_hash })
            .await?;
        self.token_repo.delete_refresh_token(&id.to_hex()).await?;

        log::info!("비밀번호 변경 - user_id: {}", id);
        Ok(())
    }

    /// 계정과 연관 데이터를 삭제합니다. 본인 탈퇴와 관리자 삭제가 함께 사용합니다.
    pub async fn delete_account(&self, id: &ObjectId) -> Result<(), AppError> {
        if !self.user_repo.delete(id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        for job in self.job_repo.find_by_seeker(id).await? {
            if let Some(job_id) = job.id {
                self.job_repo.delete(&job_id).await?;
                self.hub.publish(RealtimeEvent::JobDeleted { job_id: job_id.to_hex() });
            }
        }

        for reviewee in self.review_repo.delete_involving(id).await? {
            recompute_rating(&self.user_repo, &self.review_repo, &reviewee).await?;
        }

        let conversations = self.conversation_repo.delete_for_user(id).await?;
        self.message_repo.delete_by_conversations(&conversations).await?;
        self.ticket_repo.delete_by_user(id).await?;
        self.token_repo.delete_refresh_token(&id.to_hex()).await?;

        log::info!("계정 삭제 완료 - user_id: {}", id);
        Ok(())
    }
}

impl Service for UserService {
    fn name(&self) -> &str {
        "UserService"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::common::Coordinates;

    #[test]
    fn test_profile_update_document_only_sets_present_fields() {
        let request = UpdateProfileRequest {
            name: Some("  Yoon ".to_string()),
            specialties: Some(vec!["plumbing".to_string(), " ".to_string()]),
            location: Some(Coordinates { lat: 37.0, lng: 127.0 }),
            ..Default::default()
        };

        let update = profile_update_document(request).unwrap();
        let set = &update.set;

        assert_eq!(set.get_str("name").unwrap(), "Yoon");
        assert_eq!(set.get_array("specialties").unwrap().len(), 1);
        assert_eq!(set.get_document("location").unwrap().get_str("type").unwrap(), "Point");
        assert!(!set.contains_key("bio"));
        assert!(update.unset.is_empty());
    }

    #[test]
    fn test_blank_contact_fields_are_unset() {
        let request = UpdateProfileRequest {
            phone: Some("  ".to_string()),
            bio: Some("".to_string()),
            address: Some(" 12 Main St ".to_string()),
            ..Default::default()
        };

        let update = profile_update_document(request).unwrap();

        assert_eq!(update.unset, vec!["phone", "bio"]);
        assert_eq!(update.set.get_str("address").unwrap(), "12 Main St");
        assert!(!update.set.contains_key("phone"));
    }

    #[test]
    fn test_blank_name_is_ignored() {
        let request = UpdateProfileRequest {
            name: Some("   ".to_string()),
            ..Default::default()
        };

        assert!(profile_update_document(request).unwrap().is_empty());
    }

    #[test]
    fn test_password_hash_roundtrip() {
        let hashed = bcrypt::hash("secret1", 4).unwrap();

        assert!(UserService::verify_password("secret1", &hashed).unwrap());
        assert!(!UserService::verify_password("wrong", &hashed).unwrap());
    }
}
