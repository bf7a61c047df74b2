//! User Entity Implementation
//!
//! 마켓플레이스 사용자 문서입니다. 하나의 컬렉션에 구직자(seeker),
//! 서비스 제공자(provider), 관리자(admin)가 함께 저장되며 `role`로 구분됩니다.
//!
//! 평점(`rating`, `review_count`)은 리뷰가 생성/수정/삭제될 때마다
//! 리뷰 서비스가 다시 계산해 덮어쓰는 집계 필드입니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::entities::common::GeoPoint;
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Seeker,
    Provider,
    Admin,
}

impl UserRole {
    pub fn from_str(s: &str) -> Result<Self, AppError> {
        match s.trim().to_lowercase().as_str() {
            "seeker" => Ok(UserRole::Seeker),
            "provider" => Ok(UserRole::Provider),
            "admin" => Ok(UserRole::Admin),
            _ => Err(AppError::ValidationError(format!("Unsupported role: {}", s))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Seeker => "seeker",
            UserRole::Provider => "provider",
            UserRole::Admin => "admin",
        }
    }
}

/// 알림 수신 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    pub email: bool,
    pub push: bool,
    pub job_alerts: bool,
    pub messages: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email: true,
            push: true,
            job_alerts: true,
            messages: true,
        }
    }
}

/// 공개 프로필 노출 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivacySettings {
    pub show_phone: bool,
    pub show_email: bool,
    pub show_location: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            show_phone: false,
            show_email: false,
            show_location: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: i64,
    #[serde(default)]
    pub notification_preferences: NotificationPreferences,
    #[serde(default)]
    pub privacy_settings: PrivacySettings,
    #[serde(default)]
    pub is_banned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ban_reason: Option<String>,
    #[serde(default)]
    pub is_suspended: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspension_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspended_until: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// 로그인 시점의 계정 접근 판정
#[derive(Debug, Clone, PartialEq)]
pub enum AccessDecision {
    Allowed,
    /// 정지 기간이 지났으므로 정지를 해제하고 허용
    SuspensionExpired,
    Denied(String),
}

impl User {
    pub fn new(email: String, password_hash: String, role: UserRole, name: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email,
            password_hash,
            role,
            name,
            phone: None,
            bio: None,
            avatar_url: None,
            address: None,
            location: None,
            specialties: Vec::new(),
            hourly_rate: None,
            rating: 0.0,
            review_count: 0,
            notification_preferences: NotificationPreferences::default(),
            privacy_settings: PrivacySettings::default(),
            is_banned: false,
            ban_reason: None,
            is_suspended: false,
            suspension_reason: None,
            suspended_until: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn is_provider(&self) -> bool {
        self.role == UserRole::Provider
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// 차단/정지 상태를 기준으로 인증 허용 여부를 판정합니다.
    ///
    /// `suspended_until`이 비어 있는 정지 문서는 기한을 알 수 없으므로 계속 거부합니다.
    pub fn access_decision(&self, now: DateTime) -> AccessDecision {
        if self.is_banned {
            let reason = self.ban_reason.clone().unwrap_or_else(|| "No reason given".to_string());
            return AccessDecision::Denied(format!("Account is banned: {}", reason));
        }

        if self.is_suspended {
            match self.suspended_until {
                Some(until) if until <= now => return AccessDecision::SuspensionExpired,
                _ => {
                    let reason = self
                        .suspension_reason
                        .clone()
                        .unwrap_or_else(|| "No reason given".to_string());
                    return AccessDecision::Denied(format!("Account is suspended: {}", reason));
                }
            }
        }

        AccessDecision::Allowed
    }
}
