//! 사용자 응답 DTO
//!
//! 비밀번호 해시는 어떤 응답에도 포함되지 않습니다.
use serde::Serialize;
use crate::domain::dto::common::{format_datetime, format_optional_datetime, hex_id};
use crate::domain::entities::common::Coordinates;
use crate::domain::entities::users::{NotificationPreferences, PrivacySettings, User, UserRole};

/// 본인 및 관리자에게 보여주는 전체 사용자 정보
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub role: UserRole,
    pub name: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub address: Option<String>,
    pub location: Option<Coordinates>,
    pub specialties: Vec<String>,
    pub hourly_rate: Option<f64>,
    pub rating: f64,
    pub review_count: i64,
    pub notification_preferences: NotificationPreferences,
    pub privacy_settings: PrivacySettings,
    pub is_banned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ban_reason: Option<String>,
    pub is_suspended: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspension_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspended_until: Option<String>,
    pub last_login_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: hex_id(&user.id),
            location: user.location.as_ref().map(Coordinates::from),
            suspended_until: format_optional_datetime(&user.suspended_until),
            last_login_at: format_optional_datetime(&user.last_login_at),
            created_at: format_datetime(&user.created_at),
            updated_at: format_datetime(&user.updated_at),
            email: user.email,
            role: user.role,
            name: user.name,
            phone: user.phone,
            bio: user.bio,
            avatar_url: user.avatar_url,
            address: user.address,
            specialties: user.specialties,
            hourly_rate: user.hourly_rate,
            rating: user.rating,
            review_count: user.review_count,
            notification_preferences: user.notification_preferences,
            privacy_settings: user.privacy_settings,
            is_banned: user.is_banned,
            ban_reason: user.ban_reason,
            is_suspended: user.is_suspended,
            suspension_reason: user.suspension_reason,
        }
    }
}

/// 다른 사용자에게 보여주는 공개 프로필
///
/// `privacy_settings`에 따라 연락처와 위치가 가려집니다.
#[derive(Debug, Clone, Serialize)]
pub struct PublicProfileResponse {
    pub id: String,
    pub role: UserRole,
    pub name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub specialties: Vec<String>,
    pub hourly_rate: Option<f64>,
    pub rating: f64,
    pub review_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    pub created_at: String,
}

impl From<User> for PublicProfileResponse {
    fn from(user: User) -> Self {
        let privacy = &user.privacy_settings;
        let show_location = privacy.show_location;

        Self {
            id: hex_id(&user.id),
            email: privacy.show_email.then(|| user.email.clone()),
            phone: if privacy.show_phone { user.phone.clone() } else { None },
            address: if show_location { user.address.clone() } else { None },
            location: if show_location {
                user.location.as_ref().map(Coordinates::from)
            } else {
                None
            },
            distance_km: None,
            created_at: format_datetime(&user.created_at),
            role: user.role,
            name: user.name,
            bio: user.bio,
            avatar_url: user.avatar_url,
            specialties: user.specialties,
            hourly_rate: user.hourly_rate,
            rating: user.rating,
            review_count: user.review_count,
        }
    }
}

impl PublicProfileResponse {
    pub fn with_distance(mut self, distance_km: Option<f64>) -> Self {
        self.distance_km = distance_km.map(|d| (d * 10.0).round() / 10.0);
        self
    }
}

/// 가입/로그인/갱신 응답
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl AuthResponse {
    pub fn new(user: User, token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            user: UserResponse::from(user),
            token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::common::GeoPoint;
    use mongodb::bson::oid::ObjectId;

    fn provider() -> User {
        let mut user = User::new(
            "choi@example.com".to_string(),
            "$2b$hash".to_string(),
            UserRole::Provider,
            "Choi".to_string(),
        );
        user.id = Some(ObjectId::new());
        user.phone = Some("010-1234-5678".to_string());
        user.location = Some(GeoPoint::new(37.5, 127.0).unwrap());
        user
    }

    #[test]
    fn test_user_response_hides_password_hash() {
        let json = serde_json::to_value(UserResponse::from(provider())).unwrap();

        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "provider");
        assert_eq!(json["location"]["lat"], 37.5);
    }

    #[test]
    fn test_public_profile_respects_privacy() {
        let profile = PublicProfileResponse::from(provider());

        assert!(profile.email.is_none());
        assert!(profile.phone.is_none());
        assert!(profile.location.is_some());

        let mut user = provider();
        user.privacy_settings.show_phone = true;
        user.privacy_settings.show_location = false;
        let profile = PublicProfileResponse::from(user);

        assert_eq!(profile.phone.as_deref(), Some("010-1234-5678"));
        assert!(profile.location.is_none());
    }
}
