//! 프로필/설정 변경 및 제공자 검색 요청 DTO
use serde::Deserialize;
use validator::Validate;
use crate::domain::entities::common::Coordinates;
use crate::domain::entities::users::{NotificationPreferences, PrivacySettings};

/// 프로필 수정 요청. 보내지 않은 필드는 유지됩니다.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Name cannot be empty"))]
    pub name: Option<String>,

    #[validate(length(max = 30))]
    pub phone: Option<String>,

    #[validate(length(max = 1000, message = "Bio must be at most 1000 characters"))]
    pub bio: Option<String>,

    #[validate(url(message = "Avatar must be a valid URL"))]
    pub avatar_url: Option<String>,

    #[validate(length(max = 300))]
    pub address: Option<String>,

    pub location: Option<Coordinates>,

    pub specialties: Option<Vec<String>>,

    #[validate(range(min = 0.0, message = "Hourly rate cannot be negative"))]
    pub hourly_rate: Option<f64>,
}

/// 알림/공개 설정 변경 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSettingsRequest {
    pub notification_preferences: Option<NotificationPreferences>,
    pub privacy_settings: Option<PrivacySettings>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
}

/// `GET /api/users/providers` 쿼리
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSearchQuery {
    pub specialty: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius_km: Option<f64>,
    pub min_rating: Option<f64>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_rejects_bad_avatar_and_negative_rate() {
        let request = UpdateProfileRequest {
            avatar_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_err());

        let request = UpdateProfileRequest {
            hourly_rate: Some(-1.0),
            ..Default::default()
        };
        assert!(request.validate().is_err());

        assert!(UpdateProfileRequest::default().validate().is_ok());
    }

    #[test]
    fn test_settings_accept_partial_body() {
        let body = serde_json::json!({
            "privacy_settings": {"show_phone": true, "show_email": false, "show_location": true}
        });
        let request: UpdateSettingsRequest = serde_json::from_value(body).unwrap();

        assert!(request.notification_preferences.is_none());
        assert!(request.privacy_settings.unwrap().show_phone);
    }
}
