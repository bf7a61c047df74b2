//! 인증 요청관련 DTO
//!
//! 회원가입, 로그인, 토큰 갱신 요청 정보를 매핑합니다.
use serde::Deserialize;
use validator::{Validate, ValidationError};
use crate::domain::entities::common::Coordinates;

/// 회원가입 요청 구조체
///
/// 관리자 계정은 가입으로 만들 수 없으므로 `role`은 `seeker`/`provider`만 허용합니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "A valid email address is required"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(custom(function = "validate_register_role"))]
    pub role: String,

    #[validate(length(max = 30))]
    pub phone: Option<String>,

    pub specialties: Option<Vec<String>>,

    pub location: Option<Coordinates>,

    #[validate(length(max = 300))]
    pub address: Option<String>,
}

fn validate_register_role(role: &str) -> Result<(), ValidationError> {
    match role {
        "seeker" | "provider" => Ok(()),
        _ => Err(ValidationError::new("invalid_role")
            .with_message("Role must be either seeker or provider".into())),
    }
}

/// 로컬 로그인 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// 리프레시 토큰 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn register(role: &str, password: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Park".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: role.to_string(),
            phone: None,
            specialties: None,
            location: None,
            address: None,
        }
    }

    #[rstest]
    #[case("seeker", "secret1", "park@example.com", true)]
    #[case("provider", "secret1", "park@example.com", true)]
    #[case("admin", "secret1", "park@example.com", false)]
    #[case("seeker", "short", "park@example.com", false)]
    #[case("seeker", "secret1", "not-an-email", false)]
    fn test_register_validation(
        #[case] role: &str,
        #[case] password: &str,
        #[case] email: &str,
        #[case] valid: bool,
    ) {
        assert_eq!(register(role, password, email).validate().is_ok(), valid);
    }

    #[test]
    fn test_register_accepts_location() {
        let body = serde_json::json!({
            "name": "Park",
            "email": "park@example.com",
            "password": "secret1",
            "role": "provider",
            "specialties": ["plumbing"],
            "location": {"lat": 37.5, "lng": 127.0}
        });
        let request: RegisterRequest = serde_json::from_value(body).unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(request.location.unwrap().lat, 37.5);
    }
}
