use serde::Deserialize;
use validator::{Validate, ValidationError};

/// 제재 사유는 공백을 제외하고 1~500자여야 합니다.
fn validate_reason(reason: &str) -> Result<(), ValidationError> {
    let length = reason.trim().chars().count();
    if (1..=500).contains(&length) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_reason").with_message("A reason is required".into()))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BanUserRequest {
    #[validate(custom(function = "validate_reason"))]
    pub reason: String,
}

/// 기간 정지 요청 (일 단위)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SuspendUserRequest {
    #[validate(custom(function = "validate_reason"))]
    pub reason: String,

    #[validate(range(min = 1, max = 365, message = "Suspension must last between 1 and 365 days"))]
    pub days: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminUserQuery {
    pub role: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(30, true)]
    #[case(366, false)]
    fn test_suspension_days(#[case] days: i64, #[case] valid: bool) {
        let request = SuspendUserRequest {
            reason: "abuse".to_string(),
            days,
        };

        assert_eq!(request.validate().is_ok(), valid);
    }

    #[rstest]
    #[case("spam", true)]
    #[case("  repeated no-shows  ", true)]
    #[case("", false)]
    #[case("   ", false)]
    #[case("\t\n", false)]
    fn test_moderation_reason(#[case] reason: &str, #[case] valid: bool) {
        let ban = BanUserRequest {
            reason: reason.to_string(),
        };
        let suspend = SuspendUserRequest {
            reason: reason.to_string(),
            days: 7,
        };

        assert_eq!(ban.validate().is_ok(), valid);
        assert_eq!(suspend.validate().is_ok(), valid);
    }
}
