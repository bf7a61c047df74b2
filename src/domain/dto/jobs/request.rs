//! 작업 요청 DTO
use serde::Deserialize;
use validator::Validate;
use crate::domain::entities::common::Coordinates;
use crate::utils::string_utils::deserialize_optional_string;

/// 작업 등록 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJobRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, max = 5000, message = "Description is required"))]
    pub description: String,

    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category: String,

    #[validate(range(exclusive_min = 0.0, message = "Budget must be greater than zero"))]
    pub budget: f64,

    pub location: Option<Coordinates>,

    #[validate(length(max = 300))]
    pub address: Option<String>,
}

/// 특정 제공자를 지정한 작업 등록 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DirectHireJobRequest {
    #[validate(length(min = 1, message = "Provider id is required"))]
    pub provider_id: String,

    #[serde(flatten)]
    #[validate(nested)]
    pub job: CreateJobRequest,
}

/// 작업 수정 요청. 보내지 않은 필드는 유지됩니다.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateJobRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 5000))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,

    #[validate(range(exclusive_min = 0.0, message = "Budget must be greater than zero"))]
    pub budget: Option<f64>,

    pub location: Option<Coordinates>,

    #[validate(length(max = 300))]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ApplyJobRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 2000))]
    pub message: Option<String>,
}

/// 지원자 선정/거절 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProviderActionRequest {
    #[validate(length(min = 1, message = "Provider id is required"))]
    pub provider_id: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CompleteJobRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 2000))]
    pub completion_notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReportJobRequest {
    #[validate(length(min = 1, max = 1000, message = "A reason is required"))]
    pub reason: String,
}

/// `GET /api/jobs` 쿼리. `status`가 없으면 `open`만 조회합니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobListQuery {
    pub status: Option<String>,
    pub category: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius_km: Option<f64>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> serde_json::Value {
        serde_json::json!({
            "title": "Paint fence",
            "description": "About 20 meters",
            "category": "painting",
            "budget": 300.0
        })
    }

    #[test]
    fn test_missing_budget_fails_to_parse() {
        let mut body = body();
        body.as_object_mut().unwrap().remove("budget");

        assert!(serde_json::from_value::<CreateJobRequest>(body).is_err());
    }

    #[test]
    fn test_zero_budget_is_invalid() {
        let mut body = body();
        body["budget"] = serde_json::json!(0);
        let request: CreateJobRequest = serde_json::from_value(body).unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_blank_title_is_invalid() {
        let mut body = body();
        body["title"] = serde_json::json!("");
        let request: CreateJobRequest = serde_json::from_value(body).unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_direct_hire_flattens_job_fields() {
        let mut body = body();
        body["provider_id"] = serde_json::json!("65f1c0ffee0000000000abcd");
        let request: DirectHireJobRequest = serde_json::from_value(body).unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(request.job.title, "Paint fence");
    }
}
