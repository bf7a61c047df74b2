use serde::Deserialize;
use validator::Validate;
use crate::domain::entities::tickets::{TicketCategory, TicketPriority, TicketStatus};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTicketRequest {
    #[validate(length(min = 1, max = 200, message = "Subject is required"))]
    pub subject: String,

    #[validate(length(min = 1, max = 5000, message = "Message is required"))]
    pub message: String,

    pub category: Option<TicketCategory>,

    pub priority: Option<TicketPriority>,
}

/// 관리자 답변/상태 변경
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RespondTicketRequest {
    #[validate(length(min = 1, max = 5000))]
    pub admin_response: Option<String>,

    pub status: Option<TicketStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketListQuery {
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_and_priority_are_optional() {
        let body = serde_json::json!({"subject": "Login", "message": "Cannot sign in"});
        let request: CreateTicketRequest = serde_json::from_value(body).unwrap();

        assert!(request.validate().is_ok());
        assert!(request.category.is_none());
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let body = serde_json::json!({"subject": "x", "message": "y", "category": "billing"});

        assert!(serde_json::from_value::<CreateTicketRequest>(body).is_err());
    }
}
