use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StartConversationRequest {
    #[validate(length(min = 1, message = "Participant id is required"))]
    pub participant_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, message = "Recipient id is required"))]
    pub recipient_id: String,

    #[validate(length(min = 1, max = 5000, message = "Message content is required"))]
    pub content: String,
}
