use serde::Serialize;
use crate::domain::dto::common::{format_datetime, hex_id};
use crate::domain::entities::reviews::Review;

#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: String,
    pub reviewer_id: String,
    /// 목록 조회에서만 채워집니다.
    pub reviewer_name: Option<String>,
    pub reviewee_id: String,
    pub job_id: Option<String>,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: hex_id(&review.id),
            reviewer_id: review.reviewer.to_hex(),
            reviewer_name: None,
            reviewee_id: review.reviewee.to_hex(),
            job_id: review.job.map(|id| id.to_hex()),
            rating: review.rating,
            comment: review.comment,
            created_at: format_datetime(&review.created_at),
            updated_at: format_datetime(&review.updated_at),
        }
    }
}

impl ReviewResponse {
    pub fn with_reviewer_name(mut self, name: Option<String>) -> Self {
        self.reviewer_name = name;
        self
    }
}

/// 사용자가 받은 리뷰 목록과 집계
#[derive(Debug, Clone, Serialize)]
pub struct UserReviewsResponse {
    pub reviews: Vec<ReviewResponse>,
    pub rating: f64,
    pub review_count: i64,
}
