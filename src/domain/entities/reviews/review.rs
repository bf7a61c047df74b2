//! Review Entity Implementation
//!
//! 사용자 간 평가 문서입니다. (작성자, 대상자, 작업) 조합당 하나만 존재합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::errors::AppError;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub reviewer: ObjectId,
    pub reviewee: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<ObjectId>,
    pub rating: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Review {
    pub fn new(
        reviewer: ObjectId,
        reviewee: ObjectId,
        job: Option<ObjectId>,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Self, AppError> {
        if reviewer == reviewee {
            return Err(AppError::ValidationError("You cannot review yourself".to_string()));
        }
        Self::check_rating(rating)?;

        let now = DateTime::now();
        Ok(Self {
            id: None,
            reviewer,
            reviewee,
            job,
            rating,
            comment,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn check_rating(rating: i32) -> Result<(), AppError> {
        if (MIN_RATING..=MAX_RATING).contains(&rating) {
            Ok(())
        } else {
            Err(AppError::ValidationError(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )))
        }
    }

    pub fn ensure_author(&self, user_id: &ObjectId) -> Result<(), AppError> {
        if &self.reviewer == user_id {
            Ok(())
        } else {
            Err(AppError::AuthorizationError("Only the author can modify this review".to_string()))
        }
    }

    pub fn revise(&mut self, rating: Option<i32>, comment: Option<String>) -> Result<(), AppError> {
        if let Some(rating) = rating {
            Self::check_rating(rating)?;
            self.rating = rating;
        }
        if comment.is_some() {
            self.comment = comment;
        }
        self.updated_at = DateTime::now();
        Ok(())
    }
}

/// 대상자의 집계 평점
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub average: f64,
    pub count: i64,
}

impl RatingSummary {
    /// 평균은 소수점 첫째 자리로 반올림하며, 리뷰가 없으면 0입니다.
    pub fn from_ratings(ratings: &[i32]) -> Self {
        if ratings.is_empty() {
            return Self { average: 0.0, count: 0 };
        }

        let sum: i64 = ratings.iter().map(|r| *r as i64).sum();
        let average = sum as f64 / ratings.len() as f64;

        Self {
            average: (average * 10.0).round() / 10.0,
            count: ratings.len() as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_self_review_rejected() {
        let id = ObjectId::new();

        assert!(matches!(
            Review::new(id, id, None, 5, None),
            Err(AppError::ValidationError(_))
        ));
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(5, true)]
    #[case(6, false)]
    fn test_rating_bounds(#[case] rating: i32, #[case] ok: bool) {
        let result = Review::new(ObjectId::new(), ObjectId::new(), None, rating, None);

        assert_eq!(result.is_ok(), ok);
    }

    #[test]
    fn test_only_author_may_modify() {
        let reviewer = ObjectId::new();
        let review = Review::new(reviewer, ObjectId::new(), None, 4, None).unwrap();

        assert!(review.ensure_author(&reviewer).is_ok());
        assert!(matches!(
            review.ensure_author(&ObjectId::new()),
            Err(AppError::AuthorizationError(_))
        ));
    }

    #[test]
    fn test_revise_keeps_comment_when_absent() {
        let mut review =
            Review::new(ObjectId::new(), ObjectId::new(), None, 4, Some("Great".to_string())).unwrap();

        review.revise(Some(2), None).unwrap();

        assert_eq!(review.rating, 2);
        assert_eq!(review.comment.as_deref(), Some("Great"));
        assert!(review.revise(Some(9), None).is_err());
    }

    #[rstest]
    #[case(&[], 0.0, 0)]
    #[case(&[5], 5.0, 1)]
    #[case(&[4, 5], 4.5, 2)]
    #[case(&[5, 4, 4], 4.3, 3)]
    #[case(&[1, 2, 2], 1.7, 3)]
    fn test_rating_summary(#[case] ratings: &[i32], #[case] average: f64, #[case] count: i64) {
        let summary = RatingSummary::from_ratings(ratings);

        assert_eq!(summary.average, average);
        assert_eq!(summary.count, count);
    }
}
