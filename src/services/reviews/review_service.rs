//! # 리뷰 서비스 구현
//!
//! 리뷰 작성/조회/수정/삭제와 대상자 평점 재계산을 담당합니다.
//! 평점은 리뷰가 바뀔 때마다 대상자의 모든 리뷰로 다시 계산합니다.

use std::collections::HashMap;
use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use validator::Validate;
use crate::core::registry::{Service, ServiceLocator};
use crate::domain::dto::reviews::{CreateReviewRequest, ReviewResponse, UpdateReviewRequest, UserReviewsResponse};
use crate::domain::entities::jobs::Job;
use crate::domain::entities::reviews::{RatingSummary, Review};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::repositories::{jobs::JobRepository, reviews::ReviewRepository, users::UserRepository};
use crate::utils::string_utils::{clean_optional_string, parse_object_id};

/// 대상자의 평균 평점과 리뷰 수를 다시 계산해 저장합니다.
pub async fn recompute_rating(
    user_repo: &UserRepository,
    review_repo: &ReviewRepository,
    reviewee: &ObjectId,
) -> Result<RatingSummary, AppError> {
    let ratings = review_repo.ratings_for(reviewee).await?;
    let summary = RatingSummary::from_ratings(&ratings);
    user_repo.update_rating(reviewee, summary.average, summary.count).await?;

    log::debug!("평점 재계산 - user_id: {}, rating: {}, count: {}", reviewee, summary.average, summary.count);
    Ok(summary)
}

/// 작업에 묶인 리뷰는 작성자와 대상자가 모두 그 작업의 당사자이고, 둘 중 한 명은 의뢰자여야 합니다.
pub fn ensure_review_parties(job: &Job, reviewer: &ObjectId, reviewee: &ObjectId) -> Result<(), AppError> {
    if !job.involves(reviewer) {
        return Err(AppError::AuthorizationError("You were not part of this job".to_string()));
    }
    if !job.involves(reviewee) || !(job.is_owner(reviewer) || job.is_owner(reviewee)) {
        return Err(AppError::ValidationError("The reviewed user was not your counterpart on this job".to_string()));
    }
    Ok(())
}

pub struct ReviewService {
    review_repo: Arc<ReviewRepository>,
    user_repo: Arc<UserRepository>,
    job_repo: Arc<JobRepository>,
}

impl ReviewService {
    pub fn new() -> Self {
        Self {
            review_repo: ServiceLocator::get::<ReviewRepository>(),
            user_repo: ServiceLocator::get::<UserRepository>(),
            job_repo: ServiceLocator::get::<JobRepository>(),
        }
    }

    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    async fn load(&self, review_id: &str) -> Result<Review, AppError> {
        let id = parse_object_id(review_id, "review id")?;
        self.review_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("Review not found".to_string()))
    }

    /// 작업을 지정한 리뷰는 작성자가 그 작업의 당사자여야 합니다.
    pub async fn create(&self, reviewer: &ObjectId, request: CreateReviewRequest) -> Result<ReviewResponse, AppError> {
        request.validate()?;

        let reviewee = parse_object_id(&request.reviewee_id, "reviewee id")?;
        let job = request
            .job_id
            .as_deref()
            .map(|id| parse_object_id(id, "job id"))
            .transpose()?;

        let review = Review::new(*reviewer, reviewee, job, request.rating, clean_optional_string(request.comment))?;

        if self.user_repo.find_by_id(&reviewee).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        if let Some(job_id) = &job {
            let job = self
                .job_repo
                .find_by_id(job_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;
            ensure_review_parties(&job, reviewer, &reviewee)?;
        }

        if self.review_repo.exists(reviewer, &reviewee, job.as_ref()).await? {
            return Err(AppError::ValidationError("You have already reviewed this user".to_string()));
        }

        let review = self.review_repo.insert(review).await?;
        recompute_rating(&self.user_repo, &self.review_repo, &reviewee).await?;

        log::info!("리뷰 작성 - reviewer: {}, reviewee: {}", reviewer, reviewee);
        Ok(ReviewResponse::from(review))
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<UserReviewsResponse, AppError> {
        let reviewee = parse_object_id(user_id, "user id")?;
        let user = self
            .user_repo
            .find_by_id(&reviewee)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let reviews = self.review_repo.find_by_reviewee(&reviewee).await?;

        let mut reviewer_ids: Vec<ObjectId> = reviews.iter().map(|r| r.reviewer).collect();
        reviewer_ids.sort_by_key(|id| id.bytes());
        reviewer_ids.dedup();

        let names: HashMap<ObjectId, String> = self
            .user_repo
            .find_by_ids(&reviewer_ids)
            .await?
            .into_iter()
            .filter_map(|u| u.id.map(|id| (id, u.name)))
            .collect();

        let reviews = reviews
            .into_iter()
            .map(|review| {
                let name = names.get(&review.reviewer).cloned();
                ReviewResponse::from(review).with_reviewer_name(name)
            })
            .collect();

        Ok(UserReviewsResponse {
            reviews,
            rating: user.rating,
            review_count: user.review_count,
        })
    }

    pub async fn update(&self, reviewer: &ObjectId, review_id: &str, request: UpdateReviewRequest) -> Result<ReviewResponse, AppError> {
        request.validate()?;

        let mut review = self.load(review_id).await?;
        review.ensure_author(reviewer)?;
        review.revise(request.rating, clean_optional_string(request.comment))?;
        self.review_repo.save(&review).await?;

        recompute_rating(&self.user_repo, &self.review_repo, &review.reviewee).await?;
        Ok(ReviewResponse::from(review))
    }

    pub async fn delete(&self, user: &AuthenticatedUser, review_id: &str) -> Result<(), AppError> {
        let review = self.load(review_id).await?;
        if !user.is_admin() {
            review.ensure_author(&user.object_id()?)?;
        }

        let id = review
            .id
            .ok_or_else(|| AppError::InternalError("리뷰 ID가 없습니다".to_string()))?;
        self.review_repo.delete(&id).await?;
        recompute_rating(&self.user_repo, &self.review_repo, &review.reviewee).await?;

        log::info!("리뷰 삭제 - review_id: {}, by: {}", id, user.user_id);
        Ok(())
    }
}

impl Service for ReviewService {
    fn name(&self) -> &str {
        "ReviewService"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::DateTime;
    use crate::domain::entities::jobs::ProviderSnapshot;

    fn job_with_applicants(owner: ObjectId, applicants: &[ObjectId]) -> Job {
        let mut job = Job::new(
            owner,
            "Paint fence".to_string(),
            "Two coats, white".to_string(),
            "painting".to_string(),
            80.0,
            None,
            None,
        );
        for id in applicants {
            let provider = ProviderSnapshot {
                id: *id,
                name: "Kim".to_string(),
                rating: 0.0,
            };
            job.apply(provider, None, DateTime::now()).unwrap();
        }
        job
    }

    #[test]
    fn test_owner_and_applicant_may_review_each_other() {
        let owner = ObjectId::new();
        let provider = ObjectId::new();
        let job = job_with_applicants(owner, &[provider]);

        assert!(ensure_review_parties(&job, &owner, &provider).is_ok());
        assert!(ensure_review_parties(&job, &provider, &owner).is_ok());
    }

    #[test]
    fn test_outsider_cannot_review_through_job() {
        let owner = ObjectId::new();
        let outsider = ObjectId::new();
        let job = job_with_applicants(owner, &[]);

        let err = ensure_review_parties(&job, &outsider, &owner).unwrap_err();
        assert!(matches!(err, AppError::AuthorizationError(_)));
    }

    #[test]
    fn test_reviewee_must_belong_to_job() {
        let owner = ObjectId::new();
        let provider = ObjectId::new();
        let unrelated = ObjectId::new();
        let job = job_with_applicants(owner, &[provider]);

        let err = ensure_review_parties(&job, &provider, &unrelated).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_two_applicants_cannot_review_each_other() {
        let owner = ObjectId::new();
        let first = ObjectId::new();
        let second = ObjectId::new();
        let job = job_with_applicants(owner, &[first, second]);

        assert!(ensure_review_parties(&job, &first, &second).is_err());
    }
}
