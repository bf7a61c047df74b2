//! 리뷰와 평점 서비스

pub mod review_service;

pub use review_service::{recompute_rating, ReviewService};
