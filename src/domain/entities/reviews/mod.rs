pub mod review;

pub use review::{RatingSummary, Review, MAX_RATING, MIN_RATING};
