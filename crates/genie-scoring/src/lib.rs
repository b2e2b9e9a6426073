//! Scoring helpers for Genie.
//!
//! Each helper builds a prompt and schema, then delegates to
//! [`genie_providers::Requester`].

pub mod recommended_reviews;

pub use recommended_reviews::{RecommendedReviews, ReviewerRecommendation};
