//! Remote insight providers.
//!
//! The orchestrator only sees the [`InsightProvider`] trait, so the local
//! fallback path can be exercised without any network access.

pub mod error;
pub mod github_models;
pub mod prompts;

use crate::models::{CategorySet, OpenResponses};
use async_trait::async_trait;

pub use error::InsightError;
pub use github_models::{GitHubModelsClient, GitHubModelsConfig};

/// Source of a natural-language insight for a survey submission.
#[async_trait]
pub trait InsightProvider: Send + Sync {
    /// Model or provider name recorded in the analysis metadata.
    fn name(&self) -> &str;

    /// Produce an insight from the category scores and written feedback.
    async fn get_insight(
        &self,
        categories: &CategorySet,
        responses: &OpenResponses,
    ) -> Result<String, InsightError>;
}
