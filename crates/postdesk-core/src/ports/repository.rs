use async_trait::async_trait;

use crate::domain::{
    Classification, ClassificationOutcome, FieldValue, Post, PostViewStats, ProfileField,
    ViewOutcome,
};
use crate::error::RepoError;

/// Writes to the `users` table. Each call is a single, non-transactional statement.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Set the `Music` column, or clear it with `None`. Returns the number of
    /// rows matched.
    async fn set_music(&self, username: &str, music: Option<&str>) -> Result<u64, RepoError>;

    /// Apply all `fields` in one `UPDATE`. Callers never pass an empty slice.
    async fn update_fields(
        &self,
        username: &str,
        fields: &[(ProfileField, FieldValue)],
    ) -> Result<u64, RepoError>;
}

/// Post classification storage.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Apply every classification inside one transaction.
    ///
    /// Outcomes are returned in input order. A zero-row update is a failed
    /// outcome, not an error. Any driver error rolls the whole batch back.
    async fn apply_classifications(
        &self,
        batch: &[Classification],
    ) -> Result<Vec<ClassificationOutcome>, RepoError>;

    /// Posts without a category, newest first.
    async fn find_unclassified(&self, limit: u64) -> Result<Vec<Post>, RepoError>;
}

/// The post view dedup ledger.
#[async_trait]
pub trait PostViewRepository: Send + Sync {
    /// Record a view for (post, user) in one transaction and read back the counter.
    async fn record_view(&self, post_id: &str, user_id: &str) -> Result<ViewOutcome, RepoError>;

    /// `None` when the post does not exist.
    async fn view_stats(&self, post_id: &str) -> Result<Option<PostViewStats>, RepoError>;
}
