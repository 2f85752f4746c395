use std::sync::Arc;

use crate::domain::{PostViewStats, ViewOutcome};
use crate::error::DomainError;
use crate::ports::PostViewRepository;

use super::required;

/// Deduplicated view tracking.
pub struct ViewService {
    repo: Arc<dyn PostViewRepository>,
}

impl ViewService {
    pub fn new(repo: Arc<dyn PostViewRepository>) -> Self {
        Self { repo }
    }

    /// Record that `user_id` viewed `post_id`.
    ///
    /// Only the first view of a pair increments the post's counter. Two
    /// concurrent first views of the same pair may both count under weak
    /// isolation; that drift is accepted.
    pub async fn track_view(
        &self,
        post_id: Option<&str>,
        user_id: Option<&str>,
    ) -> Result<ViewOutcome, DomainError> {
        let post_id = required(post_id, "postId is required")?;
        let user_id = required(user_id, "userId is required")?;

        Ok(self.repo.record_view(post_id, user_id).await?)
    }

    pub async fn stats(&self, post_id: &str) -> Result<PostViewStats, DomainError> {
        self.repo
            .view_stats(post_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity_type: "Post",
                id: post_id.to_string(),
            })
    }
}
