use std::sync::Arc;

use crate::domain::{BatchReport, ClassificationInput, MAX_BATCH_SIZE, Post, validate_batch};
use crate::error::DomainError;
use crate::ports::PostRepository;

/// Page size for the unclassified-posts listing when none is given.
pub const DEFAULT_UNCLASSIFIED_LIMIT: u64 = 100;

/// Bulk post classification.
pub struct ClassificationService {
    repo: Arc<dyn PostRepository>,
}

impl ClassificationService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Validate the whole batch, then apply it atomically.
    ///
    /// Nothing is written unless every item is valid. Items whose post does
    /// not exist are reported as failed outcomes in an otherwise successful
    /// report.
    pub async fn classify(
        &self,
        items: Option<&[ClassificationInput]>,
    ) -> Result<BatchReport, DomainError> {
        let batch = validate_batch(items)?;
        let outcomes = self.repo.apply_classifications(&batch).await?;
        Ok(BatchReport::from_outcomes(outcomes))
    }

    /// Posts still waiting for a category.
    pub async fn unclassified(&self, limit: Option<u64>) -> Result<Vec<Post>, DomainError> {
        let limit = limit.unwrap_or(DEFAULT_UNCLASSIFIED_LIMIT);
        if limit == 0 || limit > MAX_BATCH_SIZE as u64 {
            return Err(DomainError::Validation(format!(
                "limit must be between 1 and {MAX_BATCH_SIZE}"
            )));
        }
        Ok(self.repo.find_unclassified(limit).await?)
    }
}
