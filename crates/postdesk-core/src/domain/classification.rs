//! Batch classification: input validation and per-item reporting.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::post::Category;
use crate::error::DomainError;

/// Largest batch accepted in one request.
pub const MAX_BATCH_SIZE: usize = 100;

/// One unvalidated `{postId, category}` item as it arrived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationInput {
    pub post_id: Option<String>,
    pub category: Option<String>,
}

impl ClassificationInput {
    pub fn new(post_id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            post_id: Some(post_id.into()),
            category: Some(category.into()),
        }
    }
}

/// A validated assignment of a category to a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub post_id: String,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    MissingField,
    InvalidCategory,
}

/// A validation failure tied to the index of the offending item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchViolation {
    pub index: usize,
    pub kind: ViolationKind,
}

impl fmt::Display for BatchViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ViolationKind::MissingField => {
                write!(f, "Item {}: postId and category are required", self.index)
            }
            ViolationKind::InvalidCategory => write!(
                f,
                "Item {}: Invalid category. Must be one of: {}",
                self.index,
                Category::allowed_list()
            ),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Every violation in the batch, ordered by item index.
///
/// An item may contribute two violations (a missing `postId` together with an
/// unknown category).
pub fn collect_violations(items: &[ClassificationInput]) -> Vec<BatchViolation> {
    let mut violations = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let post_id = present(&item.post_id);
        let category = present(&item.category);

        if post_id.is_none() || category.is_none() {
            violations.push(BatchViolation {
                index,
                kind: ViolationKind::MissingField,
            });
        }
        if category.is_some_and(|c| c.parse::<Category>().is_err()) {
            violations.push(BatchViolation {
                index,
                kind: ViolationKind::InvalidCategory,
            });
        }
    }

    violations
}

/// Validate a whole batch before anything is written.
///
/// Returns the validated items in input order, or an error that describes
/// every problem at once.
pub fn validate_batch(
    items: Option<&[ClassificationInput]>,
) -> Result<Vec<Classification>, DomainError> {
    let items = items.ok_or_else(|| {
        DomainError::Validation("classifications array is required".to_string())
    })?;

    if items.is_empty() {
        return Err(DomainError::Validation(
            "classifications array cannot be empty".to_string(),
        ));
    }
    if items.len() > MAX_BATCH_SIZE {
        return Err(DomainError::Validation(format!(
            "Maximum {MAX_BATCH_SIZE} classifications allowed per request"
        )));
    }

    let violations = collect_violations(items);
    if !violations.is_empty() {
        return Err(DomainError::InvalidBatch(violations));
    }

    items
        .iter()
        .map(|item| {
            let post_id = present(&item.post_id).unwrap_or_default().to_owned();
            let category = present(&item.category)
                .unwrap_or_default()
                .parse::<Category>()
                .map_err(|e| DomainError::Validation(format!("Invalid category: {}", e.0)))?;
            Ok(Classification { post_id, category })
        })
        .collect()
}

/// Result of applying one classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationOutcome {
    pub post_id: String,
    pub category: Category,
    pub success: bool,
    pub error: Option<String>,
}

impl ClassificationOutcome {
    pub fn applied(item: &Classification) -> Self {
        Self {
            post_id: item.post_id.clone(),
            category: item.category,
            success: true,
            error: None,
        }
    }

    pub fn not_found(item: &Classification) -> Self {
        Self {
            post_id: item.post_id.clone(),
            category: item.category,
            success: false,
            error: Some("Post not found".to_string()),
        }
    }

    /// Build the outcome from the number of rows the update matched.
    pub fn from_rows_affected(item: &Classification, rows_affected: u64) -> Self {
        if rows_affected > 0 {
            Self::applied(item)
        } else {
            Self::not_found(item)
        }
    }
}

/// Aggregate report for one committed batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub updated_count: usize,
    pub total_count: usize,
    pub results: Vec<ClassificationOutcome>,
}

impl BatchReport {
    pub fn from_outcomes(results: Vec<ClassificationOutcome>) -> Self {
        Self {
            updated_count: results.iter().filter(|r| r.success).count(),
            total_count: results.len(),
            results,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Successfully updated {} out of {} posts",
            self.updated_count, self.total_count
        )
    }

    /// Items whose update matched no row, for a targeted retry.
    pub fn failed(&self) -> impl Iterator<Item = &ClassificationOutcome> {
        self.results.iter().filter(|r| !r.success)
    }
}
