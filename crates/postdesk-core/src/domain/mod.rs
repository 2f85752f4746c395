//! Domain entities - the core business objects.

mod classification;
mod post;
mod post_view;
mod user;

pub use classification::{
    BatchReport, BatchViolation, Classification, ClassificationInput, ClassificationOutcome,
    MAX_BATCH_SIZE, ViolationKind, collect_violations, validate_batch,
};
pub use post::{Category, Post, UnknownCategory};
pub use post_view::{PostViewStats, ViewOutcome, ViewTransition};
pub use user::{FieldValue, ProfileField, ProfileUpdate};
