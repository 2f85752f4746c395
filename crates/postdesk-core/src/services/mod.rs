//! Workflows - validate input, then drive the ports.
//!
//! Each service receives its storage port at construction; the process that
//! builds the services owns the connection pool behind those ports.

mod classification;
mod profile;
mod views;

pub use classification::{ClassificationService, DEFAULT_UNCLASSIFIED_LIMIT};
pub use profile::ProfileService;
pub use views::ViewService;

/// Missing and empty values are both rejected with `message`.
pub(crate) fn required<'a>(
    value: Option<&'a str>,
    message: &str,
) -> Result<&'a str, crate::DomainError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| crate::DomainError::Validation(message.to_string()))
}
