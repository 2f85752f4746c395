//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use postdesk_core::DomainError;
use postdesk_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    /// Every per-item problem in a rejected batch.
    Validation(Vec<String>),
    /// A store failure. The message is passed through for diagnostics.
    Persistence { title: &'static str, detail: String },
}

impl AppError {
    /// Map a workflow error, naming the failed operation in 500 responses.
    pub fn from_domain(err: DomainError, operation: &'static str) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::InvalidBatch(violations) => {
                AppError::Validation(violations.iter().map(ToString::to_string).collect())
            }
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            DomainError::Persistence(repo) => AppError::Persistence {
                title: operation,
                detail: repo.message().to_string(),
            },
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
            AppError::Persistence { title, detail } => write!(f, "{}: {}", title, detail),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Validation(errors) => ErrorResponse::bad_request("Validation errors")
                .with_errors(errors.clone()),
            AppError::Persistence { title, detail } => {
                tracing::error!(operation = %title, error = %detail, "Persistence error");
                ErrorResponse::internal_error().with_detail(format!("{}: {}", title, detail))
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

/// Malformed JSON bodies get the same problem-details shape as other 400s.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use postdesk_core::domain::{BatchViolation, ViolationKind};
    use postdesk_core::error::RepoError;

    #[test]
    fn batch_violations_become_a_400_with_every_message() {
        let err = AppError::from_domain(
            DomainError::InvalidBatch(vec![
                BatchViolation {
                    index: 0,
                    kind: ViolationKind::MissingField,
                },
                BatchViolation {
                    index: 3,
                    kind: ViolationKind::InvalidCategory,
                },
            ]),
            "Error updating classifications",
        );

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors[1].starts_with("Item 3: Invalid category"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn persistence_error_keeps_driver_message() {
        let err = AppError::from_domain(
            DomainError::Persistence(RepoError::Connection("pool timed out".into())),
            "Error tracking view",
        );

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Error tracking view: pool timed out");
    }
}
