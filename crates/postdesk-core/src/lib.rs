//! # Postdesk Core
//!
//! The domain layer of the Postdesk service.
//! This crate contains the profile, classification and view-tracking workflows
//! with zero infrastructure dependencies. Storage is reached through the
//! traits in [`ports`].

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
pub use services::{ClassificationService, ProfileService, ViewService};
