//! # Postdesk Infrastructure
//!
//! Concrete implementations of the ports defined in `postdesk-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL repositories via SeaORM

pub mod database;
pub mod memory;

pub use database::DatabaseConfig;
pub use memory::{InMemoryStore, UserRecord};

#[cfg(feature = "postgres")]
pub use database::{PostgresPostRepository, PostgresPostViewRepository, PostgresUserRepository};
