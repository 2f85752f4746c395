//! Application state - shared across all handlers.

use std::sync::Arc;

use postdesk_core::ports::{PostRepository, PostViewRepository, ProfileRepository};
use postdesk_core::{ClassificationService, ProfileService, ViewService};
use postdesk_infra::{DatabaseConfig, InMemoryStore};

#[cfg(feature = "postgres")]
use postdesk_infra::{PostgresPostRepository, PostgresPostViewRepository, PostgresUserRepository};

/// Shared application state.
///
/// The workflows are built once here with their storage injected; the pool
/// behind them lives as long as the server process.
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<ProfileService>,
    pub classifier: Arc<ClassificationService>,
    pub views: Arc<ViewService>,
    /// Which backend the ports talk to, for the health endpoint.
    pub storage: &'static str,
}

impl AppState {
    pub fn from_ports(
        storage: &'static str,
        profiles: Arc<dyn ProfileRepository>,
        posts: Arc<dyn PostRepository>,
        views: Arc<dyn PostViewRepository>,
    ) -> Self {
        Self {
            profiles: Arc::new(ProfileService::new(profiles)),
            classifier: Arc::new(ClassificationService::new(posts)),
            views: Arc::new(ViewService::new(views)),
            storage,
        }
    }

    /// All workflows over one in-memory store.
    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self::from_ports("memory", store.clone(), store.clone(), store)
    }

    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let state = match db_config {
            Some(config) => match postdesk_infra::database::connect(config).await {
                Ok(db) => {
                    let db = Arc::new(db);
                    Self::from_ports(
                        "postgres",
                        Arc::new(PostgresUserRepository::shared(db.clone())),
                        Arc::new(PostgresPostRepository::shared(db.clone())),
                        Arc::new(PostgresPostViewRepository::shared(db)),
                    )
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory(Arc::new(InMemoryStore::new()))
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory(Arc::new(InMemoryStore::new()))
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            if db_config.is_some() {
                tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
            }
            tracing::info!("Running without postgres feature - using in-memory store");
            Self::in_memory(Arc::new(InMemoryStore::new()))
        };

        tracing::info!("Application state initialized");
        state
    }
}
