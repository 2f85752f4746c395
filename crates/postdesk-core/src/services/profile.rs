use std::sync::Arc;

use crate::domain::ProfileUpdate;
use crate::error::DomainError;
use crate::ports::ProfileRepository;

use super::required;

/// Applies sparse profile updates.
pub struct ProfileService {
    repo: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    pub fn new(repo: Arc<dyn ProfileRepository>) -> Self {
        Self { repo }
    }

    /// Apply the fields present in `update` to the user's row.
    ///
    /// `Music` goes first, in its own statement, and stays applied if the
    /// batched update that follows fails. A present `None` writes NULL. An
    /// unknown username matches no rows and still succeeds.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), DomainError> {
        let username = required(Some(update.username.as_str()), "Username is required")?;

        if let Some(music) = &update.music {
            self.repo.set_music(username, music.as_deref()).await?;
        }

        let changes = update.field_changes();
        if !changes.is_empty() {
            self.repo.update_fields(username, &changes).await?;
        }

        Ok(())
    }
}
