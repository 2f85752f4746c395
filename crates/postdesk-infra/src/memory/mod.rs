//! In-memory store - used as fallback when no database is configured.
//!
//! Implements the same port contracts as the PostgreSQL repositories. Each
//! operation runs under one write lock, which stands in for a transaction.
//! Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use postdesk_core::domain::{
    Classification, ClassificationOutcome, FieldValue, Post, PostViewStats, ProfileField,
    ViewOutcome, ViewTransition,
};
use postdesk_core::error::RepoError;
use postdesk_core::ports::{PostRepository, PostViewRepository, ProfileRepository};

/// A user row as the profile workflow sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRecord {
    pub username: String,
    pub hobby: Option<String>,
    pub description: Option<String>,
    pub profile_picture: Option<String>,
    pub music: Option<String>,
}

impl UserRecord {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    fn set(&mut self, field: ProfileField, value: &FieldValue) {
        let slot = match field {
            ProfileField::Hobby => &mut self.hobby,
            ProfileField::Description => &mut self.description,
            ProfileField::ProfilePicture => &mut self.profile_picture,
        };
        slot.clone_from(value);
    }
}

#[derive(Default)]
struct StoreState {
    users: HashMap<String, UserRecord>,
    posts: HashMap<String, Post>,
    /// (post id, user id) -> last viewed.
    views: HashMap<(String, String), DateTime<Utc>>,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_user(&self, user: UserRecord) {
        let mut state = self.state.write().await;
        state.users.insert(user.username.clone(), user);
    }

    pub async fn insert_post(&self, post: Post) {
        let mut state = self.state.write().await;
        state.posts.insert(post.id.clone(), post);
    }

    pub async fn user(&self, username: &str) -> Option<UserRecord> {
        self.state.read().await.users.get(username).cloned()
    }

    pub async fn post(&self, id: &str) -> Option<Post> {
        self.state.read().await.posts.get(id).cloned()
    }

    /// When `user_id` last viewed `post_id`, if ever.
    pub async fn last_viewed(&self, post_id: &str, user_id: &str) -> Option<DateTime<Utc>> {
        let state = self.state.read().await;
        state
            .views
            .get(&(post_id.to_owned(), user_id.to_owned()))
            .copied()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn set_music(&self, username: &str, music: Option<&str>) -> Result<u64, RepoError> {
        let mut state = self.state.write().await;
        Ok(match state.users.get_mut(username) {
            Some(user) => {
                user.music = music.map(str::to_owned);
                1
            }
            None => 0,
        })
    }

    async fn update_fields(
        &self,
        username: &str,
        fields: &[(ProfileField, FieldValue)],
    ) -> Result<u64, RepoError> {
        let mut state = self.state.write().await;
        let Some(user) = state.users.get_mut(username) else {
            return Ok(0);
        };
        for (field, value) in fields {
            user.set(*field, value);
        }
        Ok(1)
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn apply_classifications(
        &self,
        batch: &[Classification],
    ) -> Result<Vec<ClassificationOutcome>, RepoError> {
        let mut state = self.state.write().await;

        let outcomes = batch
            .iter()
            .map(|item| {
                let matched = match state.posts.get_mut(&item.post_id) {
                    Some(post) => {
                        post.categories = Some(item.category.as_str().to_owned());
                        1
                    }
                    None => 0,
                };
                ClassificationOutcome::from_rows_affected(item, matched)
            })
            .collect();

        Ok(outcomes)
    }

    async fn find_unclassified(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let state = self.state.read().await;

        let mut posts: Vec<Post> = state
            .posts
            .values()
            .filter(|p| p.is_unclassified())
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        posts.truncate(usize::try_from(limit).unwrap_or(usize::MAX));

        Ok(posts)
    }
}

#[async_trait]
impl PostViewRepository for InMemoryStore {
    async fn record_view(&self, post_id: &str, user_id: &str) -> Result<ViewOutcome, RepoError> {
        let mut state = self.state.write().await;
        let key = (post_id.to_owned(), user_id.to_owned());

        let transition = ViewTransition::from_existing(state.views.contains_key(&key));
        state.views.insert(key, Utc::now());

        if transition.is_new_view() {
            if let Some(post) = state.posts.get_mut(post_id) {
                post.views_count += 1;
            }
        }

        let view_count = state.posts.get(post_id).map_or(0, |p| p.views_count);
        Ok(ViewOutcome {
            transition,
            view_count,
        })
    }

    async fn view_stats(&self, post_id: &str) -> Result<Option<PostViewStats>, RepoError> {
        let state = self.state.read().await;
        let Some(post) = state.posts.get(post_id) else {
            return Ok(None);
        };

        let unique_viewers = state.views.keys().filter(|(p, _)| p == post_id).count() as u64;
        Ok(Some(PostViewStats {
            post_id: post.id.clone(),
            view_count: post.views_count,
            unique_viewers,
        }))
    }
}
