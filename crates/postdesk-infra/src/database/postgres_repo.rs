//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseTransaction, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use postdesk_core::domain::{
    Classification, ClassificationOutcome, FieldValue, Post, PostViewStats, ProfileField,
    ViewOutcome, ViewTransition,
};
use postdesk_core::error::RepoError;
use postdesk_core::ports::{PostRepository, PostViewRepository, ProfileRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_view::{self, Entity as PostViewEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, finish, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL post view ledger.
pub type PostgresPostViewRepository = PostgresBaseRepository<PostViewEntity>;

/// Keep usernames out of the logs in full.
fn mask_username(username: &str) -> String {
    match username.chars().next() {
        Some(first) if username.chars().count() > 1 => format!("{first}***"),
        _ => "***".to_string(),
    }
}

#[async_trait]
impl ProfileRepository for PostgresUserRepository {
    async fn set_music(&self, username: &str, music: Option<&str>) -> Result<u64, RepoError> {
        tracing::debug!(
            user = %mask_username(username),
            clear = music.is_none(),
            "Updating music"
        );

        let result = UserEntity::update_many()
            .col_expr(user::Column::Music, Expr::value(music.map(str::to_owned)))
            .filter(user::Column::Username.eq(username))
            .exec(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected)
    }

    async fn update_fields(
        &self,
        username: &str,
        fields: &[(ProfileField, FieldValue)],
    ) -> Result<u64, RepoError> {
        tracing::debug!(
            user = %mask_username(username),
            fields = fields.len(),
            "Updating profile fields"
        );

        let update = fields.iter().fold(UserEntity::update_many(), |update, (field, value)| {
            update.col_expr(user::Column::from(*field), Expr::value(value.clone()))
        });

        let result = update
            .filter(user::Column::Username.eq(username))
            .exec(self.conn())
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            tracing::debug!(user = %mask_username(username), "Profile update matched no rows");
        }

        Ok(result.rows_affected)
    }
}

impl PostgresPostRepository {
    async fn classify_in(
        txn: &DatabaseTransaction,
        batch: &[Classification],
    ) -> Result<Vec<ClassificationOutcome>, DbErr> {
        let mut outcomes = Vec::with_capacity(batch.len());

        for item in batch {
            let result = PostEntity::update_many()
                .col_expr(post::Column::Categories, Expr::value(item.category.as_str()))
                .filter(post::Column::Id.eq(item.post_id.as_str()))
                .exec(txn)
                .await?;

            outcomes.push(ClassificationOutcome::from_rows_affected(
                item,
                result.rows_affected,
            ));
        }

        Ok(outcomes)
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn apply_classifications(
        &self,
        batch: &[Classification],
    ) -> Result<Vec<ClassificationOutcome>, RepoError> {
        let txn = self.begin().await?;
        let result = Self::classify_in(&txn, batch).await;
        finish(txn, result).await
    }

    async fn find_unclassified(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(
                Condition::any()
                    .add(post::Column::Categories.is_null())
                    .add(post::Column::Categories.eq("")),
            )
            .order_by_desc(post::Column::Timestamp)
            .limit(limit)
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

impl PostgresPostViewRepository {
    async fn record_view_in(
        txn: &DatabaseTransaction,
        post_id: &str,
        user_id: &str,
    ) -> Result<ViewOutcome, DbErr> {
        let existing = PostViewEntity::find()
            .filter(post_view::Column::PostId.eq(post_id))
            .filter(post_view::Column::UserId.eq(user_id))
            .one(txn)
            .await?;

        let now = Utc::now().fixed_offset();
        let transition = ViewTransition::from_existing(existing.is_some());

        match transition {
            ViewTransition::FirstView => {
                let view = post_view::ActiveModel {
                    post_id: Set(post_id.to_owned()),
                    user_id: Set(user_id.to_owned()),
                    viewed_at: Set(now),
                    ..Default::default()
                };
                PostViewEntity::insert(view)
                    .exec_without_returning(txn)
                    .await?;

                PostEntity::update_many()
                    .col_expr(
                        post::Column::ViewsCount,
                        Expr::col(post::Column::ViewsCount).add(1),
                    )
                    .filter(post::Column::Id.eq(post_id))
                    .exec(txn)
                    .await?;
            }
            ViewTransition::Revisit => {
                PostViewEntity::update_many()
                    .col_expr(post_view::Column::ViewedAt, Expr::value(now))
                    .filter(post_view::Column::PostId.eq(post_id))
                    .filter(post_view::Column::UserId.eq(user_id))
                    .exec(txn)
                    .await?;
            }
        }

        // Read back inside the transaction; an unknown post reads as zero.
        let view_count = PostEntity::find_by_id(post_id)
            .one(txn)
            .await?
            .map_or(0, |post| post.views_count);

        Ok(ViewOutcome {
            transition,
            view_count,
        })
    }
}

#[async_trait]
impl PostViewRepository for PostgresPostViewRepository {
    async fn record_view(&self, post_id: &str, user_id: &str) -> Result<ViewOutcome, RepoError> {
        let txn = self.begin().await?;
        let result = Self::record_view_in(&txn, post_id, user_id).await;
        finish(txn, result).await
    }

    async fn view_stats(&self, post_id: &str) -> Result<Option<PostViewStats>, RepoError> {
        let Some(post) = PostEntity::find_by_id(post_id)
            .one(self.conn())
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let unique_viewers = PostViewEntity::find()
            .filter(post_view::Column::PostId.eq(post_id))
            .count(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(Some(PostViewStats {
            post_id: post.id,
            view_count: post.views_count,
            unique_viewers,
        }))
    }
}
