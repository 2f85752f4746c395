#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use sea_orm::{
        DatabaseBackend, DatabaseConnection, DbErr, EntityTrait, MockDatabase, MockExecResult,
    };

    use crate::database::entity::{post, post_view};
    use crate::database::postgres_base::PostgresBaseRepository;
    use crate::database::postgres_repo::{
        PostgresPostRepository, PostgresPostViewRepository, PostgresUserRepository,
    };
    use postdesk_core::domain::{Category, Classification, ProfileField, ViewTransition};
    use postdesk_core::error::RepoError;
    use postdesk_core::ports::{PostRepository, PostViewRepository, ProfileRepository};

    fn rows(n: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: n,
        }
    }

    fn post_row(id: &str, views_count: i64) -> post::Model {
        post::Model {
            id: id.to_owned(),
            message: "hello".to_owned(),
            username: "alice".to_owned(),
            timestamp: Utc::now().fixed_offset(),
            categories: None,
            views_count,
        }
    }

    fn view_row(post_id: &str, user_id: &str) -> post_view::Model {
        post_view::Model {
            id: 1,
            post_id: post_id.to_owned(),
            user_id: user_id.to_owned(),
            viewed_at: Utc::now().fixed_offset(),
        }
    }

    fn item(post_id: &str, category: Category) -> Classification {
        Classification {
            post_id: post_id.to_owned(),
            category,
        }
    }

    /// Every statement the mock saw, including BEGIN/COMMIT/ROLLBACK markers.
    fn log_of(db: DatabaseConnection) -> String {
        format!("{:?}", db.into_transaction_log())
    }

    fn transaction_log<E: EntityTrait>(repo: PostgresBaseRepository<E>) -> String {
        let Ok(db) = Arc::try_unwrap(repo.db) else {
            panic!("connection still shared");
        };
        log_of(db)
    }

    #[tokio::test]
    async fn test_classify_commits_once_with_soft_failures() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([rows(1), rows(0), rows(1)])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        let batch = vec![
            item("p1", Category::News),
            item("missing", Category::Sports),
            item("p3", Category::StoryRant),
        ];
        let outcomes = repo.apply_classifications(&batch).await.unwrap();

        let success: Vec<bool> = outcomes.iter().map(|o| o.success).collect();
        assert_eq!(success, [true, false, true]);
        assert_eq!(outcomes[1].error.as_deref(), Some("Post not found"));

        let log = transaction_log(repo);
        assert_eq!(log.matches("UPDATE \\\"posts\\\"").count(), 3);
        assert!(log.contains("COMMIT"));
        assert!(!log.contains("ROLLBACK"));
    }

    #[tokio::test]
    async fn test_classify_rolls_back_on_driver_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([rows(1)])
            .append_exec_errors([DbErr::Custom("connection lost".to_owned())])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        let batch = vec![item("p1", Category::News), item("p2", Category::News)];
        let err = repo.apply_classifications(&batch).await.unwrap_err();

        assert!(matches!(err, RepoError::Query(msg) if msg.contains("connection lost")));
        let log = transaction_log(repo);
        assert!(log.contains("ROLLBACK"));
        assert!(!log.contains("COMMIT"));
    }

    #[tokio::test]
    async fn test_first_view_inserts_and_increments() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<post_view::Model>::new()])
            .append_query_results([vec![post_row("p1", 6)]])
            .append_exec_results([rows(1), rows(1)])
            .into_connection();
        let repo = PostgresPostViewRepository::new(db);

        let outcome = repo.record_view("p1", "u1").await.unwrap();

        assert_eq!(outcome.transition, ViewTransition::FirstView);
        assert_eq!(outcome.view_count, 6);
        let log = transaction_log(repo);
        assert!(log.contains("INSERT INTO \\\"post_views\\\""));
        assert!(log.contains("views_count"));
        assert!(log.contains("COMMIT"));
    }

    #[tokio::test]
    async fn test_repeat_view_only_touches_timestamp() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![view_row("p1", "u1")]])
            .append_query_results([vec![post_row("p1", 6)]])
            .append_exec_results([rows(1)])
            .into_connection();
        let repo = PostgresPostViewRepository::new(db);

        let outcome = repo.record_view("p1", "u1").await.unwrap();

        assert_eq!(outcome.transition, ViewTransition::Revisit);
        assert_eq!(outcome.view_count, 6);
        let log = transaction_log(repo);
        assert!(!log.contains("INSERT"));
        assert_eq!(log.matches("UPDATE").count(), 1);
        assert!(log.contains("viewed_at"));
    }

    #[tokio::test]
    async fn test_view_of_unknown_post_reads_zero() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<post_view::Model>::new()])
            .append_query_results([Vec::<post::Model>::new()])
            .append_exec_results([rows(1), rows(0)])
            .into_connection();
        let repo = PostgresPostViewRepository::new(db);

        let outcome = repo.record_view("ghost", "u1").await.unwrap();

        assert!(outcome.transition.is_new_view());
        assert_eq!(outcome.view_count, 0);
    }

    #[tokio::test]
    async fn test_failed_increment_rolls_back_the_insert() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<post_view::Model>::new()])
            .append_exec_results([rows(1)])
            .append_exec_errors([DbErr::Custom("lock wait timeout".to_owned())])
            .into_connection();
        let repo = PostgresPostViewRepository::new(db);

        let err = repo.record_view("p1", "u1").await.unwrap_err();

        assert!(err.message().contains("lock wait timeout"));
        let log = transaction_log(repo);
        assert!(log.contains("INSERT INTO \\\"post_views\\\""));
        assert!(log.contains("ROLLBACK"));
        assert!(!log.contains("COMMIT"));
    }

    #[tokio::test]
    async fn test_profile_fields_share_one_statement() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([rows(1)])
            .into_connection();
        let repo = PostgresUserRepository::new(db);

        let fields = vec![
            (ProfileField::Hobby, Some("chess".to_owned())),
            (ProfileField::ProfilePicture, Some("me.png".to_owned())),
        ];
        let matched = repo.update_fields("alice", &fields).await.unwrap();

        assert_eq!(matched, 1);
        let log = transaction_log(repo);
        assert_eq!(log.matches("UPDATE").count(), 1);
        assert!(log.contains("hobby"));
        assert!(log.contains("profile_picture"));
        assert!(!log.contains("description"));
        assert!(!log.contains("Music"));
    }

    #[tokio::test]
    async fn test_null_field_is_written_as_null() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([rows(1)])
            .into_connection();
        let repo = PostgresUserRepository::new(db);

        let fields = vec![(ProfileField::Hobby, None)];
        repo.update_fields("alice", &fields).await.unwrap();

        let log = transaction_log(repo);
        assert!(log.contains("hobby"));
        assert!(log.contains("String(None)"));
    }

    #[tokio::test]
    async fn test_music_update_for_unknown_user_is_not_an_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([rows(0)])
            .into_connection();
        let repo = PostgresUserRepository::new(db);

        let matched = repo.set_music("nobody", Some("jazz")).await.unwrap();

        assert_eq!(matched, 0);
    }

    #[tokio::test]
    async fn test_stats_for_unknown_post_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<post::Model>::new()])
            .into_connection();
        let repo = PostgresPostViewRepository::new(db);

        assert!(repo.view_stats("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_unclassified_maps_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![post_row("p1", 0), post_row("p2", 3)]])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        let posts = repo.find_unclassified(100).await.unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].views_count, 3);
        assert!(posts.iter().all(|p| p.is_unclassified()));
    }

    #[tokio::test]
    async fn test_repositories_share_one_pool() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([rows(1), rows(1)])
                .into_connection(),
        );
        let users = PostgresUserRepository::shared(db.clone());
        let posts = PostgresPostRepository::shared(db.clone());

        users.set_music("alice", Some("jazz")).await.unwrap();
        let outcomes = posts
            .apply_classifications(&[item("p1", Category::Sports)])
            .await
            .unwrap();
        assert!(outcomes[0].success);

        drop(users);
        drop(posts);
        let Ok(db) = Arc::try_unwrap(db) else {
            panic!("connection still shared");
        };
        let log = log_of(db);
        assert!(log.contains("UPDATE \\\"users\\\""));
        assert!(log.contains("UPDATE \\\"posts\\\""));
        assert!(log.contains("COMMIT"));
    }
}
