//! View tracking handlers.

use actix_web::{HttpResponse, web};

use postdesk_shared::ApiResponse;
use postdesk_shared::dto::{PostViewStatsResponse, TrackViewRequest, TrackViewResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/views
pub async fn track_view(
    state: web::Data<AppState>,
    body: web::Json<TrackViewRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let outcome = state
        .views
        .track_view(req.post_id.as_deref(), req.user_id.as_deref())
        .await
        .map_err(|e| AppError::from_domain(e, "Error tracking view"))?;

    tracing::debug!(
        post_id = req.post_id.as_deref().unwrap_or_default(),
        is_new_view = outcome.transition.is_new_view(),
        view_count = outcome.view_count,
        "View recorded"
    );

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        TrackViewResponse {
            view_count: outcome.view_count,
            is_new_view: outcome.transition.is_new_view(),
        },
        outcome.transition.message(),
    )))
}

/// GET /api/views/{post_id}
pub async fn view_stats(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let stats = state
        .views
        .stats(&path.into_inner())
        .await
        .map_err(|e| AppError::from_domain(e, "Error fetching view stats"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostViewStatsResponse {
        post_id: stats.post_id,
        view_count: stats.view_count,
        unique_viewers: stats.unique_viewers,
    })))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test, web};
    use chrono::Utc;
    use postdesk_core::domain::Post;
    use postdesk_infra::InMemoryStore;
    use serde_json::json;

    use crate::handlers::configure_routes;
    use crate::state::AppState;

    async fn store_with_post(id: &str) -> Arc<InMemoryStore> {
        let store = Arc::new(InMemoryStore::new());
        store
            .insert_post(Post {
                id: id.to_owned(),
                message: "m".to_owned(),
                username: "author".to_owned(),
                timestamp: Utc::now(),
                categories: None,
                views_count: 0,
            })
            .await;
        store
    }

    #[actix_web::test]
    async fn second_view_by_same_user_is_not_counted() {
        let store = store_with_post("p1").await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::in_memory(store.clone())))
                .configure(configure_routes),
        )
        .await;

        let view = || {
            test::TestRequest::post()
                .uri("/api/views")
                .set_json(json!({"postId": "p1", "userId": "u1"}))
                .to_request()
        };

        let first: serde_json::Value = test::call_and_read_body_json(&app, view()).await;
        assert_eq!(first["success"], true);
        assert_eq!(first["isNewView"], true);
        assert_eq!(first["viewCount"], 1);
        assert_eq!(first["message"], "View tracked successfully");

        let second: serde_json::Value = test::call_and_read_body_json(&app, view()).await;
        assert_eq!(second["isNewView"], false);
        assert_eq!(second["viewCount"], 1);
        assert_eq!(second["message"], "View timestamp updated");

        assert_eq!(store.post("p1").await.unwrap().views_count, 1);
    }

    #[actix_web::test]
    async fn missing_user_id_is_a_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::in_memory(
                    store_with_post("p1").await,
                )))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/views")
            .set_json(json!({"postId": "p1"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "userId is required");
    }

    #[actix_web::test]
    async fn unknown_post_reports_zero_views() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::in_memory(Arc::new(
                    InMemoryStore::new(),
                ))))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/views")
            .set_json(json!({"postId": "ghost", "userId": "u1"}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["viewCount"], 0);

        let req = test::TestRequest::get().uri("/api/views/ghost").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn stats_count_distinct_viewers() {
        let store = store_with_post("p1").await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::in_memory(store)))
                .configure(configure_routes),
        )
        .await;

        for user in ["u1", "u2", "u3", "u1"] {
            let req = test::TestRequest::post()
                .uri("/api/views")
                .set_json(json!({"postId": "p1", "userId": user}))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = test::TestRequest::get().uri("/api/views/p1").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["postId"], "p1");
        assert_eq!(body["viewCount"], 3);
        assert_eq!(body["uniqueViewers"], 3);
    }
}
