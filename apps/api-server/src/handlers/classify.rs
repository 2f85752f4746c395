//! Post classification handlers.

use actix_web::{HttpResponse, web};

use postdesk_core::domain::{BatchReport, ClassificationInput, Post};
use postdesk_shared::ApiResponse;
use postdesk_shared::dto::{
    ClassificationResult, ClassifyPostsRequest, ClassifyPostsResponse, PostSummary,
    UnclassifiedPostsResponse, UnclassifiedQuery,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(report: BatchReport) -> ClassifyPostsResponse {
    ClassifyPostsResponse {
        updated_count: report.updated_count,
        total_count: report.total_count,
        results: report
            .results
            .into_iter()
            .map(|r| ClassificationResult {
                post_id: r.post_id,
                category: r.category.as_str().to_string(),
                success: r.success,
                error: r.error,
            })
            .collect(),
    }
}

fn to_summary(post: Post) -> PostSummary {
    PostSummary {
        id: post.id,
        message: post.message,
        username: post.username,
        timestamp: post.timestamp.to_rfc3339(),
        categories: post.categories,
    }
}

/// POST /api/classify-posts
pub async fn classify_posts(
    state: web::Data<AppState>,
    body: web::Json<ClassifyPostsRequest>,
) -> AppResult<HttpResponse> {
    let items: Option<Vec<ClassificationInput>> = body.items().map(|items| {
        items
            .into_iter()
            .map(|item| ClassificationInput {
                post_id: item.post_id,
                category: item.category,
            })
            .collect()
    });

    let report = state
        .classifier
        .classify(items.as_deref())
        .await
        .map_err(|e| AppError::from_domain(e, "Error updating classifications"))?;

    tracing::info!(
        updated_count = report.updated_count,
        total_count = report.total_count,
        "Classifications applied"
    );
    let missing: Vec<&str> = report.failed().map(|r| r.post_id.as_str()).collect();
    if !missing.is_empty() {
        tracing::warn!(post_ids = ?missing, "Classified posts not found");
    }

    let message = report.summary();
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(to_response(report), message)))
}

/// GET /api/classify-posts?limit=
pub async fn list_unclassified(
    state: web::Data<AppState>,
    query: web::Query<UnclassifiedQuery>,
) -> AppResult<HttpResponse> {
    let posts = state
        .classifier
        .unclassified(query.limit)
        .await
        .map_err(|e| AppError::from_domain(e, "Error fetching posts"))?;

    let posts: Vec<PostSummary> = posts.into_iter().map(to_summary).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(UnclassifiedPostsResponse {
        count: posts.len(),
        posts,
    })))
}
