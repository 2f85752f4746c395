//! HTTP handlers and route configuration.

mod classify;
mod health;
mod profile;
mod views;

use actix_web::web;

use crate::middleware::error::{json_error_handler, query_error_handler};

/// Configure all application routes.
///
/// Each path is a resource, so an unsupported method gets 405.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(
            web::scope("/api")
                .service(web::resource("/health").route(web::get().to(health::health_check)))
                .service(web::resource("/profile").route(web::post().to(profile::update_profile)))
                .service(
                    web::resource("/classify-posts")
                        .route(web::get().to(classify::list_unclassified))
                        .route(web::post().to(classify::classify_posts)),
                )
                .service(web::resource("/views").route(web::post().to(views::track_view)))
                .service(
                    web::resource("/views/{post_id}").route(web::get().to(views::view_stats)),
                ),
        );
}
