//! CORS policy for the browser client.

use actix_cors::Cors;
use actix_web::http::{Method, header};

/// Build the CORS middleware from the configured origin allow-list.
///
/// `*` allows any origin; credentials are then not advertised, since browsers
/// reject that combination.
pub fn cors_policy(allowed_origins: &[String]) -> Cors {
    let allow_any = allowed_origins.iter().any(|o| o == "*");

    let mut cors = Cors::default()
        .allowed_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allowed_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(3600);

    if allow_any {
        cors = cors.allow_any_origin();
    } else {
        for origin in allowed_origins {
            cors = cors.allowed_origin(origin);
        }
        cors = cors.supports_credentials();
    }

    cors
}
