//! Router assembly.

mod api;
mod common;

pub use api::api_routes;
pub use common::common_routes;

use crate::config::Settings;
use crate::handlers::{method_not_allowed, path_not_found};
use crate::state::AppState;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// All routes with the unknown-path and wrong-method fallbacks, without middleware.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(api_routes(state))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(path_not_found)
}

/// `app` plus request tracing, CORS and the body size cap.
pub fn app_with_layers(state: AppState, settings: &Settings) -> Router {
    let cors = if settings.cors_origins.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        let origins: Vec<_> = settings
            .cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };
    app(state)
        .layer(RequestBodyLimitLayer::new(settings.body_limit_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
