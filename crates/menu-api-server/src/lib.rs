//! Menu API server: publishes menu snapshots, translates entities on
//! demand and resizes item images.

pub mod auth;
pub mod config;
pub mod database;
pub mod handlers;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

#[cfg(test)]
mod test;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

pub use state::AppState;

/// Base64 image uploads are the largest bodies
const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let public_root = state.settings.storage.root.clone();

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness_check))
        .route("/api/menus", get(handlers::menus::list_menus_handler));

    // Handlers here authenticate through the `AuthenticatedUser` extractor
    let editor_routes = Router::new()
        .route("/api/menus/publish", post(handlers::menus::publish_handler))
        .route(
            "/api/translate/item",
            post(handlers::translate::translate_item_handler),
        )
        .route(
            "/api/translate/category",
            post(handlers::translate::translate_category_handler),
        )
        .route(
            "/api/translate/menu",
            post(handlers::translate::translate_menu_handler),
        )
        .route("/api/images/resize", post(handlers::images::resize_handler));

    Router::new()
        .merge(public_routes)
        .merge(editor_routes)
        .nest_service("/public", ServeDir::new(public_root))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
