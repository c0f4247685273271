use axum::http::{header, Method};
use axum::{middleware, routing::get, Router};
use std::path::Path;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::handlers;
use crate::system::middleware::request_logger::request_logger;
use crate::system::state::AppState;

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // D402 Order Analytics Dashboard
        .route(
            "/api/d402/date_bounds",
            get(handlers::d402_order_analytics::get_date_bounds),
        )
        .route(
            "/api/d402/order_analytics",
            get(handlers::d402_order_analytics::get_order_analytics),
        )
        .with_state(state)
        .fallback_service(ServeDir::new(static_dir))
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
}
