use std::sync::Arc;

use axum::http::{header, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{self, preflight};
use crate::state::AppState;

pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

pub fn build(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/bookings",
            get(handlers::bookings::list_bookings)
                .post(handlers::bookings::create_booking)
                .options(preflight),
        )
        .route(
            "/availability",
            get(handlers::bookings::get_availability).options(preflight),
        )
        .route(
            "/admin/bookings",
            get(handlers::admin::get_bookings)
                .put(handlers::admin::update_status)
                .delete(handlers::admin::delete_booking)
                .options(preflight),
        )
        .route(
            "/content",
            get(handlers::content::get_content)
                .put(handlers::content::put_content)
                .options(preflight),
        )
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
