//! Router construction

use axum::{
    http::{header::CACHE_CONTROL, HeaderValue},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

use crate::handlers;
use crate::state::AppState;

/// Build the full axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.settings.app.static_dir.clone();
    let session_endpoint = state.settings.app.session_endpoint.clone();

    Router::new()
        .route("/", get(handlers::page::index))
        .route(&session_endpoint, post(handlers::session::create_session))
        .route("/api/health", get(handlers::health::health))
        .route("/api/config", get(handlers::config::client_config))
        .nest_service(
            "/static",
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    CACHE_CONTROL,
                    HeaderValue::from_static("no-cache"),
                ))
                .service(ServeDir::new(static_dir)),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
