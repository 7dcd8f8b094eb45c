//! Router setup and configuration.

use axum::{
    Router,
    routing::{any, get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers::{call, health, token, voice, webhook};
use crate::api::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    // Service status routes
    let status_routes = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/metrics", get(health::metrics));

    // Client-facing call routes
    let call_routes = Router::new()
        .route("/token", get(token::get_token))
        .route("/voice", post(voice::voice))
        .route("/connect", post(voice::connect))
        .route("/call/{id}", get(call::get_call));

    // Provider-facing routes
    let provider_routes = Router::new()
        .route("/twiml/connect", any(voice::connect_document))
        .route("/voice-incoming", post(webhook::voice_incoming))
        .route("/call-status", post(webhook::call_status));

    Router::new()
        .merge(status_routes)
        .merge(call_routes)
        .merge(provider_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
