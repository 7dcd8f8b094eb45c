//! Service status handlers.

use axum::{Json, extract::State};
use chrono::Utc;
use serde_json::{Value, json};

use crate::api::state::AppState;

/// Service descriptor.
pub async fn root() -> Json<Value> {
    Json(json!({
        "status": "Caller ID Router running",
        "message": "Server is ready for calls!"
    }))
}

/// Liveness check - always returns 200 if the service is running.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339()
    }))
}

/// Prometheus metrics endpoint.
pub async fn metrics(State(state): State<AppState>) -> String {
    let mut output = String::new();

    output.push_str("# HELP caller_id_router_up Whether the service is up\n");
    output.push_str("# TYPE caller_id_router_up gauge\n");
    output.push_str("caller_id_router_up 1\n");

    if let Some(handle) = &state.metrics {
        output.push_str(&handle.render());
    }

    output
}
