//! Application state for Axum handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::AppConfig;
use crate::provider::TelephonyProvider;
use crate::service::{CallService, TokenService};

/// Shared application state. Read-only; cloned per request.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Call placement and document service.
    pub call_service: Arc<CallService>,
    /// Access token service.
    pub token_service: Arc<TokenService>,
    /// Prometheus exporter handle, when metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: Arc<AppConfig>, provider: Arc<dyn TelephonyProvider>) -> Self {
        let call_service = Arc::new(CallService::new(provider, &config));
        let token_service = Arc::new(TokenService::new(&config.provider));

        Self {
            config,
            call_service,
            token_service,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
