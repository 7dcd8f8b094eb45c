//! Outbound call initiation.
//!
//! Two setups are supported for REST-created calls:
//!
//! - **Inline announcement**: the leg to the destination is presented with
//!   the resolved caller id and carries an announcement-only document. The
//!   answered leg is the call, so nothing is dialed again.
//! - **Callback bridge**: the leg originates from the provider number and
//!   the provider is given a `/twiml/connect` URL carrying target, mode and
//!   label, and fetches the dial document when the leg connects.

use std::sync::Arc;

use metrics::counter;
use tracing::{info, warn};
use url::Url;

use crate::config::{AppConfig, RoutingConfig};
use crate::domain::{CallRecord, CallRequest};
use crate::error::{AppError, Result};
use crate::provider::{CallInstructions, OutboundCall, TelephonyProvider};
use crate::service::identity::CallerIdentityResolver;
use crate::service::twiml;

/// Path the provider fetches bridge documents from.
pub const CONNECT_DOCUMENT_PATH: &str = "/twiml/connect";

/// Path the provider posts status events to.
pub const STATUS_CALLBACK_PATH: &str = "/call-status";

/// How the call-control document reaches the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallSetup {
    /// Document sent inline at creation.
    InlineAnnouncement,
    /// Document fetched from this service at connect time.
    CallbackBridge,
}

impl CallSetup {
    /// Metric/log label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InlineAnnouncement => "inline_announcement",
            Self::CallbackBridge => "callback_bridge",
        }
    }
}

/// Places calls and builds their documents.
pub struct CallService {
    provider: Arc<dyn TelephonyProvider>,
    resolver: CallerIdentityResolver,
    routing: RoutingConfig,
}

impl CallService {
    /// Create a new call service.
    #[must_use]
    pub fn new(provider: Arc<dyn TelephonyProvider>, config: &AppConfig) -> Self {
        Self {
            provider,
            resolver: CallerIdentityResolver::new(&config.provider.phone_number, &config.routing),
            routing: config.routing.clone(),
        }
    }

    /// Dial document for a request, with the identity resolved.
    #[must_use]
    pub fn dial_document(&self, request: &CallRequest) -> String {
        let identity = self.resolver.resolve(request);
        twiml::dial_document(
            &identity,
            &request.destination,
            self.routing.dial_timeout_secs,
        )
    }

    /// URL the provider fetches the bridge document from.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL cannot be parsed.
    pub fn connect_url(&self, request: &CallRequest) -> Result<String> {
        let mut url = Url::parse(&self.routing.callback_url(CONNECT_DOCUMENT_PATH))
            .map_err(|e| AppError::Internal(format!("invalid callback url: {e}")))?;

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("target", request.destination.as_str())
                .append_pair("mode", request.mode.as_str());
            if let Some(label) = &request.custom_label {
                query.append_pair("name", label);
            }
        }

        Ok(url.into())
    }

    /// Create the call at the provider.
    ///
    /// # Errors
    ///
    /// Returns the provider's error unchanged if it rejects the call.
    pub async fn place_call(&self, request: &CallRequest, setup: CallSetup) -> Result<CallRecord> {
        let (from, instructions) = match setup {
            CallSetup::InlineAnnouncement => {
                let identity = self.resolver.resolve(request);
                let document = twiml::announcement_document(&identity);
                (identity.caller_id, CallInstructions::Twiml(document))
            }
            CallSetup::CallbackBridge => (
                self.resolver.provider_number().to_string(),
                CallInstructions::Url(self.connect_url(request)?),
            ),
        };

        let call = OutboundCall {
            to: request.destination.as_str().to_string(),
            from,
            instructions,
            status_callback: self.routing.callback_url(STATUS_CALLBACK_PATH),
        };

        match self.provider.create_call(&call).await {
            Ok(record) => {
                counter!("calls_initiated_total", "strategy" => setup.as_str()).increment(1);
                info!(
                    call_id = %record.id,
                    status = %record.status,
                    to = %call.to,
                    mode = %request.mode,
                    setup = setup.as_str(),
                    "Outbound call created"
                );
                Ok(record)
            }
            Err(err) => {
                counter!("provider_errors_total", "operation" => "create_call").increment(1);
                warn!(
                    provider = self.provider.provider_name(),
                    code = err.code(),
                    error = %err,
                    "Provider rejected call"
                );
                Err(err.into())
            }
        }
    }

    /// Look up a call at the provider.
    ///
    /// # Errors
    ///
    /// Returns the provider's error unchanged if the lookup fails.
    pub async fn lookup(&self, call_id: &str) -> Result<CallRecord> {
        self.provider.fetch_call(call_id).await.map_err(|err| {
            counter!("provider_errors_total", "operation" => "fetch_call").increment(1);
            warn!(call_id, code = err.code(), error = %err, "Call lookup failed");
            err.into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CustomCallerIdPolicy;
    use crate::error::{ProviderError, ProviderResult};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingProvider {
        calls: Mutex<Vec<OutboundCall>>,
        fail: bool,
    }

    #[async_trait]
    impl TelephonyProvider for RecordingProvider {
        async fn create_call(&self, call: &OutboundCall) -> ProviderResult<CallRecord> {
            self.calls.lock().unwrap().push(call.clone());
            if self.fail {
                return Err(ProviderError::Api {
                    status: 400,
                    code: Some(21_210),
                    message: "The source phone number provided is not yet verified.".to_string(),
                });
            }
            Ok(CallRecord {
                id: "CA0001".to_string(),
                status: "queued".to_string(),
                to: call.to.clone(),
                from: call.from.clone(),
                duration_seconds: None,
            })
        }

        async fn fetch_call(&self, call_id: &str) -> ProviderResult<CallRecord> {
            Err(ProviderError::Api {
                status: 404,
                code: Some(20_404),
                message: format!("Call {call_id} not found"),
            })
        }

        fn provider_name(&self) -> &'static str {
            "recording"
        }
    }

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.provider.phone_number = "+15550001111".to_string();
        config.routing.public_base_url = "https://calls.example.com/".to_string();
        config.routing.custom_caller_id = CustomCallerIdPolicy::SpokenName;
        config
    }

    fn service(provider: Arc<RecordingProvider>) -> CallService {
        CallService::new(provider, &config())
    }

    #[test]
    fn test_connect_url_encodes_label() {
        let service = service(Arc::new(RecordingProvider::default()));
        let request =
            CallRequest::from_fields(Some("+44 7700 900123"), Some("custom"), Some("Tom & Jerry"))
                .unwrap();

        assert_eq!(
            service.connect_url(&request).unwrap(),
            "https://calls.example.com/twiml/connect?target=%2B447700900123&mode=custom&name=Tom+%26+Jerry"
        );
    }

    #[tokio::test]
    async fn test_inline_call_sends_document() {
        let provider = Arc::new(RecordingProvider::default());
        let service = service(Arc::clone(&provider));
        let request = CallRequest::from_fields(Some("+447700900123"), Some("private"), None).unwrap();

        let record = service
            .place_call(&request, CallSetup::InlineAnnouncement)
            .await
            .unwrap();
        assert_eq!(record.id, "CA0001");

        let calls = provider.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].from, "+15550001111");
        assert_eq!(
            calls[0].status_callback,
            "https://calls.example.com/call-status"
        );
        match &calls[0].instructions {
            CallInstructions::Twiml(doc) => {
                assert!(doc.contains("<Say>Call from a private number.</Say>"));
                assert!(!doc.contains("<Dial"));
                assert!(!doc.contains("<Number>+447700900123</Number>"));
            }
            CallInstructions::Url(url) => panic!("expected inline document, got {url}"),
        }
    }

    #[tokio::test]
    async fn test_inline_call_presents_alphanumeric_id() {
        let provider = Arc::new(RecordingProvider::default());
        let mut config = config();
        config.routing.custom_caller_id = CustomCallerIdPolicy::Alphanumeric;
        let service = CallService::new(Arc::clone(&provider) as Arc<dyn TelephonyProvider>, &config);
        let request =
            CallRequest::from_fields(Some("+447700900123"), Some("custom"), Some("Pizza Hut"))
                .unwrap();

        service
            .place_call(&request, CallSetup::InlineAnnouncement)
            .await
            .unwrap();

        let calls = provider.calls.lock().unwrap();
        assert_eq!(calls[0].from, "PizzaHut");
        assert!(matches!(
            &calls[0].instructions,
            CallInstructions::Twiml(doc) if !doc.contains("<Dial")
        ));
    }

    #[tokio::test]
    async fn test_bridge_call_sends_url() {
        let provider = Arc::new(RecordingProvider::default());
        let service = service(Arc::clone(&provider));
        let request = CallRequest::from_fields(Some("+447700900123"), None, None).unwrap();

        service
            .place_call(&request, CallSetup::CallbackBridge)
            .await
            .unwrap();

        let calls = provider.calls.lock().unwrap();
        assert!(matches!(
            &calls[0].instructions,
            CallInstructions::Url(url) if url.starts_with("https://calls.example.com/twiml/connect?")
        ));
    }

    #[tokio::test]
    async fn test_provider_error_is_passed_through() {
        let provider = Arc::new(RecordingProvider {
            fail: true,
            ..Default::default()
        });
        let service = service(provider);
        let request = CallRequest::from_fields(Some("+447700900123"), None, None).unwrap();

        let err = service
            .place_call(&request, CallSetup::InlineAnnouncement)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), 21_210);
        assert_eq!(
            err.to_string(),
            "The source phone number provided is not yet verified."
        );
    }

    #[tokio::test]
    async fn test_lookup_error_is_passed_through() {
        let service = service(Arc::new(RecordingProvider::default()));
        let err = service.lookup("CA404").await.unwrap_err();
        assert_eq!(err.error_code(), 20_404);
    }
}
