//! Twilio REST API client.
//!
//! Talks to the 2010-04-01 Calls resource with basic auth. Every request is
//! bounded by the configured timeout; failures are surfaced as-is, there is
//! no retry.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::config::ProviderConfig;
use crate::domain::CallRecord;
use crate::error::{ProviderError, ProviderResult};
use crate::provider::traits::{CallInstructions, OutboundCall, TelephonyProvider};

const API_VERSION: &str = "2010-04-01";

/// Status events requested on every call.
const STATUS_EVENTS: [&str; 4] = ["initiated", "ringing", "answered", "completed"];

/// Call resource as returned by the API.
#[derive(Debug, Deserialize)]
struct TwilioCall {
    sid: String,
    status: String,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    from: Option<String>,
    /// Seconds, sent as a string and `null` until the call ends.
    #[serde(default)]
    duration: Option<String>,
}

impl From<TwilioCall> for CallRecord {
    fn from(call: TwilioCall) -> Self {
        Self {
            id: call.sid,
            status: call.status,
            to: call.to.unwrap_or_default(),
            from: call.from.unwrap_or_default(),
            duration_seconds: call.duration.and_then(|d| d.parse().ok()),
        }
    }
}

/// Error document returned with 4xx/5xx answers.
#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

/// Twilio-backed [`TelephonyProvider`].
pub struct TwilioClient {
    http: Client,
    api_base: Url,
    account_sid: String,
    auth_token: String,
}

impl TwilioClient {
    /// Create a client from provider configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &ProviderConfig) -> ProviderResult<Self> {
        let api_base = Url::parse(&config.api_base)
            .map_err(|e| ProviderError::Transport(format!("invalid api_base: {e}")))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            http,
            api_base,
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    /// Build `<api_base>/2010-04-01/Accounts/<sid>/<tail...>` with each
    /// segment percent-encoded.
    fn resource_url(&self, tail: &[&str]) -> ProviderResult<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| ProviderError::Transport("api_base cannot be a base URL".to_string()))?
            .pop_if_empty()
            .extend([API_VERSION, "Accounts", self.account_sid.as_str()])
            .extend(tail);
        Ok(url)
    }

    async fn read_call(response: Response) -> ProviderResult<CallRecord> {
        let status = response.status();

        if status.is_success() {
            let call: TwilioCall = response.json().await?;
            return Ok(call.into());
        }

        let body = response.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<TwilioErrorBody>(&body).ok();

        let code = parsed.as_ref().and_then(|b| b.code);
        let message = parsed
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status.to_string()
                } else {
                    body
                }
            });

        Err(ProviderError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }
}

#[async_trait]
impl TelephonyProvider for TwilioClient {
    async fn create_call(&self, call: &OutboundCall) -> ProviderResult<CallRecord> {
        let url = self.resource_url(&["Calls.json"])?;

        let mut form: Vec<(&str, &str)> = vec![
            ("To", call.to.as_str()),
            ("From", call.from.as_str()),
            ("StatusCallback", call.status_callback.as_str()),
            ("StatusCallbackMethod", "POST"),
        ];
        form.extend(STATUS_EVENTS.iter().map(|e| ("StatusCallbackEvent", *e)));
        match &call.instructions {
            CallInstructions::Twiml(doc) => form.push(("Twiml", doc.as_str())),
            CallInstructions::Url(doc_url) => form.push(("Url", doc_url.as_str())),
        }

        debug!(to = %call.to, from = %call.from, "Creating provider call");

        let response = self
            .http
            .post(url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form)
            .send()
            .await?;

        Self::read_call(response).await
    }

    async fn fetch_call(&self, call_id: &str) -> ProviderResult<CallRecord> {
        let resource = format!("{call_id}.json");
        let url = self.resource_url(&["Calls", resource.as_str()])?;

        let response = self
            .http
            .get(url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .send()
            .await?;

        Self::read_call(response).await
    }

    fn provider_name(&self) -> &'static str {
        "twilio"
    }
}
