//! Telephony provider trait definitions.
//!
//! The router only ever needs two provider operations, so handlers and
//! services talk to this trait and tests can swap in a recording fake.

use async_trait::async_trait;

use crate::domain::CallRecord;
use crate::error::ProviderResult;

/// What the provider should do once the new call leg is answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallInstructions {
    /// Call-control document sent inline with the create request.
    Twiml(String),
    /// URL the provider fetches the call-control document from.
    Url(String),
}

/// Parameters for a call-creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundCall {
    /// Number the provider dials first.
    pub to: String,
    /// Provider-owned number the leg originates from.
    pub from: String,
    /// Document or document URL driving the leg.
    pub instructions: CallInstructions,
    /// URL status events are posted to.
    pub status_callback: String,
}

/// Managed telephony API.
#[async_trait]
pub trait TelephonyProvider: Send + Sync {
    /// Create an outbound call.
    async fn create_call(&self, call: &OutboundCall) -> ProviderResult<CallRecord>;

    /// Look up a call by id.
    async fn fetch_call(&self, call_id: &str) -> ProviderResult<CallRecord>;

    /// Provider name for logging.
    fn provider_name(&self) -> &'static str;
}
