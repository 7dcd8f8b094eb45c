//! Data Transfer Objects for API responses.

use serde::{Deserialize, Serialize};

use crate::domain::{CallRecord, CallerIdMode};

/// Response for a call placed through `POST /voice`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceCallResponse {
    pub success: bool,
    pub call_id: String,
    pub status: String,
    pub to: String,
    pub from: String,
    pub caller_id_mode: CallerIdMode,
}

impl VoiceCallResponse {
    /// Build from the provider's record of the new call.
    #[must_use]
    pub fn new(record: CallRecord, mode: CallerIdMode) -> Self {
        Self {
            success: true,
            call_id: record.id,
            status: record.status,
            to: record.to,
            from: record.from,
            caller_id_mode: mode,
        }
    }
}

/// Response for a call placed through `POST /connect`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectCallResponse {
    pub success: bool,
    pub call_id: String,
    pub status: String,
}

impl From<CallRecord> for ConnectCallResponse {
    fn from(record: CallRecord) -> Self {
        Self {
            success: true,
            call_id: record.id,
            status: record.status,
        }
    }
}

/// Browser-calling credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Always `true`; failures use the error body.
    pub success: bool,
    /// Signed access token.
    pub token: String,
    /// Client identity embedded in the token.
    pub identity: String,
}
