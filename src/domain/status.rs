//! Call state as reported by the provider.

use std::collections::HashMap;

use serde::Serialize;

/// A call resource returned on creation or lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    /// Provider call id (`CA...`).
    pub id: String,
    /// Provider call status (`queued`, `ringing`, `completed`, ...).
    pub status: String,
    /// Dialed number.
    pub to: String,
    /// Originating number or sender id.
    pub from: String,
    /// Call duration once known.
    pub duration_seconds: Option<u64>,
}

/// Call statuses the provider reports.
pub const KNOWN_STATUSES: [&str; 9] = [
    "queued",
    "initiated",
    "ringing",
    "in-progress",
    "completed",
    "busy",
    "failed",
    "no-answer",
    "canceled",
];

/// Label for statuses outside [`KNOWN_STATUSES`], including a missing one.
pub const OTHER_STATUS: &str = "other";

/// A status callback pushed by the provider.
///
/// Every field is optional; the webhook never rejects a payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallStatusEvent {
    pub call_id: Option<String>,
    pub status: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub duration_seconds: Option<u64>,
}

impl CallStatusEvent {
    /// Pick the known fields out of a decoded webhook payload.
    #[must_use]
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let field = |name: &str| params.get(name).filter(|v| !v.is_empty()).cloned();

        Self {
            call_id: field("CallSid"),
            status: field("CallStatus"),
            from: field("From"),
            to: field("To"),
            duration_seconds: params
                .get("CallDuration")
                .and_then(|d| d.trim().parse().ok()),
        }
    }

    /// The status as one of a fixed set of labels, safe to use as a metric
    /// dimension.
    #[must_use]
    pub fn status_label(&self) -> &'static str {
        self.status
            .as_deref()
            .and_then(|status| KNOWN_STATUSES.into_iter().find(|known| *known == status))
            .unwrap_or(OTHER_STATUS)
    }
}
