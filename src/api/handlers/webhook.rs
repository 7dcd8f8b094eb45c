//! Provider-pushed webhooks. Both always acknowledge.

use axum::http::StatusCode;
use metrics::counter;
use tracing::info;

use crate::api::extractors::Params;
use crate::api::response::Twiml;
use crate::domain::CallStatusEvent;
use crate::service::twiml;

/// `POST /voice-incoming`: reject every inbound call.
pub async fn voice_incoming(params: Params) -> Twiml {
    counter!("inbound_calls_rejected_total").increment(1);
    info!(
        from = params.get("From"),
        call_id = params.get("CallSid"),
        "Incoming call rejected"
    );

    Twiml(twiml::reject_document())
}

/// `POST /call-status`: log the event and acknowledge.
pub async fn call_status(params: Params) -> StatusCode {
    let event = CallStatusEvent::from_params(&params.0);

    counter!("call_status_events_total", "status" => event.status_label()).increment(1);

    info!(
        call_id = event.call_id.as_deref(),
        status = event.status.as_deref(),
        from = event.from.as_deref(),
        to = event.to.as_deref(),
        duration_seconds = event.duration_seconds,
        "Call status"
    );

    StatusCode::OK
}
