//! Outbound call handlers.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

use crate::api::extractors::Params;
use crate::api::response::Twiml;
use crate::api::state::AppState;
use crate::config::VoiceStrategy;
use crate::domain::{CallRequest, ConnectCallResponse, VoiceCallResponse};
use crate::error::Result;
use crate::service::{CallSetup, twiml};

/// Build a call request from the client's wire fields.
fn call_request(params: &Params) -> Result<CallRequest> {
    CallRequest::from_fields(
        params.get("To"),
        params.get("CallerIdMode"),
        params.get("CustomCallerId"),
    )
}

/// Serve a dial document, or a spoken notice if the request is unusable.
fn dial_or_notice(state: &AppState, request: Result<CallRequest>) -> Twiml {
    match request {
        Ok(request) => Twiml(state.call_service.dial_document(&request)),
        Err(err) => {
            warn!(error = %err, "Cannot build dial document");
            Twiml(twiml::say_document(err.voice_notice()))
        }
    }
}

async fn place_voice_call(
    state: &AppState,
    params: &Params,
    setup: CallSetup,
) -> Result<Json<VoiceCallResponse>> {
    let request = call_request(params)?;
    let record = state.call_service.place_call(&request, setup).await?;
    Ok(Json(VoiceCallResponse::new(record, request.mode)))
}

/// `POST /voice`: place an outbound call with the configured strategy.
pub async fn voice(State(state): State<AppState>, params: Params) -> Response {
    let strategy = state.config.routing.voice_strategy;

    info!(
        to = params.get("To"),
        mode = params.get("CallerIdMode"),
        label = params.get("CustomCallerId"),
        %strategy,
        "Outbound call request"
    );

    match strategy {
        VoiceStrategy::TwimlApp => dial_or_notice(&state, call_request(&params)).into_response(),
        VoiceStrategy::InlineAnnouncement => {
            place_voice_call(&state, &params, CallSetup::InlineAnnouncement)
                .await
                .into_response()
        }
        VoiceStrategy::CallbackBridge => {
            place_voice_call(&state, &params, CallSetup::CallbackBridge)
                .await
                .into_response()
        }
    }
}

/// `POST /connect`: place a call bridged through `/twiml/connect`.
pub async fn connect(
    State(state): State<AppState>,
    params: Params,
) -> Result<Json<ConnectCallResponse>> {
    let request = call_request(&params)?;

    info!(
        to = %request.destination,
        mode = %request.mode,
        "Bridged call request"
    );

    let record = state
        .call_service
        .place_call(&request, CallSetup::CallbackBridge)
        .await?;

    Ok(Json(record.into()))
}

/// `/twiml/connect`: document the provider fetches when a bridged leg connects.
pub async fn connect_document(State(state): State<AppState>, params: Params) -> Twiml {
    let request = CallRequest::from_fields(
        params.get("target"),
        params.get("mode"),
        params.get("name"),
    );

    dial_or_notice(&state, request)
}
