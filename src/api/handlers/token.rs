//! Browser-calling token handler.

use axum::{Json, extract::State};
use tracing::info;

use crate::api::state::AppState;
use crate::domain::TokenResponse;
use crate::error::Result;

/// `GET /token`: issue a short-lived voice access token.
pub async fn get_token(State(state): State<AppState>) -> Result<Json<TokenResponse>> {
    let response = state.token_service.issue()?;
    info!(identity = %response.identity, "Access token issued");
    Ok(Json(response))
}
