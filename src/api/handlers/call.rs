//! Call lookup handler.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::state::AppState;
use crate::domain::CallRecord;
use crate::error::{AppError, Result};

/// `GET /call/{id}`: current state of a call at the provider.
pub async fn get_call(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CallRecord>> {
    if id.trim().is_empty() {
        return Err(AppError::BadRequest("call id is required".to_string()));
    }

    let record = state.call_service.lookup(&id).await?;
    Ok(Json(record))
}
