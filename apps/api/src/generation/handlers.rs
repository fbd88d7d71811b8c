//! Axum route handlers for the session form and generation.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::generation::controller::{InputsUpdate, SessionView};
use crate::models::options::{option_listing, OptionListing};
use crate::state::AppState;

/// GET /api/v1/options
pub async fn handle_options() -> Json<OptionListing> {
    Json(option_listing())
}

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.controller.session().await)
}

/// PUT /api/v1/session/inputs
pub async fn handle_update_inputs(
    State(state): State<AppState>,
    AppJson(update): AppJson<InputsUpdate>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.controller.update_inputs(update).await?))
}

/// POST /api/v1/session/new
pub async fn handle_new_draft(
    State(state): State<AppState>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.controller.new_draft().await?))
}

/// POST /api/v1/session/sample
pub async fn handle_fill_sample(
    State(state): State<AppState>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.controller.fill_sample_inputs().await?))
}

/// POST /api/v1/session/generate
///
/// Runs one generation against the current form. On failure the error message
/// is also recorded in the session for the next GET.
pub async fn handle_generate(
    State(state): State<AppState>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.controller.generate().await?))
}
