use axum::{extract::State, Json};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::AppPath;
use crate::generation::controller::SessionView;
use crate::models::history::HistorySummary;
use crate::state::AppState;

/// GET /api/v1/letters
pub async fn handle_list_letters(
    State(state): State<AppState>,
) -> Result<Json<Vec<HistorySummary>>, AppError> {
    let records = state.controller.history().await?;
    Ok(Json(records.iter().map(HistorySummary::from).collect()))
}

/// POST /api/v1/letters/:id/select
pub async fn handle_select_letter(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.controller.select(id).await?))
}

/// DELETE /api/v1/letters/:id
pub async fn handle_delete_letter(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.controller.delete(id).await?))
}
