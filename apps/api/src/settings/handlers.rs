use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::profile::UserProfile;
use crate::settings::{api_key, load_profile, save_profile, SettingsStore, API_KEY};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ApiKeyStatus {
    pub configured: bool,
}

#[derive(Debug, Deserialize)]
pub struct ApiKeyUpdate {
    pub api_key: String,
}

/// GET /api/v1/settings/api-key
///
/// Reports only whether a key is stored; the key itself is never returned.
pub async fn handle_get_api_key(
    State(state): State<AppState>,
) -> Result<Json<ApiKeyStatus>, AppError> {
    let configured = api_key(state.settings.as_ref()).await?.is_some();
    Ok(Json(ApiKeyStatus { configured }))
}

/// PUT /api/v1/settings/api-key
///
/// An empty key clears the stored one.
pub async fn handle_put_api_key(
    State(state): State<AppState>,
    AppJson(update): AppJson<ApiKeyUpdate>,
) -> Result<StatusCode, AppError> {
    state.settings.set(API_KEY, update.api_key.trim()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
) -> Result<Json<UserProfile>, AppError> {
    Ok(Json(load_profile(state.settings.as_ref()).await?))
}

/// PUT /api/v1/profile
pub async fn handle_put_profile(
    State(state): State<AppState>,
    AppJson(profile): AppJson<UserProfile>,
) -> Result<Json<UserProfile>, AppError> {
    save_profile(state.settings.as_ref(), &profile).await?;
    Ok(Json(profile))
}
