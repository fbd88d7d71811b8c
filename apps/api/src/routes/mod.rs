pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::generation::handlers as generation;
use crate::history::handlers as history;
use crate::settings::handlers as settings;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/options", get(generation::handle_options))
        // Session form
        .route("/api/v1/session", get(generation::handle_get_session))
        .route(
            "/api/v1/session/inputs",
            put(generation::handle_update_inputs),
        )
        .route("/api/v1/session/new", post(generation::handle_new_draft))
        .route("/api/v1/session/sample", post(generation::handle_fill_sample))
        .route(
            "/api/v1/session/generate",
            post(generation::handle_generate),
        )
        // History
        .route("/api/v1/letters", get(history::handle_list_letters))
        .route(
            "/api/v1/letters/:id/select",
            post(history::handle_select_letter),
        )
        .route("/api/v1/letters/:id", delete(history::handle_delete_letter))
        // Settings
        .route(
            "/api/v1/settings/api-key",
            get(settings::handle_get_api_key).put(settings::handle_put_api_key),
        )
        .route(
            "/api/v1/profile",
            get(settings::handle_get_profile).put(settings::handle_put_profile),
        )
        .with_state(state)
}
