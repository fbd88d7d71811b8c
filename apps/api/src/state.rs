use std::sync::Arc;

use crate::generation::controller::LetterController;
use crate::settings::SettingsStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Owns the single UI session and the generation gate.
    pub controller: Arc<LetterController>,
    /// Same store the controller reads; exposed for the settings and profile screens.
    pub settings: Arc<dyn SettingsStore>,
}
