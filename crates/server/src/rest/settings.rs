use axum::{extract::State, Json};
use shared_types::{AppConfig, AppError, SettingsUpdate};

use crate::state::AppState;

/// GET /api/settings
#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "Active configuration", body = AppConfig)
    ),
    tag = "settings"
)]
pub async fn get_settings(State(state): State<AppState>) -> Json<AppConfig> {
    Json(state.service.config())
}

/// PUT /api/settings
///
/// Replaces refresh, notification and reminder settings for the running
/// process. Nothing is written back to the config file.
#[utoipa::path(
    put,
    path = "/api/settings",
    request_body = SettingsUpdate,
    responses(
        (status = 200, description = "Settings applied", body = AppConfig),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "settings"
)]
pub async fn update_settings(
    State(state): State<AppState>,
    Json(body): Json<SettingsUpdate>,
) -> Result<Json<AppConfig>, AppError> {
    state.service.update_settings(body).map(Json)
}
