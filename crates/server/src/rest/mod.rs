pub mod calendar;
pub mod case;
pub mod settings;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::state::AppState;

/// Build the REST API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Cases
        .route("/api/cases", get(case::search_cases))
        .route("/api/cases/summary", get(case::case_summary))
        .route("/api/cases/search", post(case::import_case))
        .route("/api/cases/refresh", post(case::refresh_all))
        .route("/api/cases/{id}", get(case::get_case).put(case::upsert_case))
        .route("/api/cases/{id}/timeline", get(case::case_timeline))
        .route("/api/cases/{id}/refresh", post(case::refresh_case))
        .route("/api/cases/{id}/calendar-sync", patch(case::set_calendar_sync))
        // Calendar
        .route("/api/calendar/upcoming", get(calendar::upcoming_hearings))
        .route("/api/calendar/{year}/{month}", get(calendar::calendar_month))
        // Settings
        .route(
            "/api/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
}
