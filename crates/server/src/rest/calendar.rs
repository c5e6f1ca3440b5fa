use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};

use shared_types::{AppError, CalendarMonth, LegalCase, UpcomingParams};

use crate::state::AppState;

/// GET /api/calendar/{year}/{month}
#[utoipa::path(
    get,
    path = "/api/calendar/{year}/{month}",
    params(
        ("year" = i32, Path, description = "Calendar year"),
        ("month" = u32, Path, description = "Month, 1-12")
    ),
    responses(
        (status = 200, description = "One bucket per day of the month", body = CalendarMonth),
        (status = 400, description = "Invalid month or year", body = AppError)
    ),
    tag = "calendar"
)]
pub async fn calendar_month(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<CalendarMonth>, AppError> {
    state.service.calendar_buckets(year, month).map(Json)
}

/// GET /api/calendar/upcoming
#[utoipa::path(
    get,
    path = "/api/calendar/upcoming",
    params(UpcomingParams),
    responses(
        (status = 200, description = "Upcoming hearings, soonest first", body = Vec<LegalCase>),
        (status = 400, description = "Invalid date", body = AppError)
    ),
    tag = "calendar"
)]
pub async fn upcoming_hearings(
    State(state): State<AppState>,
    Query(params): Query<UpcomingParams>,
) -> Result<Json<Vec<LegalCase>>, AppError> {
    let from = match params.from.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            AppError::bad_request(format!("Invalid from: {raw} (expected YYYY-MM-DD)"))
        })?,
        None => Utc::now().date_naive(),
    };

    Ok(Json(state.service.upcoming_hearings(from)))
}
