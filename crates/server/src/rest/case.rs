use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use shared_types::{
    AppError, CaseSearchParams, CaseSearchResponse, CaseSummary, LegalCase, RefreshOutcome,
    SearchQuery, SetCalendarSyncRequest, TimelineEntry, UpsertCaseRequest,
};

use crate::query::CaseFilter;
use crate::state::AppState;

/// GET /api/cases
#[utoipa::path(
    get,
    path = "/api/cases",
    params(CaseSearchParams),
    responses(
        (status = 200, description = "Matching cases", body = CaseSearchResponse),
        (status = 400, description = "Invalid filter", body = AppError)
    ),
    tag = "cases"
)]
pub async fn search_cases(
    State(state): State<AppState>,
    Query(params): Query<CaseSearchParams>,
) -> Result<Json<CaseSearchResponse>, AppError> {
    let filter = CaseFilter::try_from(params)?;
    let cases = state.service.query_cases(&filter);
    let total = cases.len();
    Ok(Json(CaseSearchResponse { cases, total }))
}

/// GET /api/cases/summary
#[utoipa::path(
    get,
    path = "/api/cases/summary",
    responses(
        (status = 200, description = "Dashboard counters", body = CaseSummary)
    ),
    tag = "cases"
)]
pub async fn case_summary(State(state): State<AppState>) -> Json<CaseSummary> {
    Json(state.service.summary())
}

/// GET /api/cases/{id}
#[utoipa::path(
    get,
    path = "/api/cases/{id}",
    params(
        ("id" = String, Path, description = "Case id")
    ),
    responses(
        (status = 200, description = "Case found", body = LegalCase),
        (status = 404, description = "Case not found", body = AppError)
    ),
    tag = "cases"
)]
pub async fn get_case(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LegalCase>, AppError> {
    state.service.get_case(&id).map(Json)
}

/// PUT /api/cases/{id}
///
/// A blank body id takes the path id.
#[utoipa::path(
    put,
    path = "/api/cases/{id}",
    params(
        ("id" = String, Path, description = "Case id")
    ),
    request_body = UpsertCaseRequest,
    responses(
        (status = 200, description = "Case stored", body = LegalCase),
        (status = 400, description = "Path and body ids differ", body = AppError),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "cases"
)]
pub async fn upsert_case(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut body): Json<UpsertCaseRequest>,
) -> Result<Json<LegalCase>, AppError> {
    if body.id.trim().is_empty() {
        body.id = id;
    } else if body.id.trim() != id {
        return Err(AppError::bad_request(format!(
            "Body id {} does not match path id {}",
            body.id, id
        )));
    }

    state.service.upsert_case(body).await.map(Json)
}

/// GET /api/cases/{id}/timeline
#[utoipa::path(
    get,
    path = "/api/cases/{id}/timeline",
    params(
        ("id" = String, Path, description = "Case id")
    ),
    responses(
        (status = 200, description = "History oldest first", body = Vec<TimelineEntry>),
        (status = 404, description = "Case not found", body = AppError)
    ),
    tag = "cases"
)]
pub async fn case_timeline(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<TimelineEntry>>, AppError> {
    state.service.history_timeline(&id).map(Json)
}

/// POST /api/cases/{id}/refresh
#[utoipa::path(
    post,
    path = "/api/cases/{id}/refresh",
    params(
        ("id" = String, Path, description = "Case id")
    ),
    responses(
        (status = 200, description = "Case refreshed", body = LegalCase),
        (status = 404, description = "Case not found", body = AppError),
        (status = 409, description = "Registry history is shorter than recorded", body = AppError),
        (status = 502, description = "Registry unavailable", body = AppError),
        (status = 504, description = "Registry timed out", body = AppError)
    ),
    tag = "cases"
)]
pub async fn refresh_case(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LegalCase>, AppError> {
    state.service.refresh_case(&id).await.map(Json)
}

/// POST /api/cases/refresh
#[utoipa::path(
    post,
    path = "/api/cases/refresh",
    responses(
        (status = 200, description = "One outcome per active case", body = Vec<RefreshOutcome>)
    ),
    tag = "cases"
)]
pub async fn refresh_all(State(state): State<AppState>) -> Json<Vec<RefreshOutcome>> {
    Json(state.service.refresh_all().await)
}

/// PATCH /api/cases/{id}/calendar-sync
#[utoipa::path(
    patch,
    path = "/api/cases/{id}/calendar-sync",
    params(
        ("id" = String, Path, description = "Case id")
    ),
    request_body = SetCalendarSyncRequest,
    responses(
        (status = 200, description = "Sync flag updated", body = LegalCase),
        (status = 404, description = "Case not found", body = AppError)
    ),
    tag = "cases"
)]
pub async fn set_calendar_sync(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<SetCalendarSyncRequest>,
) -> Result<Json<LegalCase>, AppError> {
    state
        .service
        .set_calendar_sync(&id, body.enabled)
        .await
        .map(Json)
}

/// POST /api/cases/search
#[utoipa::path(
    post,
    path = "/api/cases/search",
    request_body = SearchQuery,
    responses(
        (status = 201, description = "Case found and tracked", body = LegalCase),
        (status = 404, description = "No registry match", body = AppError),
        (status = 422, description = "Invalid search", body = AppError),
        (status = 502, description = "Registry unavailable", body = AppError),
        (status = 504, description = "Registry timed out", body = AppError)
    ),
    tag = "cases"
)]
pub async fn import_case(
    State(state): State<AppState>,
    Json(body): Json<SearchQuery>,
) -> Result<(StatusCode, Json<LegalCase>), AppError> {
    let case = state.service.import_case(body).await?;
    Ok((StatusCode::CREATED, Json(case)))
}
