use axum::Router;
use shared_types::{
    Advocates, AppConfig, AppError, AppErrorKind, CalendarDay, CalendarMonth, CaseHistory,
    CaseSearchResponse, CaseSort, CaseStatus, CaseSummary, FeatureFlags, HistoryEntryRequest,
    LegalCase, NotificationSettings, RefreshInterval, RefreshOutcome, RefreshSettings,
    RegistrySettings, ReminderSettings, SearchQuery, ServerSettings, SetCalendarSyncRequest,
    SettingsUpdate, StatusFilter, TimelineEntry, UpsertCaseRequest,
};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::health;
use crate::rest;
use crate::state::AppState;
use crate::telemetry::OtelTraceLayer;

/// OpenAPI documentation for the API.
#[derive(OpenApi)]
#[openapi(
    paths(
        rest::case::search_cases,
        rest::case::case_summary,
        rest::case::get_case,
        rest::case::upsert_case,
        rest::case::case_timeline,
        rest::case::refresh_case,
        rest::case::refresh_all,
        rest::case::set_calendar_sync,
        rest::case::import_case,
        rest::calendar::calendar_month,
        rest::calendar::upcoming_hearings,
        rest::settings::get_settings,
        rest::settings::update_settings,
        health::health_check,
    ),
    components(schemas(
        AppError, AppErrorKind,
        // Case types
        LegalCase, CaseStatus, CaseHistory, Advocates, UpsertCaseRequest, HistoryEntryRequest,
        SetCalendarSyncRequest, StatusFilter, CaseSort, CaseSearchResponse, CaseSummary,
        RefreshOutcome, SearchQuery,
        // Calendar types
        CalendarMonth, CalendarDay, TimelineEntry,
        // Settings
        AppConfig, ServerSettings, FeatureFlags, RefreshSettings, RefreshInterval,
        NotificationSettings, ReminderSettings, RegistrySettings, SettingsUpdate,
        health::HealthResponse,
    )),
    tags(
        (name = "cases", description = "Tracked case listing, import and refresh"),
        (name = "calendar", description = "Hearing calendar"),
        (name = "settings", description = "Active configuration and runtime settings"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "Case Tracker API",
        description = "Court case tracking: registry import, hearing calendar and case history",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Build an Axum router that serves the API docs at `/docs`
/// and the REST API at `/api/*`.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .merge(rest::api_router())
        .route("/health", axum::routing::get(health::health_check))
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}

/// `api_router` wrapped in the HTTP layers: request ids, request tracing,
/// and OTLP spans when telemetry is enabled.
pub fn app_router(state: AppState, flags: &FeatureFlags) -> Router {
    let mut router = api_router(state).layer(TraceLayer::new_for_http());

    if flags.telemetry {
        router = router.layer(OtelTraceLayer);
    }

    router
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
