use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common;

#[tokio::test]
async fn test_list_cases_insertion_order() {
    let app = common::test_app();
    let (status, response) = common::get(&app.router, "/api/cases").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["total"], 4);
    assert_eq!(
        common::ids(&response["cases"]),
        vec!["case-001", "case-002", "case-003", "case-004"]
    );
}

#[tokio::test]
async fn test_list_cases_status_filter() {
    let app = common::test_app();

    let (status, response) = common::get(&app.router, "/api/cases?status=pending").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::ids(&response["cases"]), vec!["case-001", "case-004"]);

    let (_, response) = common::get(&app.router, "/api/cases?status=disposed").await;
    assert_eq!(common::ids(&response["cases"]), vec!["case-003"]);

    let (_, response) = common::get(&app.router, "/api/cases?status=reserved").await;
    assert_eq!(common::ids(&response["cases"]), vec!["case-002"]);

    let (_, response) = common::get(&app.router, "/api/cases?status=all").await;
    assert_eq!(response["total"], 4);
}

#[tokio::test]
async fn test_list_cases_text_query() {
    let app = common::test_app();

    let (_, response) = common::get(&app.router, "/api/cases?q=1234").await;
    assert_eq!(common::ids(&response["cases"]), vec!["case-002"]);

    let (_, response) = common::get(&app.router, "/api/cases?q=9999").await;
    assert_eq!(response["total"], 0);
    assert_eq!(response["cases"], serde_json::json!([]));

    // Party names match case-insensitively.
    let (_, response) = common::get(&app.router, "/api/cases?q=kapoor").await;
    assert_eq!(common::ids(&response["cases"]), vec!["case-003"]);

    // CNR is searchable too.
    let (_, response) = common::get(&app.router, "/api/cases?q=dlhc01003120").await;
    assert_eq!(common::ids(&response["cases"]), vec!["case-004"]);
}

#[tokio::test]
async fn test_list_cases_status_and_text_combine() {
    let app = common::test_app();
    let (_, response) =
        common::get(&app.router, "/api/cases?status=pending&q=State%20(NCT").await;
    assert_eq!(common::ids(&response["cases"]), vec!["case-001", "case-004"]);

    let (_, response) = common::get(&app.router, "/api/cases?status=disposed&q=State").await;
    assert_eq!(response["total"], 0);
}

#[tokio::test]
async fn test_list_cases_sorted_by_next_hearing() {
    let app = common::test_app();
    let (status, response) = common::get(&app.router, "/api/cases?sort=next_hearing").await;
    assert_eq!(status, StatusCode::OK);
    // Ties keep store order; cases without a hearing come last.
    assert_eq!(
        common::ids(&response["cases"]),
        vec!["case-004", "case-001", "case-002", "case-003"]
    );
}

#[tokio::test]
async fn test_list_cases_sorted_by_filing_date() {
    let app = common::test_app();
    let (_, response) = common::get(&app.router, "/api/cases?sort=filing_date").await;
    assert_eq!(
        common::ids(&response["cases"]),
        vec!["case-004", "case-001", "case-002", "case-003"]
    );
}

#[tokio::test]
async fn test_list_cases_hearing_range() {
    let app = common::test_app();
    let (status, response) = common::get(
        &app.router,
        "/api/cases?hearing_from=2026-11-01&hearing_to=2026-11-30",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::ids(&response["cases"]), vec!["case-001", "case-002"]);
}

#[tokio::test]
async fn test_list_cases_invalid_params() {
    let app = common::test_app();

    let (status, response) = common::get(&app.router, "/api/cases?status=archived").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["kind"], "BadRequest");

    let (status, _) = common::get(&app.router, "/api/cases?sort=alphabetical").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = common::get(&app.router, "/api/cases?hearing_from=04-11-2026").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = common::get(
        &app.router,
        "/api/cases?hearing_from=2026-12-01&hearing_to=2026-11-01",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_cases_is_repeatable() {
    let app = common::test_app();
    let (_, first) = common::get(&app.router, "/api/cases?status=pending&sort=next_hearing").await;
    let (_, second) = common::get(&app.router, "/api/cases?status=pending&sort=next_hearing").await;
    assert_eq!(first, second);

    let (_, all) = common::get(&app.router, "/api/cases").await;
    assert_eq!(all["total"], 4);
}

#[tokio::test]
async fn test_case_summary() {
    let app = common::test_app();
    let (status, response) = common::get(&app.router, "/api/cases/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["total"], 4);
    assert_eq!(response["active"], 3);
    assert_eq!(response["disposed"], 1);
    assert_eq!(response["scheduled_hearings"], 3);
}

#[tokio::test]
async fn test_case_summary_empty_store() {
    let app = common::empty_app();
    let (status, response) = common::get(&app.router, "/api/cases/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["total"], 0);
    assert_eq!(response["scheduled_hearings"], 0);
}
