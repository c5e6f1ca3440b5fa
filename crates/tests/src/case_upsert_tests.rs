use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common;

#[tokio::test]
async fn test_get_case_success() {
    let app = common::test_app();
    let (status, response) = common::get(&app.router, "/api/cases/case-002").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["case_number"], "W.P.(C) 1234/2024");
    assert_eq!(response["status"], "reserved");
    assert_eq!(response["advocates"]["petitioner"], "N. Iyer");
    assert_eq!(response["history"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_get_case_not_found() {
    let app = common::test_app();
    let (status, response) = common::get(&app.router, "/api/cases/nonexistent-id").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["kind"], "NotFound");
}

#[tokio::test]
async fn test_upsert_new_case_appends() {
    let app = common::test_app();
    let body = common::case_body("c1", "pending", Some("2024-03-10"));
    let (status, response) =
        common::put_json(&app.router, "/api/cases/c1", &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["id"], "c1");
    assert_eq!(response["next_hearing_date"], "2024-03-10");
    assert_eq!(response["sync_calendar"], false);

    let (_, list) = common::get(&app.router, "/api/cases").await;
    assert_eq!(list["total"], 5);
    assert_eq!(common::ids(&list["cases"]).last().map(String::as_str), Some("c1"));
}

#[tokio::test]
async fn test_upsert_replaces_in_place() {
    let app = common::test_app();
    let (_, existing) = common::get(&app.router, "/api/cases/case-002").await;

    let mut body = existing.clone();
    body["status"] = "disposed".into();
    body["next_hearing_date"] = serde_json::Value::Null;
    let (status, response) =
        common::put_json(&app.router, "/api/cases/case-002", &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "disposed");
    assert!(response["next_hearing_date"].is_null());

    let (_, list) = common::get(&app.router, "/api/cases").await;
    assert_eq!(
        common::ids(&list["cases"]),
        vec!["case-001", "case-002", "case-003", "case-004"]
    );
}

#[tokio::test]
async fn test_upsert_is_idempotent() {
    let app = common::empty_app();
    let body = common::case_body("c1", "pending", Some("2024-03-10")).to_string();

    let (status, _) = common::put_json(&app.router, "/api/cases/c1", &body).await;
    assert_eq!(status, StatusCode::OK);
    let (_, once) = common::get(&app.router, "/api/cases").await;

    let (status, _) = common::put_json(&app.router, "/api/cases/c1", &body).await;
    assert_eq!(status, StatusCode::OK);
    let (_, twice) = common::get(&app.router, "/api/cases").await;

    assert_eq!(once, twice);
    assert_eq!(twice["total"], 1);
}

#[tokio::test]
async fn test_upsert_blank_body_id_takes_path_id() {
    let app = common::empty_app();
    let mut body = common::case_body("ignored", "pending", None);
    body["id"] = "".into();
    let (status, response) =
        common::put_json(&app.router, "/api/cases/from-path", &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["id"], "from-path");
}

#[tokio::test]
async fn test_upsert_id_mismatch() {
    let app = common::empty_app();
    let body = common::case_body("c1", "pending", None);
    let (status, response) =
        common::put_json(&app.router, "/api/cases/c2", &body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["kind"], "BadRequest");
    assert!(app.service.store().is_empty());
}

#[tokio::test]
async fn test_upsert_invalid_status_rejected() {
    let app = common::test_app();
    let (_, before) = common::get(&app.router, "/api/cases").await;

    let mut body = common::case_body("case-001", "adjourned", None);
    body["case_number"] = "CHANGED".into();
    let (status, response) =
        common::put_json(&app.router, "/api/cases/case-001", &body.to_string()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["kind"], "ValidationError");
    assert!(response["field_errors"]["status"]
        .as_str()
        .unwrap()
        .contains("adjourned"));

    // No partial write.
    let (_, after) = common::get(&app.router, "/api/cases").await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_upsert_reports_every_missing_field() {
    let app = common::empty_app();
    let body = serde_json::json!({ "id": "c1", "status": "pending" });
    let (status, response) =
        common::put_json(&app.router, "/api/cases/c1", &body.to_string()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let errors = response["field_errors"].as_object().unwrap();
    for field in [
        "case_number",
        "cnr_number",
        "case_type",
        "petitioner",
        "respondent",
        "court_name",
        "filing_date",
    ] {
        assert!(errors.contains_key(field), "missing error for {field}");
    }
    assert!(!errors.contains_key("status"));
    assert!(app.service.store().is_empty());
}

#[tokio::test]
async fn test_upsert_invalid_history_entry() {
    let app = common::empty_app();
    let mut body = common::case_body("c1", "pending", None);
    body["history"] = serde_json::json!([
        { "id": "h1", "date": "2024-02-01", "purpose": "Filing" },
        { "id": "h1", "date": "2024-01-01", "purpose": "" }
    ]);
    let (status, response) =
        common::put_json(&app.router, "/api/cases/c1", &body.to_string()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let errors = response["field_errors"].as_object().unwrap();
    assert!(errors.contains_key("history[1].id"));
    assert!(errors.contains_key("history[1].purpose"));
    assert!(errors.contains_key("history[1].date"));
}

#[tokio::test]
async fn test_upsert_normalizes_codes() {
    let app = common::empty_app();
    let mut body = common::case_body("c1", "pending", None);
    body["cnr_number"] = " tshc010001002024 ".into();
    body["case_type"] = "crl".into();
    let (status, response) =
        common::put_json(&app.router, "/api/cases/c1", &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["cnr_number"], "TSHC010001002024");
    assert_eq!(response["case_type"], "CRL");
}
