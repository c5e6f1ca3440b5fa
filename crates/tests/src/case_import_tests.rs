use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common;

#[tokio::test]
async fn test_import_by_diary_number_tracks_new_case() {
    let app = common::test_app();
    let body = json!({ "search_type": "diary_number", "diary_number": "18234", "year": 2025 });
    let (status, response) =
        common::post_json(&app.router, "/api/cases/search", &body.to_string()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response["case_number"], "MACT 512/2025");
    assert_eq!(response["court_name"], "District Court, Pune");
    assert_eq!(response["sync_calendar"], false);

    let id = response["id"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());

    let (_, list) = common::get(&app.router, "/api/cases").await;
    assert_eq!(list["total"], 5);
    assert_eq!(common::ids(&list["cases"]).last().map(String::as_str), Some(id));
}

#[tokio::test]
async fn test_import_by_each_search_type() {
    let app = common::empty_app();
    let searches = [
        json!({ "search_type": "cnr", "cnr_number": "dlhc010012342024" }),
        json!({
            "search_type": "case_number",
            "case_type": "CRLA",
            "case_number": "245",
            "year": 2025
        }),
        json!({ "search_type": "party_name", "party_name": "mehta textiles", "year": 2023 }),
    ];
    let expected = ["W.P.(C) 1234/2024", "CRL.A. 245/2025", "CS(OS) 88/2023"];

    for (search, case_number) in searches.iter().zip(expected) {
        let (status, response) =
            common::post_json(&app.router, "/api/cases/search", &search.to_string()).await;
        assert_eq!(status, StatusCode::CREATED, "search {search}");
        assert_eq!(response["case_number"], case_number);
    }
    assert_eq!(app.service.store().len(), 3);
}

#[tokio::test]
async fn test_import_existing_cnr_keeps_id_and_sync_flag() {
    let app = common::test_app();
    let body = json!({ "search_type": "cnr", "cnr_number": "DLHC010002452025" });
    let (status, response) =
        common::post_json(&app.router, "/api/cases/search", &body.to_string()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response["id"], "case-001");
    assert_eq!(response["sync_calendar"], true);
    // Calendar sync is on for this case, so the import pushes the hearing.
    assert!(response["last_synced_at"].is_string());

    let (_, list) = common::get(&app.router, "/api/cases").await;
    assert_eq!(list["total"], 4);
}

#[tokio::test]
async fn test_import_twice_creates_one_case() {
    let app = common::empty_app();
    let body =
        json!({ "search_type": "party_name", "party_name": "Lata", "year": 2025 }).to_string();

    let (_, first) = common::post_json(&app.router, "/api/cases/search", &body).await;
    let (_, second) = common::post_json(&app.router, "/api/cases/search", &body).await;
    assert_eq!(first["id"], second["id"]);
    assert_eq!(app.service.store().len(), 1);
}

#[tokio::test]
async fn test_import_no_match() {
    let app = common::test_app();
    let body = json!({ "search_type": "diary_number", "diary_number": "18234", "year": 2024 });
    let (status, response) =
        common::post_json(&app.router, "/api/cases/search", &body.to_string()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["kind"], "NotFound");
    assert_eq!(app.service.store().len(), 4);
}

#[tokio::test]
async fn test_import_invalid_search() {
    let app = common::empty_app();

    let body = json!({ "search_type": "party_name", "party_name": "  ", "year": 2025 });
    let (status, response) =
        common::post_json(&app.router, "/api/cases/search", &body.to_string()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response["field_errors"]["party_name"].is_string());

    let body = json!({ "search_type": "cnr", "cnr_number": "SHORT" });
    let (status, response) =
        common::post_json(&app.router, "/api/cases/search", &body.to_string()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response["field_errors"]["cnr_number"].is_string());

    let body = json!({
        "search_type": "case_number",
        "case_type": "XYZ",
        "case_number": "1",
        "year": 1900
    });
    let (status, response) =
        common::post_json(&app.router, "/api/cases/search", &body.to_string()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response["field_errors"]["case_type"].is_string());
    assert!(response["field_errors"]["year"].is_string());

    assert!(app.service.store().is_empty());
}

#[tokio::test]
async fn test_import_unknown_search_type() {
    let app = common::empty_app();
    let body = json!({ "search_type": "advocate", "advocate": "N. Iyer" });
    let (status, _) = common::post_json(&app.router, "/api/cases/search", &body.to_string()).await;
    assert!(status.is_client_error());
    assert!(app.service.store().is_empty());
}
