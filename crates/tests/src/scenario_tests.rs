use axum::http::StatusCode;
use chrono::{Datelike, Days, NaiveDate, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;

use server::fixtures;

use crate::common;

fn synced_at(case: &serde_json::Value) -> chrono::DateTime<chrono::FixedOffset> {
    chrono::DateTime::parse_from_rfc3339(case["last_synced_at"].as_str().unwrap()).unwrap()
}

/// One tracked case from creation through the calendar and its timeline.
#[tokio::test]
async fn test_single_case_walkthrough() {
    let app = common::empty_app();
    let body = common::case_body("c1", "pending", Some("2024-03-10"));
    let (status, _) = common::put_json(&app.router, "/api/cases/c1", &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let (_, found) = common::get(&app.router, "/api/cases?status=all&q=CRL").await;
    assert_eq!(common::ids(&found["cases"]), vec!["c1"]);

    let (_, month) = common::get(&app.router, "/api/calendar/2024/3").await;
    let days = month["days"].as_array().unwrap();
    assert_eq!(days.len(), 31);
    for day in days {
        let ids = common::ids(&day["cases"]);
        if day["day"] == 10 {
            assert_eq!(ids, vec!["c1"]);
        } else {
            assert!(ids.is_empty());
        }
    }

    let (_, timeline) = common::get(&app.router, "/api/cases/c1/timeline").await;
    assert_eq!(
        timeline,
        json!([{
            "id": "h1",
            "date": "2024-01-05",
            "purpose": "Filing",
            "order": null,
            "next_purpose": "Admission",
            "has_order": false,
            "is_latest": true
        }])
    );
}

/// Publish a copy of the bail fixture filed this year, with a hearing next
/// month, so searches stay inside the registry's year window.
fn publish_bail_filed_this_year(app: &common::TestApp, today: NaiveDate) -> String {
    let year = today.year();
    let mut record = fixtures::registry_records()
        .unwrap()
        .into_iter()
        .find(|r| r.case.case_type == "BAIL")
        .unwrap();
    record.case.case_number = format!("BAIL APPLN. 3120/{year}");
    record.case.cnr_number = format!("DLHC01003120{year}");
    record.case.filing_date = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
    record.case.next_hearing_date = today.checked_add_days(Days::new(30));
    record.case.history.clear();
    let cnr = record.case.cnr_number.clone();
    app.service.registry().inner().publish(record);
    cnr
}

/// Search the registry, enable calendar sync, then refresh.
#[tokio::test]
async fn test_import_sync_refresh_walkthrough() {
    let app = common::empty_app();
    let today = Utc::now().date_naive();
    let cnr = publish_bail_filed_this_year(&app, today);
    let search = json!({
        "search_type": "case_number",
        "case_type": "BAIL",
        "case_number": "3120",
        "year": today.year()
    });
    let (status, imported) =
        common::post_json(&app.router, "/api/cases/search", &search.to_string()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(imported["cnr_number"], cnr);
    assert!(imported["last_synced_at"].is_null());
    let id = imported["id"].as_str().unwrap().to_string();

    let (status, synced) = common::patch_json(
        &app.router,
        &format!("/api/cases/{id}/calendar-sync"),
        &json!({ "enabled": true }).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let stamp = synced_at(&synced);

    let (status, refreshed) = common::post(&app.router, &format!("/api/cases/{id}/refresh")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(refreshed["sync_calendar"], true);
    assert!(synced_at(&refreshed) >= stamp);

    let uri = format!("/api/calendar/upcoming?from={today}");
    let (_, upcoming) = common::get(&app.router, &uri).await;
    assert_eq!(common::ids(&upcoming), vec![id]);
}
