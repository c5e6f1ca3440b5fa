//! Bundled demo data.
//!
//! One JSON file feeds both the simulated registry and, when the
//! `demo_data` flag is on, the initial case store, so refreshing a demo
//! case resolves against the same record it was seeded from.

use serde::Deserialize;
use shared_types::{AppError, LegalCase};

use crate::registry::RegistryRecord;

const DEMO_DATA: &str = include_str!("../fixtures/demo_cases.json");

#[derive(Debug, Deserialize)]
struct DemoEntry {
    /// Local id for cases that start out tracked.
    #[serde(default)]
    tracked_id: Option<String>,
    #[serde(default)]
    sync_calendar: bool,
    #[serde(flatten)]
    record: RegistryRecord,
}

fn entries() -> Result<Vec<DemoEntry>, AppError> {
    serde_json::from_str(DEMO_DATA)
        .map_err(|e| AppError::internal(format!("Invalid demo data: {e}")))
}

/// Every record the simulated registry knows about.
pub fn registry_records() -> Result<Vec<RegistryRecord>, AppError> {
    Ok(entries()?.into_iter().map(|e| e.record).collect())
}

/// The subset of demo records that start out tracked, validated.
pub fn demo_cases() -> Result<Vec<LegalCase>, AppError> {
    entries()?
        .into_iter()
        .filter_map(|e| {
            let id = e.tracked_id?;
            Some(LegalCase::try_from(
                e.record.case.into_request(id, e.sync_calendar),
            ))
        })
        .collect()
}

/// Minimal valid case for unit tests.
#[cfg(test)]
pub(crate) fn case(id: &str, status: shared_types::CaseStatus, hearing: Option<&str>) -> LegalCase {
    use chrono::NaiveDate;

    LegalCase {
        id: id.to_string(),
        case_number: format!("CIV {id}/2024"),
        cnr_number: format!("{:0>16}", id.to_ascii_uppercase()),
        case_type: "CIV".to_string(),
        petitioner: format!("Petitioner {id}"),
        respondent: "Respondent".to_string(),
        court_name: "High Court of Delhi".to_string(),
        status,
        filing_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        next_hearing_date: hearing
            .map(|h| NaiveDate::parse_from_str(h, "%Y-%m-%d").unwrap()),
        advocates: Default::default(),
        history: Vec::new(),
        sync_calendar: false,
        last_synced_at: None,
    }
}
