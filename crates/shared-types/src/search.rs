use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::case::{is_valid_case_type, is_valid_cnr, normalize_cnr, Advocates, CNR_LENGTH};
use crate::{AppError, HistoryEntryRequest, UpsertCaseRequest};

/// How many filing years back a registry search may reach, counting the
/// current year.
pub const SEARCH_YEAR_WINDOW: i32 = 30;

/// A registry lookup, one variant per search form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(tag = "search_type", rename_all = "snake_case")]
pub enum SearchQuery {
    /// 16-character CNR code.
    Cnr { cnr_number: String },
    /// Case type code, number and filing year.
    CaseNumber {
        case_type: String,
        case_number: String,
        year: i32,
    },
    /// Diary number assigned at filing, with the filing year.
    DiaryNumber { diary_number: String, year: i32 },
    /// Petitioner or respondent name, with the filing year.
    PartyName { party_name: String, year: i32 },
}

/// Record a "required" error when `value` is blank; returns true if it was.
fn blank(errors: &mut HashMap<String, String>, field: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), format!("{field} is required"));
        true
    } else {
        false
    }
}

impl SearchQuery {
    pub fn search_type(&self) -> &'static str {
        match self {
            Self::Cnr { .. } => "cnr",
            Self::CaseNumber { .. } => "case_number",
            Self::DiaryNumber { .. } => "diary_number",
            Self::PartyName { .. } => "party_name",
        }
    }

    /// Lookup by CNR, normalizing the code to uppercase.
    pub fn by_cnr(cnr: &str) -> Self {
        Self::Cnr {
            cnr_number: normalize_cnr(cnr),
        }
    }

    /// Check the fields of this query. `current_year` anchors the year window.
    pub fn validate(&self, current_year: i32) -> Result<(), AppError> {
        let mut errors = HashMap::new();

        let year = match self {
            Self::Cnr { cnr_number } => {
                if !blank(&mut errors, "cnr_number", cnr_number)
                    && !is_valid_cnr(&normalize_cnr(cnr_number))
                {
                    errors.insert(
                        "cnr_number".to_string(),
                        format!("cnr_number must be {CNR_LENGTH} alphanumeric characters"),
                    );
                }
                None
            }
            Self::CaseNumber {
                case_type,
                case_number,
                year,
            } => {
                let missing_type = blank(&mut errors, "case_type", case_type);
                blank(&mut errors, "case_number", case_number);
                if !missing_type && !is_valid_case_type(case_type) {
                    errors.insert(
                        "case_type".to_string(),
                        format!("Unknown case type: {case_type}"),
                    );
                }
                Some(*year)
            }
            Self::DiaryNumber { diary_number, year } => {
                blank(&mut errors, "diary_number", diary_number);
                Some(*year)
            }
            Self::PartyName { party_name, year } => {
                blank(&mut errors, "party_name", party_name);
                Some(*year)
            }
        };

        if let Some(year) = year {
            let earliest = current_year - SEARCH_YEAR_WINDOW + 1;
            if year < earliest || year > current_year {
                errors.insert(
                    "year".to_string(),
                    format!("year must be between {earliest} and {current_year}"),
                );
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation("Invalid search", errors))
        }
    }
}

/// A case as returned by the external registry: no local id or sync state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RegistryCase {
    pub case_number: String,
    pub cnr_number: String,
    pub case_type: String,
    pub petitioner: String,
    pub respondent: String,
    pub court_name: String,
    pub status: String,
    pub filing_date: NaiveDate,
    #[serde(default)]
    pub next_hearing_date: Option<NaiveDate>,
    #[serde(default)]
    pub advocates: Advocates,
    #[serde(default)]
    pub history: Vec<HistoryEntryRequest>,
}

impl RegistryCase {
    /// Upsert request for tracking this case locally under `id`.
    pub fn into_request(self, id: impl Into<String>, sync_calendar: bool) -> UpsertCaseRequest {
        UpsertCaseRequest {
            id: id.into(),
            case_number: self.case_number,
            cnr_number: self.cnr_number,
            case_type: self.case_type,
            petitioner: self.petitioner,
            respondent: self.respondent,
            court_name: self.court_name,
            status: self.status,
            filing_date: self.filing_date.format("%Y-%m-%d").to_string(),
            next_hearing_date: self
                .next_hearing_date
                .map(|d| d.format("%Y-%m-%d").to_string()),
            advocates: self.advocates,
            history: self.history,
            sync_calendar,
            last_synced_at: None,
        }
    }
}
