use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::AppError;

// ── Validation constants ────────────────────────────────────────────

/// Valid case status values. The set is exhaustive.
pub const CASE_STATUSES: &[&str] = &["pending", "disposed", "reserved"];

/// Court case-type codes and their descriptions.
pub const CASE_TYPES: &[(&str, &str)] = &[
    ("CIV", "Civil Suit"),
    ("CRL", "Criminal Case"),
    ("WPC", "Writ Petition (Civil)"),
    ("WPCRL", "Writ Petition (Criminal)"),
    ("CRLA", "Criminal Appeal"),
    ("RFA", "Regular First Appeal"),
    ("FAO", "First Appeal from Order"),
    ("ARB", "Arbitration Petition"),
    ("MAC", "Motor Accident Claim"),
    ("MAT", "Matrimonial Case"),
    ("EX", "Execution Petition"),
    ("BAIL", "Bail Application"),
];

/// Length of a CNR (Case Number Record) code.
pub const CNR_LENGTH: usize = 16;

/// Check whether a status string is a valid case status.
pub fn is_valid_case_status(s: &str) -> bool {
    CASE_STATUSES.contains(&s)
}

/// Check whether a case-type code is known (case-insensitive).
pub fn is_valid_case_type(code: &str) -> bool {
    case_type_description(code).is_some()
}

/// Look up the description of a case-type code (case-insensitive).
pub fn case_type_description(code: &str) -> Option<&'static str> {
    let code = code.trim();
    CASE_TYPES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, desc)| *desc)
}

/// A CNR is exactly 16 ASCII alphanumeric characters.
pub fn is_valid_cnr(cnr: &str) -> bool {
    cnr.len() == CNR_LENGTH && cnr.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Trim and uppercase a CNR as entered by a user.
pub fn normalize_cnr(cnr: &str) -> String {
    cnr.trim().to_ascii_uppercase()
}

// ── Status ──────────────────────────────────────────────────────────

/// Lifecycle status of a tracked case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Pending,
    Disposed,
    Reserved,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Disposed => "disposed",
            Self::Reserved => "reserved",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "disposed" => Some(Self::Disposed),
            "reserved" => Some(Self::Reserved),
            _ => None,
        }
    }

    /// Pending and reserved cases are still before the court.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Reserved)
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Stored records ──────────────────────────────────────────────────

/// Advocates appearing for each side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Advocates {
    #[serde(default)]
    pub petitioner: String,
    #[serde(default)]
    pub respondent: String,
}

/// One proceeding in a case's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CaseHistory {
    pub id: String,
    pub date: NaiveDate,
    pub purpose: String,
    /// Judicial order text, absent when no order was passed.
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub next_purpose: Option<String>,
}

/// A tracked court case.
///
/// `history` is stored oldest first; the last entry is the current posture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LegalCase {
    pub id: String,
    pub case_number: String,
    pub cnr_number: String,
    pub case_type: String,
    pub petitioner: String,
    pub respondent: String,
    pub court_name: String,
    pub status: CaseStatus,
    pub filing_date: NaiveDate,
    #[serde(default)]
    pub next_hearing_date: Option<NaiveDate>,
    #[serde(default)]
    pub advocates: Advocates,
    #[serde(default)]
    pub history: Vec<CaseHistory>,
    #[serde(default)]
    pub sync_calendar: bool,
    #[serde(default)]
    pub last_synced_at: Option<DateTime<Utc>>,
}

impl LegalCase {
    /// The most recent proceeding, if any.
    pub fn latest_history(&self) -> Option<&CaseHistory> {
        self.history.last()
    }

    pub fn case_type_description(&self) -> Option<&'static str> {
        case_type_description(&self.case_type)
    }

    /// "Petitioner vs. Respondent" title used by listings.
    pub fn title(&self) -> String {
        format!("{} vs. {}", self.petitioner, self.respondent)
    }
}

// ── Request types ───────────────────────────────────────────────────

/// A history entry as submitted for upsert. Dates are `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HistoryEntryRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub next_purpose: Option<String>,
}

/// Request to insert or replace a case record.
///
/// Every field is optional at the wire level so that missing fields are
/// reported through validation rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpsertCaseRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub case_number: String,
    #[serde(default)]
    pub cnr_number: String,
    #[serde(default)]
    pub case_type: String,
    #[serde(default)]
    pub petitioner: String,
    #[serde(default)]
    pub respondent: String,
    #[serde(default)]
    pub court_name: String,
    /// One of `pending`, `disposed`, `reserved`.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub filing_date: String,
    #[serde(default)]
    pub next_hearing_date: Option<String>,
    #[serde(default)]
    pub advocates: Advocates,
    #[serde(default)]
    pub history: Vec<HistoryEntryRequest>,
    #[serde(default)]
    pub sync_calendar: bool,
    /// RFC 3339 timestamp.
    #[serde(default)]
    pub last_synced_at: Option<String>,
}

impl From<&CaseHistory> for HistoryEntryRequest {
    fn from(h: &CaseHistory) -> Self {
        Self {
            id: h.id.clone(),
            date: h.date.format("%Y-%m-%d").to_string(),
            purpose: h.purpose.clone(),
            order: h.order.clone(),
            next_purpose: h.next_purpose.clone(),
        }
    }
}

impl From<&LegalCase> for UpsertCaseRequest {
    fn from(c: &LegalCase) -> Self {
        Self {
            id: c.id.clone(),
            case_number: c.case_number.clone(),
            cnr_number: c.cnr_number.clone(),
            case_type: c.case_type.clone(),
            petitioner: c.petitioner.clone(),
            respondent: c.respondent.clone(),
            court_name: c.court_name.clone(),
            status: c.status.as_str().to_string(),
            filing_date: c.filing_date.format("%Y-%m-%d").to_string(),
            next_hearing_date: c
                .next_hearing_date
                .map(|d| d.format("%Y-%m-%d").to_string()),
            advocates: c.advocates.clone(),
            history: c.history.iter().map(HistoryEntryRequest::from).collect(),
            sync_calendar: c.sync_calendar,
            last_synced_at: c.last_synced_at.map(|t| t.to_rfc3339()),
        }
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn require(errors: &mut HashMap<String, String>, field: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), format!("{field} is required"));
        false
    } else {
        true
    }
}

/// Optional free text: blank strings collapse to `None`.
fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_history(
    entries: Vec<HistoryEntryRequest>,
    errors: &mut HashMap<String, String>,
) -> Vec<CaseHistory> {
    let mut seen = HashSet::new();
    let mut previous: Option<NaiveDate> = None;
    let mut history = Vec::with_capacity(entries.len());

    for (i, entry) in entries.into_iter().enumerate() {
        let prefix = format!("history[{i}]");

        if require(errors, &format!("{prefix}.id"), &entry.id) && !seen.insert(entry.id.clone()) {
            errors.insert(
                format!("{prefix}.id"),
                format!("duplicate history id: {}", entry.id),
            );
        }
        require(errors, &format!("{prefix}.purpose"), &entry.purpose);

        let date = if require(errors, &format!("{prefix}.date"), &entry.date) {
            match parse_date(&entry.date) {
                Some(d) => Some(d),
                None => {
                    errors.insert(
                        format!("{prefix}.date"),
                        format!("invalid date: {} (expected YYYY-MM-DD)", entry.date),
                    );
                    None
                }
            }
        } else {
            None
        };

        if let Some(d) = date {
            if previous.is_some_and(|p| d < p) {
                errors.insert(
                    format!("{prefix}.date"),
                    "history must be in chronological order".to_string(),
                );
            }
            previous = Some(d);
            history.push(CaseHistory {
                id: entry.id.trim().to_string(),
                date: d,
                purpose: entry.purpose.trim().to_string(),
                order: optional_text(entry.order),
                next_purpose: optional_text(entry.next_purpose),
            });
        }
    }

    history
}

impl TryFrom<UpsertCaseRequest> for LegalCase {
    type Error = AppError;

    /// Validate every field, reporting all failures at once.
    fn try_from(req: UpsertCaseRequest) -> Result<Self, Self::Error> {
        let mut errors = HashMap::new();

        for (field, value) in [
            ("id", &req.id),
            ("case_number", &req.case_number),
            ("petitioner", &req.petitioner),
            ("respondent", &req.respondent),
            ("court_name", &req.court_name),
        ] {
            require(&mut errors, field, value);
        }

        let status = if require(&mut errors, "status", &req.status) {
            let status = CaseStatus::from_str_opt(req.status.trim());
            if status.is_none() {
                errors.insert(
                    "status".to_string(),
                    format!(
                        "Invalid status: {}. Valid values: {}",
                        req.status,
                        CASE_STATUSES.join(", ")
                    ),
                );
            }
            status
        } else {
            None
        };

        let case_type = req.case_type.trim().to_ascii_uppercase();
        if require(&mut errors, "case_type", &case_type) && !is_valid_case_type(&case_type) {
            errors.insert(
                "case_type".to_string(),
                format!("Unknown case type: {}", req.case_type),
            );
        }

        let cnr_number = normalize_cnr(&req.cnr_number);
        if require(&mut errors, "cnr_number", &cnr_number) && !is_valid_cnr(&cnr_number) {
            errors.insert(
                "cnr_number".to_string(),
                format!("cnr_number must be {CNR_LENGTH} alphanumeric characters"),
            );
        }

        let filing_date = if require(&mut errors, "filing_date", &req.filing_date) {
            let parsed = parse_date(&req.filing_date);
            if parsed.is_none() {
                errors.insert(
                    "filing_date".to_string(),
                    format!("invalid date: {} (expected YYYY-MM-DD)", req.filing_date),
                );
            }
            parsed
        } else {
            None
        };

        let next_hearing_date = match optional_text(req.next_hearing_date) {
            None => None,
            Some(raw) => {
                let parsed = parse_date(&raw);
                if parsed.is_none() {
                    errors.insert(
                        "next_hearing_date".to_string(),
                        format!("invalid date: {raw} (expected YYYY-MM-DD)"),
                    );
                }
                parsed
            }
        };

        let last_synced_at = match optional_text(req.last_synced_at) {
            None => None,
            Some(raw) => match DateTime::parse_from_rfc3339(&raw) {
                Ok(t) => Some(t.with_timezone(&Utc)),
                Err(_) => {
                    errors.insert(
                        "last_synced_at".to_string(),
                        format!("invalid timestamp: {raw} (expected RFC 3339)"),
                    );
                    None
                }
            },
        };

        let history = validate_history(req.history, &mut errors);

        let (Some(status), Some(filing_date)) = (status, filing_date) else {
            return Err(AppError::validation("Validation failed", errors));
        };
        if !errors.is_empty() {
            return Err(AppError::validation("Validation failed", errors));
        }

        Ok(Self {
            id: req.id.trim().to_string(),
            case_number: req.case_number.trim().to_string(),
            cnr_number,
            case_type,
            petitioner: req.petitioner.trim().to_string(),
            respondent: req.respondent.trim().to_string(),
            court_name: req.court_name.trim().to_string(),
            status,
            filing_date,
            next_hearing_date,
            advocates: Advocates {
                petitioner: req.advocates.petitioner.trim().to_string(),
                respondent: req.advocates.respondent.trim().to_string(),
            },
            history,
            sync_calendar: req.sync_calendar,
            last_synced_at,
        })
    }
}

/// Request to toggle calendar sync for a case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SetCalendarSyncRequest {
    pub enabled: bool,
}

// ── Query types ─────────────────────────────────────────────────────

/// Status filter for case listings. `All` matches every case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Disposed,
    Reserved,
}

impl StatusFilter {
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            other => CaseStatus::from_str_opt(other).map(Self::from),
        }
    }

    pub fn matches(&self, status: CaseStatus) -> bool {
        match self {
            Self::All => true,
            Self::Pending => status == CaseStatus::Pending,
            Self::Disposed => status == CaseStatus::Disposed,
            Self::Reserved => status == CaseStatus::Reserved,
        }
    }
}

impl From<CaseStatus> for StatusFilter {
    fn from(status: CaseStatus) -> Self {
        match status {
            CaseStatus::Pending => Self::Pending,
            CaseStatus::Disposed => Self::Disposed,
            CaseStatus::Reserved => Self::Reserved,
        }
    }
}

/// Explicit result ordering. `Insertion` keeps store order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum CaseSort {
    #[default]
    Insertion,
    /// Soonest hearing first; cases without a hearing last.
    NextHearing,
    /// Most recently filed first.
    FilingDate,
}

impl CaseSort {
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "insertion" => Some(Self::Insertion),
            "next_hearing" => Some(Self::NextHearing),
            "filing_date" => Some(Self::FilingDate),
            _ => None,
        }
    }
}

/// Query parameters for case search.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct CaseSearchParams {
    /// `all`, `pending`, `disposed` or `reserved`.
    pub status: Option<String>,
    /// Free-text match against case number, parties and CNR.
    pub q: Option<String>,
    /// Inclusive lower bound on the next hearing date (`YYYY-MM-DD`).
    pub hearing_from: Option<String>,
    /// Inclusive upper bound on the next hearing date (`YYYY-MM-DD`).
    pub hearing_to: Option<String>,
    /// `insertion`, `next_hearing` or `filing_date`.
    pub sort: Option<String>,
}

/// Search response for cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CaseSearchResponse {
    pub cases: Vec<LegalCase>,
    pub total: usize,
}

/// Dashboard counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CaseSummary {
    pub total: usize,
    /// Pending plus reserved.
    pub active: usize,
    pub disposed: usize,
    /// Cases with a next hearing date set.
    pub scheduled_hearings: usize,
}

/// Result of refreshing one case from the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RefreshOutcome {
    pub case_id: String,
    pub refreshed: bool,
    /// Failure message when `refreshed` is false.
    #[serde(default)]
    pub error: Option<String>,
}
