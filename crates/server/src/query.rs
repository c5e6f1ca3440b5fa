use chrono::NaiveDate;
use shared_types::{
    AppError, CaseSearchParams, CaseSort, CaseSummary, LegalCase, StatusFilter, CASE_STATUSES,
};

/// Filter and ordering for a case listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseFilter {
    pub status: StatusFilter,
    /// Case-insensitive substring; blank matches everything.
    pub text: String,
    pub hearing_from: Option<NaiveDate>,
    pub hearing_to: Option<NaiveDate>,
    pub sort: CaseSort,
}

impl CaseFilter {
    pub fn status(status: StatusFilter) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    fn has_hearing_range(&self) -> bool {
        self.hearing_from.is_some() || self.hearing_to.is_some()
    }

    /// Whether `case` passes every predicate of this filter.
    /// `needle` is the lowercased text query; only an empty query matches
    /// every case.
    fn matches(&self, case: &LegalCase, needle: &str) -> bool {
        if !self.status.matches(case.status) {
            return false;
        }
        if !needle.is_empty() && !matches_text(case, needle) {
            return false;
        }
        if self.has_hearing_range() {
            let Some(hearing) = case.next_hearing_date else {
                return false;
            };
            if self.hearing_from.is_some_and(|from| hearing < from)
                || self.hearing_to.is_some_and(|to| hearing > to)
            {
                return false;
            }
        }
        true
    }
}

fn parse_param_date(field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                AppError::bad_request(format!("Invalid {field}: {s} (expected YYYY-MM-DD)"))
            }),
    }
}

impl TryFrom<CaseSearchParams> for CaseFilter {
    type Error = AppError;

    fn try_from(params: CaseSearchParams) -> Result<Self, Self::Error> {
        let status = match params.status.as_deref().map(str::trim) {
            None | Some("") => StatusFilter::All,
            Some(s) => StatusFilter::from_str_opt(s).ok_or_else(|| {
                AppError::bad_request(format!(
                    "Invalid status: {}. Valid values: all, {}",
                    s,
                    CASE_STATUSES.join(", ")
                ))
            })?,
        };

        let sort = match params.sort.as_deref().map(str::trim) {
            None | Some("") => CaseSort::Insertion,
            Some(s) => CaseSort::from_str_opt(s).ok_or_else(|| {
                AppError::bad_request(format!(
                    "Invalid sort: {s}. Valid values: insertion, next_hearing, filing_date"
                ))
            })?,
        };

        let hearing_from = parse_param_date("hearing_from", params.hearing_from.as_deref())?;
        let hearing_to = parse_param_date("hearing_to", params.hearing_to.as_deref())?;
        if let (Some(from), Some(to)) = (hearing_from, hearing_to) {
            if from > to {
                return Err(AppError::bad_request("hearing_from must not be after hearing_to"));
            }
        }

        Ok(Self {
            status,
            text: params.q.unwrap_or_default(),
            hearing_from,
            hearing_to,
            sort,
        })
    }
}

/// Case number, parties and CNR are searchable.
fn matches_text(case: &LegalCase, needle: &str) -> bool {
    [
        &case.case_number,
        &case.petitioner,
        &case.respondent,
        &case.cnr_number,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

/// Filter and order `cases` (a store snapshot in insertion order).
///
/// Pure: the input is never modified and every call returns a fresh list.
pub fn query_cases(cases: &[LegalCase], filter: &CaseFilter) -> Vec<LegalCase> {
    let needle = filter.text.to_lowercase();
    let mut results: Vec<LegalCase> = cases
        .iter()
        .filter(|c| filter.matches(c, &needle))
        .cloned()
        .collect();

    // `sort_by` is stable, so ties keep store order.
    match filter.sort {
        CaseSort::Insertion => {}
        CaseSort::NextHearing => results.sort_by(|a, b| {
            match (a.next_hearing_date, b.next_hearing_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        }),
        CaseSort::FilingDate => results.sort_by(|a, b| b.filing_date.cmp(&a.filing_date)),
    }

    results
}

/// Pending and reserved cases.
pub fn active_cases(cases: &[LegalCase]) -> Vec<LegalCase> {
    cases
        .iter()
        .filter(|c| c.status.is_active())
        .cloned()
        .collect()
}

pub fn disposed_count(cases: &[LegalCase]) -> usize {
    cases.iter().filter(|c| !c.status.is_active()).count()
}

/// Cases with a next hearing date set.
pub fn cases_with_hearing(cases: &[LegalCase]) -> Vec<LegalCase> {
    cases
        .iter()
        .filter(|c| c.next_hearing_date.is_some())
        .cloned()
        .collect()
}

pub fn summarize(cases: &[LegalCase]) -> CaseSummary {
    CaseSummary {
        total: cases.len(),
        active: cases.iter().filter(|c| c.status.is_active()).count(),
        disposed: disposed_count(cases),
        scheduled_hearings: cases.iter().filter(|c| c.next_hearing_date.is_some()).count(),
    }
}
