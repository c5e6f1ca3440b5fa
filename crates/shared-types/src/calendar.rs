use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{CaseHistory, LegalCase};

/// Cases whose next hearing falls on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CalendarDay {
    /// Day of month, 1-based.
    pub day: u32,
    pub date: NaiveDate,
    /// In store order. Empty when nothing is listed that day.
    pub cases: Vec<LegalCase>,
}

/// Every day of a month with its hearings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

impl CalendarMonth {
    /// Bucket for a day of month, `None` outside `1..=days.len()`.
    pub fn bucket(&self, day: u32) -> Option<&CalendarDay> {
        let index = usize::try_from(day).ok()?.checked_sub(1)?;
        self.days.get(index)
    }

    /// Total hearings listed across the month.
    pub fn hearing_count(&self) -> usize {
        self.days.iter().map(|d| d.cases.len()).sum()
    }
}

/// Query parameters for the upcoming-hearings list.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct UpcomingParams {
    /// First day to include (`YYYY-MM-DD`). Defaults to today.
    pub from: Option<String>,
}

/// A history entry annotated for timeline display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TimelineEntry {
    #[serde(flatten)]
    pub entry: CaseHistory,
    pub has_order: bool,
    /// Only the final entry of the sequence.
    pub is_latest: bool,
}
