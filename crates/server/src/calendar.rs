use chrono::{Datelike, Months, NaiveDate};
use shared_types::{AppError, CalendarDay, CalendarMonth, LegalCase};

/// Number of days in `month` of `year`, from calendar arithmetic.
/// `None` when the month is not `1..=12` or the year is unrepresentable.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// Group cases by next hearing date into one bucket per day of the month.
///
/// Every day is present, empty or not. Cases without a hearing date are
/// never bucketed, and each bucket keeps the input order.
pub fn calendar_buckets(
    cases: &[LegalCase],
    year: i32,
    month: u32,
) -> Result<CalendarMonth, AppError> {
    if !(1..=12).contains(&month) {
        return Err(AppError::bad_request(format!(
            "Invalid month: {month} (expected 1-12)"
        )));
    }
    let day_count = days_in_month(year, month)
        .ok_or_else(|| AppError::bad_request(format!("Invalid year: {year}")))?;

    let mut days: Vec<CalendarDay> = (1..=day_count)
        .filter_map(|day| {
            NaiveDate::from_ymd_opt(year, month, day).map(|date| CalendarDay {
                day,
                date,
                cases: Vec::new(),
            })
        })
        .collect();

    for case in cases {
        let Some(hearing) = case.next_hearing_date else {
            continue;
        };
        if hearing.year() != year || hearing.month() != month {
            continue;
        }
        if let Some(bucket) = days.get_mut(hearing.day0() as usize) {
            bucket.cases.push(case.clone());
        }
    }

    Ok(CalendarMonth { year, month, days })
}

/// Cases with a hearing on or after `from`, soonest first; ties keep input order.
pub fn upcoming_hearings(cases: &[LegalCase], from: NaiveDate) -> Vec<LegalCase> {
    let mut upcoming: Vec<LegalCase> = cases
        .iter()
        .filter(|c| c.next_hearing_date.is_some_and(|d| d >= from))
        .cloned()
        .collect();
    upcoming.sort_by_key(|c| c.next_hearing_date);
    upcoming
}
