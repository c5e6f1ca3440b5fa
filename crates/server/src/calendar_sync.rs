use std::future::Future;

use chrono::{Days, NaiveDate};
use shared_types::{LegalCase, ReminderSettings};

/// Pushes a case's next hearing, with reminders, to an external calendar.
pub trait CalendarSync: Send + Sync {
    fn sync_hearing(
        &self,
        case: &LegalCase,
        reminders: &ReminderSettings,
    ) -> impl Future<Output = Result<(), String>> + Send;
}

/// Reminder dates for a hearing, earliest first.
pub fn reminder_dates(hearing: NaiveDate, settings: &ReminderSettings) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(2);
    if settings.week_before {
        dates.extend(hearing.checked_sub_days(Days::new(7)));
    }
    if settings.day_before {
        dates.extend(hearing.checked_sub_days(Days::new(1)));
    }
    dates
}

/// Calendar sync that only records what it would push.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingCalendarSync;

impl CalendarSync for LoggingCalendarSync {
    async fn sync_hearing(
        &self,
        case: &LegalCase,
        reminders: &ReminderSettings,
    ) -> Result<(), String> {
        let Some(hearing) = case.next_hearing_date else {
            return Ok(());
        };
        let reminders: Vec<String> = reminder_dates(hearing, reminders)
            .iter()
            .map(NaiveDate::to_string)
            .collect();
        tracing::info!(
            case_id = %case.id,
            case_number = %case.case_number,
            %hearing,
            reminders = ?reminders,
            "hearing pushed to calendar"
        );
        Ok(())
    }
}
