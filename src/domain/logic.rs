// src/domain/logic.rs

use chrono::NaiveDate;

use crate::domain::status::{ApplyType, OpenStatus, SaleStatus};
use crate::scraper::{Calendar, DayStatus};

/// One calendar day with its codes already classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEntry {
    /// ISO date, `YYYY-MM-DD`.
    pub date: String,
    pub apply_type: ApplyType,
    pub sale_status: SaleStatus,
    pub open_status: OpenStatus,
}

impl CalendarEntry {
    pub fn classify(date: &str, day: &DayStatus) -> Self {
        Self {
            date: date.to_string(),
            apply_type: day.apply_type.as_ref().into(),
            sale_status: day.sale_status.as_ref().into(),
            open_status: day.open_status.as_ref().into(),
        }
    }

    /// A day is worth reporting when tickets are on sale, the museum is open,
    /// and the day is still ahead of us.
    ///
    /// ISO dates order the same way as strings, so the comparison is done on
    /// the raw key and never fails on an odd date format.
    pub fn is_qualifying(&self, today: NaiveDate) -> bool {
        let today = today.format("%Y-%m-%d").to_string();
        self.sale_status == SaleStatus::Sale
            && self.open_status == OpenStatus::Open
            && self.date.as_str() > today.as_str()
    }
}

/// Classifies every day of the calendar in ascending date order.
pub fn classify_calendar(calendar: &Calendar) -> Vec<CalendarEntry> {
    calendar
        .iter()
        .map(|(date, day)| CalendarEntry::classify(date, day))
        .collect()
}

/// Dates that are on sale, open, and strictly after `today`, ascending.
pub fn qualifying_dates(calendar: &Calendar, today: NaiveDate) -> Vec<String> {
    classify_calendar(calendar)
        .into_iter()
        .filter(|entry| entry.is_qualifying(today))
        .map(|entry| entry.date)
        .collect()
}
