use serde::Deserialize;
use std::collections::BTreeMap;

use crate::scraper::ScraperError;

// response
//  └── data
//       └── calendar
//            ├── "2026-02-01"
//            │    ├── apply_type
//            │    ├── sale_status
//            │    └── open_status
//            └── ...

/// Raw day-level codes exactly as the API sends them. Kept as JSON values
/// so one odd code shows up as UNKNOWN instead of rejecting the month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DayStatus {
    pub apply_type: Option<serde_json::Value>,
    pub sale_status: Option<serde_json::Value>,
    pub open_status: Option<serde_json::Value>,
}

/// Date key (`YYYY-MM-DD`) to day status. BTreeMap keeps the dates sorted
/// and unique.
pub type Calendar = BTreeMap<String, DayStatus>;

#[derive(Debug, Deserialize)]
pub struct CalendarResponse {
    pub data: Option<CalendarData>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarData {
    #[serde(default)]
    pub calendar: Option<CalendarField>,
}

/// The API sends `[]` instead of `{}` for a month without any days.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CalendarField {
    Days(Calendar),
    Empty(Vec<serde_json::Value>),
}

impl CalendarResponse {
    pub fn into_calendar(self) -> Result<Calendar, ScraperError> {
        let field = self
            .data
            .and_then(|d| d.calendar)
            .ok_or_else(|| ScraperError::UnexpectedShape("data.calendar".to_string()))?;

        match field {
            CalendarField::Days(days) => Ok(days),
            CalendarField::Empty(items) if items.is_empty() => Ok(Calendar::new()),
            CalendarField::Empty(_) => Err(ScraperError::UnexpectedShape(
                "data.calendar is a non-empty list".to_string(),
            )),
        }
    }
}
