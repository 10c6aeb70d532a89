use crate::config::{AppConfig, BlueskyConfig, MuseumConfig, SmtpConfig};
use crate::errors::NotifyError;
use crate::notify::{Notification, Notifier};
use crate::scraper::{Calendar, CalendarResponse};
use chrono::NaiveDate;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

pub const CALENDAR_FIXTURE: &str = include_str!("fixtures/calendar_2026_02.json");

/// Parse the February 2026 fixture into a calendar.
pub fn fixture_calendar() -> Calendar {
    serde_json::from_str::<CalendarResponse>(CALENDAR_FIXTURE)
        .expect("fixture is valid JSON")
        .into_calendar()
        .expect("fixture has data.calendar")
}

/// "Today" for every fixture-based test.
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 2).unwrap()
}

/// Config pointing every outbound call at local mock servers.
pub fn test_config(museum_url: &str, bluesky_url: &str) -> AppConfig {
    AppConfig {
        museum: MuseumConfig {
            base_url: museum_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(5),
        },
        smtp: SmtpConfig::default(),
        bluesky: BlueskyConfig {
            service: bluesky_url.trim_end_matches('/').to_string(),
            handle: Some("watcher.bsky.social".to_string()),
            password: Some("app-password".to_string()),
        },
    }
}

/// Notifier that records what it was asked to send.
pub struct RecordingNotifier {
    pub name: &'static str,
    pub sent: Rc<RefCell<Vec<Notification>>>,
    pub result: fn() -> Result<(), NotifyError>,
}

impl RecordingNotifier {
    pub fn ok(name: &'static str) -> (Self, Rc<RefCell<Vec<Notification>>>) {
        Self::with_result(name, || Ok(()))
    }

    pub fn with_result(
        name: &'static str,
        result: fn() -> Result<(), NotifyError>,
    ) -> (Self, Rc<RefCell<Vec<Notification>>>) {
        let sent = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                name,
                sent: sent.clone(),
                result,
            },
            sent,
        )
    }
}

impl Notifier for RecordingNotifier {
    fn name(&self) -> &'static str {
        self.name
    }

    fn describe(&self) -> String {
        format!("deliver via {}", self.name)
    }

    fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.sent.borrow_mut().push(notification.clone());
        (self.result)()
    }
}
