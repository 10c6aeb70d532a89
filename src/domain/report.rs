// src/domain/report.rs
use chrono::NaiveDate;

use crate::domain::logic::{classify_calendar, CalendarEntry};
use crate::domain::qualifying_dates;
use crate::scraper::Calendar;

pub const SUBJECT_ALERT: &str = "Nintendo Museum Tickets ALERT";
pub const SUBJECT_NONE: &str = "Nintendo Museum Tickets Not Available";

/// Bluesky rejects posts over 300 graphemes; counting chars stays under it.
const SOCIAL_LIMIT: usize = 300;

#[derive(Debug, Clone)]
pub struct Report {
    source: String,
    entries: Vec<CalendarEntry>,
    qualifying: Vec<String>,
}

impl Report {
    pub fn build(calendar: &Calendar, source: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            source: source.into(),
            entries: classify_calendar(calendar),
            qualifying: qualifying_dates(calendar, today),
        }
    }

    pub fn has_tickets(&self) -> bool {
        !self.qualifying.is_empty()
    }

    pub fn qualifying_dates(&self) -> &[String] {
        &self.qualifying
    }

    pub fn entries(&self) -> &[CalendarEntry] {
        &self.entries
    }

    pub fn subject(&self) -> &'static str {
        if self.has_tickets() {
            SUBJECT_ALERT
        } else {
            SUBJECT_NONE
        }
    }

    /// Banner with the qualifying days first, then the full status table.
    pub fn render(&self) -> String {
        let banner = "=".repeat(30);
        let mut out: Vec<String> = Vec::new();

        out.push(banner.clone());
        if self.has_tickets() {
            out.push(format!(
                "FOUND {} day(s) with SALE and OPEN status in [{}]:",
                self.qualifying.len(),
                self.source
            ));
            out.extend(self.qualifying.iter().map(|d| format!("- {d}")));
        } else {
            out.push(format!(
                "NO days found with SALE and OPEN status in [{}].",
                self.source
            ));
        }
        out.push(banner);
        out.push(String::new());

        let header = format!(
            "{:<12} | {:<12} | {:<12} | {:<15}",
            "Date", "Apply Type", "Sale Status", "Open Status"
        );
        let rule = "-".repeat(header.len());
        out.push(header);
        out.push(rule);

        for entry in &self.entries {
            out.push(format!(
                "{:<12} | {:<12} | {:<12} | {:<15}",
                entry.date, entry.apply_type, entry.sale_status, entry.open_status
            ));
        }

        out.join("\n")
    }

    /// Short post for social channels. Dates that don't fit are summarised.
    pub fn social_text(&self, calendar_url: &str) -> String {
        if !self.has_tickets() {
            let frame = format!("No Nintendo Museum ticket days on sale right now ().\n{calendar_url}");
            let room = SOCIAL_LIMIT.saturating_sub(frame.chars().count());
            let source = truncate_chars(&self.source, room);
            return truncate_chars(
                &format!(
                    "No Nintendo Museum ticket days on sale right now ({source}).\n{calendar_url}"
                ),
                SOCIAL_LIMIT,
            );
        }

        let head = format!(
            "🎟️ Nintendo Museum tickets on sale for {} day(s):",
            self.qualifying.len()
        );
        let tail = format!("\n{calendar_url}");

        let mut listed: Vec<&str> = Vec::new();
        for (idx, date) in self.qualifying.iter().enumerate() {
            let remaining = self.qualifying.len() - idx - 1;
            let mut candidate = listed.clone();
            candidate.push(date);
            let more = if remaining > 0 {
                format!(" …and {remaining} more")
            } else {
                String::new()
            };
            let text = format!("{head} {}{more}{tail}", candidate.join(", "));
            if text.chars().count() > SOCIAL_LIMIT {
                break;
            }
            listed = candidate;
        }

        let hidden = self.qualifying.len() - listed.len();
        let more = if hidden > 0 {
            format!(" …and {hidden} more")
        } else {
            String::new()
        };
        truncate_chars(
            &format!("{head} {}{more}{tail}", listed.join(", ")),
            SOCIAL_LIMIT,
        )
    }
}

/// Cuts `text` to at most `max` chars, marking the cut with `…`.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(max - 1).collect();
    cut.push('…');
    cut
}
