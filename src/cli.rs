use chrono::{Datelike, NaiveDate};
use clap::builder::{BoolishValueParser, TypedValueParser};
use clap::{CommandFactory, Parser};
use std::ffi::OsStr;
use std::fmt;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Parser)]
#[command(
    name = "museum_ticket_watch",
    about = "Check Nintendo Museum ticket availability."
)]
pub struct Cli {
    /// Target year (e.g. 2026) [env: TARGET_YEAR]
    #[arg(long)]
    pub year: Option<i32>,

    /// Target month (1-12), range (e.g. "2-4") or list (e.g. "2,3,5") [env: TARGET_MONTH]
    #[arg(long, value_parser = parse_month_spec)]
    pub month: Option<MonthSpec>,

    /// Path to local JSON file (for testing)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Print notifications instead of sending them
    #[arg(long)]
    pub dry_run_email: bool,

    /// Notify even if no tickets are found [env: ALWAYS_SEND_EMAIL]
    #[arg(long)]
    pub always_send: bool,
}

impl Cli {
    /// Fills flags that were not given from `TARGET_YEAR`, `TARGET_MONTH` and
    /// `ALWAYS_SEND_EMAIL`. Blank values count as unset; values that don't
    /// parse are logged and ignored so a scheduled run still goes ahead.
    pub fn with_env_fallbacks<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if self.year.is_none() {
            if let Some(raw) = get("TARGET_YEAR") {
                match raw.parse::<i32>() {
                    Ok(year) => self.year = Some(year),
                    Err(_) => warn!("⚠️ Ignoring TARGET_YEAR='{raw}': not a year"),
                }
            }
        }

        if self.month.is_none() {
            if let Some(raw) = get("TARGET_MONTH") {
                match parse_month_spec(&raw) {
                    Ok(spec) => self.month = Some(spec),
                    Err(e) => warn!("⚠️ Ignoring TARGET_MONTH='{raw}': {e}"),
                }
            }
        }

        if !self.always_send {
            if let Some(raw) = get("ALWAYS_SEND_EMAIL") {
                let parsed =
                    BoolishValueParser::new().parse_ref(&Self::command(), None, OsStr::new(&raw));
                match parsed {
                    Ok(flag) => self.always_send = flag,
                    Err(_) => warn!("⚠️ Ignoring ALWAYS_SEND_EMAIL='{raw}': not a yes/no value"),
                }
            }
        }

        self
    }
}

/// A parsed `--month` value. Keeps the text the user typed for the report label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSpec {
    raw: String,
    months: Vec<u32>,
}

impl MonthSpec {
    pub fn months(&self) -> &[u32] {
        &self.months
    }
}

impl fmt::Display for MonthSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_month(raw: &str) -> Result<u32, String> {
    let month: u32 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a month number", raw.trim()))?;
    if !(1..=12).contains(&month) {
        return Err(format!("month {month} is outside 1-12"));
    }
    Ok(month)
}

pub fn parse_month_spec(raw: &str) -> Result<MonthSpec, String> {
    let trimmed = raw.trim();
    let months = if let Some((start, end)) = trimmed.split_once('-') {
        let (start, end) = (parse_month(start)?, parse_month(end)?);
        if start > end {
            return Err(format!("range {start}-{end} runs backwards"));
        }
        (start..=end).collect()
    } else if trimmed.contains(',') {
        let mut months: Vec<u32> = Vec::new();
        for part in trimmed.split(',') {
            let month = parse_month(part)?;
            if !months.contains(&month) {
                months.push(month);
            }
        }
        months
    } else {
        vec![parse_month(trimmed)?]
    };

    Ok(MonthSpec {
        raw: trimmed.to_string(),
        months,
    })
}

/// The year and months a run should fetch, plus the label for the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub year: i32,
    pub months: Vec<u32>,
    pub label: String,
}

/// Without `--month` the next calendar month is checked; when that wraps into
/// January and no year was given, the following year is used.
pub fn resolve_target(year: Option<i32>, month: Option<&MonthSpec>, today: NaiveDate) -> Target {
    match month {
        Some(spec) => {
            let year = year.unwrap_or(today.year());
            Target {
                year,
                months: spec.months().to_vec(),
                label: format!("{year} Months: {spec}"),
            }
        }
        None => {
            let next = today.month() % 12 + 1;
            let year = match year {
                Some(y) => y,
                None if next == 1 => today.year() + 1,
                None => today.year(),
            };
            Target {
                year,
                months: vec![next],
                label: format!("{year} Months: {next}"),
            }
        }
    }
}
