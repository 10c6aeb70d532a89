// src/app.rs
use chrono::NaiveDate;
use tracing::{error, info};

use crate::bluesky::BlueskyPoster;
use crate::cli::{resolve_target, Cli};
use crate::config::AppConfig;
use crate::domain::Report;
use crate::mailer::SmtpMailer;
use crate::notify::{dispatch, Delivery, Notification, Notifier};
use crate::scraper::{load_calendar_file, CalendarResponse, MuseumScraper, ScraperError};

#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Nothing could be fetched or loaded; no report was produced.
    NoData,
    Reported {
        has_tickets: bool,
        deliveries: Vec<(&'static str, Delivery)>,
    },
}

/// The fixed set of channels, in delivery order.
pub fn default_notifiers(cfg: &AppConfig) -> Vec<Box<dyn Notifier>> {
    let mut notifiers: Vec<Box<dyn Notifier>> = vec![Box::new(SmtpMailer::new(cfg.smtp.clone()))];
    match BlueskyPoster::new(cfg.bluesky.clone(), cfg.museum.timeout) {
        Ok(poster) => notifiers.push(Box::new(poster)),
        Err(e) => error!("❌ Bluesky client init failed: {e}"),
    }
    notifiers
}

/// fetch → classify → format → notify. Every I/O failure is logged and the
/// step skipped; nothing here is fatal.
pub fn run(
    cli: &Cli,
    cfg: &AppConfig,
    today: NaiveDate,
    notifiers: &[Box<dyn Notifier>],
) -> RunOutcome {
    let report = match &cli.file {
        Some(path) => {
            let source = format!("File: {}", path.display());
            match load_calendar_file(path).and_then(CalendarResponse::into_calendar) {
                Ok(calendar) => Report::build(&calendar, source, today),
                Err(e) => {
                    report_load_error(&e);
                    return RunOutcome::NoData;
                }
            }
        }
        None => {
            let target = resolve_target(cli.year, cli.month.as_ref(), today);
            let scraper = match MuseumScraper::new(&cfg.museum) {
                Ok(s) => s,
                Err(e) => {
                    error!("❌ Scraper init failed: {e}");
                    return RunOutcome::NoData;
                }
            };

            let calendar = scraper.fetch_months(target.year, &target.months);
            if calendar.is_empty() {
                println!("No data found for the specified range.");
                return RunOutcome::NoData;
            }
            Report::build(&calendar, target.label, today)
        }
    };

    let rendered = report.render();
    println!("{rendered}");
    info!(
        "{} qualifying day(s) out of {}",
        report.qualifying_dates().len(),
        report.entries().len()
    );

    if !(report.has_tickets() || cli.always_send) {
        println!("\nEmail not sent (Use --always-send to force sending when no tickets are found).");
        return RunOutcome::Reported {
            has_tickets: false,
            deliveries: Vec::new(),
        };
    }

    let notification = Notification {
        subject: report.subject().to_string(),
        short_text: report.social_text(&cfg.museum.calendar_page_url()),
        body: rendered,
    };

    RunOutcome::Reported {
        has_tickets: report.has_tickets(),
        deliveries: dispatch(notifiers, &notification, cli.dry_run_email),
    }
}

fn report_load_error(err: &ScraperError) {
    match err {
        ScraperError::UnexpectedShape(_) => {
            println!("Error: JSON structure does not match expected format (data.calendar).")
        }
        ScraperError::FileNotFound(path) => println!("Error: File '{path}' not found."),
        other => println!("Error: {other}"),
    }
}
