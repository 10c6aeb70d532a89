use crate::cli::Cli;
use crate::config::AppConfig;
use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

mod app;
mod bluesky;
mod cli;
mod config;
mod domain;
mod errors;
mod mailer;
mod notify;
mod scraper;

#[cfg(test)]
mod tests;

fn main() {
    // 1️⃣ Pick up a local .env when there is one
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!("⚠️ Ignoring unreadable .env: {e}");
        }
    }

    // 2️⃣ Arguments, with TARGET_* env fallbacks
    let cli = Cli::parse().with_env_fallbacks(|key| std::env::var(key).ok());

    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("❌ Configuration error: {e}");
            std::process::exit(1);
        }
    };

    // 3️⃣ One pass of fetch → report → notify
    let today = chrono::Local::now().date_naive();
    let notifiers = app::default_notifiers(&cfg);
    app::run(&cli, &cfg, today, &notifiers);
}
