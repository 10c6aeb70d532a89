// src/config.rs
use std::env;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct MuseumConfig {
    /// Scheme + host of the ticketing site, no trailing slash.
    /// Example: "https://museum-tickets.nintendo.com"
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for MuseumConfig {
    fn default() -> Self {
        Self {
            base_url: "https://museum-tickets.nintendo.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl MuseumConfig {
    pub fn calendar_page_url(&self) -> String {
        format!("{}/en/calendar", self.base_url)
    }

    pub fn calendar_api_url(&self) -> String {
        format!("{}/en/api/calendar", self.base_url)
    }
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub to: String,
    /// Email is only sent when this is present.
    pub password: Option<String>,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            user: String::new(),
            to: String::new(),
            password: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BlueskyConfig {
    pub service: String,
    pub handle: Option<String>,
    pub password: Option<String>,
}

impl Default for BlueskyConfig {
    fn default() -> Self {
        Self {
            service: "https://bsky.social".to_string(),
            handle: None,
            password: None,
        }
    }
}

impl BlueskyConfig {
    /// Both the handle and the app password must be set for posting.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.handle.as_deref(), self.password.as_deref()) {
            (Some(h), Some(p)) => Some((h, p)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub museum: MuseumConfig,
    pub smtp: SmtpConfig,
    pub bluesky: BlueskyConfig,
}

impl AppConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset, the same way CI secrets show up when missing.
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut cfg = AppConfig::default();

        if let Some(url) = get("MUSEUM_BASE_URL") {
            cfg.museum.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = get("HTTP_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "HTTP_TIMEOUT_SECS",
                value: raw.clone(),
            })?;
            cfg.museum.timeout = Duration::from_secs(secs);
        }

        if let Some(host) = get("SMTP_HOST") {
            cfg.smtp.host = host;
        }
        if let Some(raw) = get("SMTP_PORT") {
            cfg.smtp.port = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "SMTP_PORT",
                value: raw.clone(),
            })?;
        }
        if let Some(user) = get("SMTP_USER") {
            cfg.smtp.user = user;
        }
        if let Some(to) = get("EMAIL_TO") {
            cfg.smtp.to = to;
        }
        cfg.smtp.password = get("SMTP_PASSWORD");

        if let Some(service) = get("BLUESKY_SERVICE") {
            cfg.bluesky.service = service.trim_end_matches('/').to_string();
        }
        cfg.bluesky.handle = get("BLUESKY_HANDLE");
        cfg.bluesky.password = get("BLUESKY_PASSWORD");

        Ok(cfg)
    }
}
