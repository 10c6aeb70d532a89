// errors.rs
use thiserror::Error;

/// Errors from the outbound notification channels (email, Bluesky).
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The channel's secret is not configured, so it is skipped.
    #[error("{0} not found in environment variables")]
    MissingCredential(&'static str),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("SMTP error: {0}")]
    Smtp(String),
}
