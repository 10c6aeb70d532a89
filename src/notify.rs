// src/notify.rs
use crate::errors::NotifyError;
use tracing::{error, info, warn};

/// What every channel gets to deliver for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    /// Full report, used by email.
    pub body: String,
    /// Short form for length-limited channels.
    pub short_text: String,
}

pub trait Notifier {
    fn name(&self) -> &'static str;

    /// One line describing where a delivery would go, used for dry runs.
    fn describe(&self) -> String;

    /// What a dry run prints in place of the delivery.
    fn preview(&self, notification: &Notification) -> String {
        format!(
            "Subject: {}\nBody:\n{}",
            notification.subject, notification.body
        )
    }

    fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    DryRun,
    Skipped(String),
    Failed(String),
}

/// Hands the notification to every channel in order. A channel that fails
/// is logged and the next one still runs.
pub fn dispatch(
    notifiers: &[Box<dyn Notifier>],
    notification: &Notification,
    dry_run: bool,
) -> Vec<(&'static str, Delivery)> {
    notifiers
        .iter()
        .map(|notifier| {
            let name = notifier.name();
            if dry_run {
                println!("\n[Dry Run] Would {}", notifier.describe());
                println!("{}", notifier.preview(notification));
                return (name, Delivery::DryRun);
            }

            let outcome = match notifier.send(notification) {
                Ok(()) => {
                    info!("✅ {name} notification sent");
                    Delivery::Sent
                }
                Err(e @ NotifyError::MissingCredential(_)) => {
                    warn!("⚠️ {e}. {name} notification not sent.");
                    Delivery::Skipped(e.to_string())
                }
                Err(e) => {
                    error!("❌ Error sending {name} notification: {e}");
                    Delivery::Failed(e.to_string())
                }
            };
            (name, outcome)
        })
        .collect()
}
