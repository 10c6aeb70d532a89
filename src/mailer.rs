// src/mailer.rs

use crate::config::SmtpConfig;
use crate::errors::NotifyError;
use crate::notify::{Notification, Notifier};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::info;

/// Plain-text report over STARTTLS SMTP.
pub struct SmtpMailer {
    cfg: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(cfg: SmtpConfig) -> Self {
        Self { cfg }
    }

    fn mailbox(raw: &str, what: &str) -> Result<Mailbox, NotifyError> {
        raw.parse::<Mailbox>()
            .map_err(|e| NotifyError::Config(format!("invalid {what} address '{raw}': {e}")))
    }

    pub fn build_message(&self, notification: &Notification) -> Result<Message, NotifyError> {
        Message::builder()
            .from(Self::mailbox(&self.cfg.user, "sender")?)
            .to(Self::mailbox(&self.cfg.to, "recipient")?)
            .subject(notification.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body.clone())
            .map_err(|e| NotifyError::Config(e.to_string()))
    }
}

impl Notifier for SmtpMailer {
    fn name(&self) -> &'static str {
        "email"
    }

    fn describe(&self) -> String {
        format!(
            "send email to {} from {} using {}:{}",
            or_unset(&self.cfg.to),
            or_unset(&self.cfg.user),
            self.cfg.host,
            self.cfg.port
        )
    }

    fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let password = self
            .cfg
            .password
            .as_ref()
            .ok_or(NotifyError::MissingCredential("SMTP_PASSWORD"))?;

        let message = self.build_message(notification)?;

        let transport = SmtpTransport::starttls_relay(&self.cfg.host)
            .map_err(|e| NotifyError::Smtp(e.to_string()))?
            .port(self.cfg.port)
            .credentials(Credentials::new(self.cfg.user.clone(), password.clone()))
            .build();

        transport
            .send(&message)
            .map_err(|e| NotifyError::Smtp(e.to_string()))?;

        info!("📧 Email sent successfully to {}", self.cfg.to);
        Ok(())
    }
}

fn or_unset(address: &str) -> &str {
    if address.trim().is_empty() {
        "<unset>"
    } else {
        address
    }
}
