//! Best-effort email notification for contact submissions.
//!
//! [`ContactNotifier::send_contact_email`] never returns an error: missing
//! credentials are logged as a warning and every build or delivery failure
//! is logged as an error. The stored submission stays the durable record.

pub mod smtp;
pub mod template;

use std::sync::Arc;

use async_trait::async_trait;
use lettre::Message;

pub use smtp::SmtpRelay;

use crate::config::SmtpConfig;
use crate::domain::ContactForm;

/// Errors raised while building or delivering a notification.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// An address could not be parsed.
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The message could not be assembled.
    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    /// The SMTP exchange failed.
    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Any other transport failure.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Outbound mail delivery.
#[async_trait]
pub trait MailTransport: Send + Sync + std::fmt::Debug {
    /// Delivers `message` in a single attempt.
    ///
    /// # Errors
    ///
    /// Returns a [`NotifyError`] if delivery fails.
    async fn deliver(&self, message: Message) -> Result<(), NotifyError>;
}

/// Sends operator notifications for contact submissions.
#[derive(Debug, Clone)]
pub struct ContactNotifier {
    config: SmtpConfig,
    transport: Arc<dyn MailTransport>,
}

impl ContactNotifier {
    /// Creates a notifier delivering through `transport`.
    #[must_use]
    pub fn new(config: SmtpConfig, transport: Arc<dyn MailTransport>) -> Self {
        Self { config, transport }
    }

    /// Creates a notifier delivering through the configured SMTP relay.
    #[must_use]
    pub fn from_config(config: SmtpConfig) -> Self {
        let transport = Arc::new(SmtpRelay::new(config.clone()));
        Self::new(config, transport)
    }

    /// Notifies the operator about `form`.
    ///
    /// Does nothing but warn when SMTP credentials are absent. Failures are
    /// logged and swallowed.
    #[tracing::instrument(skip_all, fields(company = %form.company))]
    pub async fn send_contact_email(&self, form: &ContactForm) {
        if !self.config.has_credentials() {
            tracing::warn!("SMTP credentials not configured. Email not sent.");
            return;
        }

        let message = match template::contact_message(&self.config, form) {
            Ok(message) => message,
            Err(e) => {
                tracing::error!(error = %e, "failed to build contact email");
                return;
            }
        };

        match self.transport.deliver(message).await {
            Ok(()) => {
                tracing::info!(recipient = %self.config.recipient, "contact email sent");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to send contact email");
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Transports that record or fail instead of talking SMTP.

    use std::sync::Mutex;

    use super::*;

    /// Keeps every delivered message in memory.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingTransport {
        sent: Mutex<Vec<Message>>,
    }

    impl RecordingTransport {
        pub(crate) fn sent_count(&self) -> usize {
            self.sent.lock().map_or(0, |sent| sent.len())
        }

        pub(crate) fn last_formatted(&self) -> Option<String> {
            let sent = self.sent.lock().ok()?;
            sent.last()
                .map(|m| String::from_utf8_lossy(&m.formatted()).into_owned())
        }
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn deliver(&self, message: Message) -> Result<(), NotifyError> {
            if let Ok(mut sent) = self.sent.lock() {
                sent.push(message);
            }
            Ok(())
        }
    }

    /// Rejects every message.
    #[derive(Debug, Default)]
    pub(crate) struct FailingTransport;

    #[async_trait]
    impl MailTransport for FailingTransport {
        async fn deliver(&self, _message: Message) -> Result<(), NotifyError> {
            Err(NotifyError::Transport("relay unavailable".to_string()))
        }
    }

    pub(crate) fn smtp_config(with_credentials: bool) -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            user: if with_credentials {
                "bot@example.com".to_string()
            } else {
                String::new()
            },
            password: if with_credentials {
                "secret".to_string()
            } else {
                String::new()
            },
            recipient: "ops@example.com".to_string(),
        }
    }

    pub(crate) fn sample_form() -> ContactForm {
        ContactForm {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            company: "Analytical Engines".to_string(),
            message: "Interested in a pilot.".to_string(),
        }
    }
}
