//! SMTP relay delivery over STARTTLS.

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{MailTransport, NotifyError};
use crate::config::SmtpConfig;

/// Delivers mail through the configured SMTP relay.
///
/// Every delivery opens its own connection: connect, STARTTLS,
/// authenticate, send, quit. No pooling and no retry.
#[derive(Debug, Clone)]
pub struct SmtpRelay {
    config: SmtpConfig,
}

impl SmtpRelay {
    /// Creates a relay client for `config`.
    #[must_use]
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, NotifyError> {
        let credentials = Credentials::new(self.config.user.clone(), self.config.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)?
            .port(self.config.port)
            .credentials(credentials)
            .build();
        Ok(transport)
    }
}

#[async_trait]
impl MailTransport for SmtpRelay {
    async fn deliver(&self, message: Message) -> Result<(), NotifyError> {
        let transport = self.transport()?;
        let response = transport.send(message).await?;
        tracing::debug!(
            host = %self.config.host,
            port = self.config.port,
            code = %response.code(),
            "smtp relay accepted message"
        );
        Ok(())
    }
}
