//! Logging notification adapter.

use crate::config::SmtpConfig;
use crate::ports::{Notifier, NotifyError};
use async_trait::async_trait;

/// Notifier that records deliveries in the log instead of sending mail.
///
/// Stands in for a real mail relay during development. The configured
/// relay is reported with each message so log output shows where mail
/// would have gone.
#[derive(Debug, Clone)]
pub struct LoggingMailer {
    config: SmtpConfig,
}

impl LoggingMailer {
    /// Creates a mailer that logs against the given relay settings.
    #[must_use]
    pub const fn new(config: SmtpConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Notifier for LoggingMailer {
    async fn task_assigned(
        &self,
        recipient: &str,
        task_title: &str,
        list_title: &str,
    ) -> Result<(), NotifyError> {
        tracing::info!(
            relay = %self.config.server,
            recipient,
            task_title,
            list_title,
            "task assignment notification sent"
        );
        Ok(())
    }

    async fn task_completed(&self, recipient: &str, task_title: &str) -> Result<(), NotifyError> {
        tracing::info!(
            relay = %self.config.server,
            recipient,
            task_title,
            "task completion notification sent"
        );
        Ok(())
    }
}
