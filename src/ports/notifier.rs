//! Notification port for outbound user-facing messages.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

/// Errors returned by notifier implementations.
#[derive(Debug, Clone, Error)]
pub enum NotifyError {
    /// The delivery channel rejected or never acknowledged the message.
    #[error("notification delivery failed: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotifyError {
    /// Wraps a delivery error.
    #[must_use]
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}

/// Outbound notification contract.
///
/// Deliveries are best effort: services log failures and carry on, so an
/// implementation must never be load-bearing for the operation that
/// triggered it.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Tells a user they have been assigned a task.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Delivery`] when the message cannot be sent.
    async fn task_assigned(
        &self,
        recipient: &str,
        task_title: &str,
        list_title: &str,
    ) -> Result<(), NotifyError>;

    /// Tells a list owner one of their tasks has been completed.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Delivery`] when the message cannot be sent.
    async fn task_completed(&self, recipient: &str, task_title: &str) -> Result<(), NotifyError>;
}
