//! Driven port for the best-effort action log.
//!
//! Notifications are informational only. Callers never await them on the
//! request path; see [`crate::domain::ActionNotifier`].

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by action log sinks.
    pub enum ActionLogError {
        /// The sink could not accept the message.
        Unavailable { message: String } => "action log unavailable: {message}",
    }
}

/// Sink receiving one message per recorded action.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActionLog: Send + Sync {
    /// Record a single action message.
    async fn record(&self, message: &str) -> Result<(), ActionLogError>;
}

/// Sink that discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureActionLog;

#[async_trait]
impl ActionLog for FixtureActionLog {
    async fn record(&self, _message: &str) -> Result<(), ActionLogError> {
        Ok(())
    }
}
