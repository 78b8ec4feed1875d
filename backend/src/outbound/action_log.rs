//! Action log sink writing to the `action_log` tracing target.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{ActionLog, ActionLogError};

/// Default artificial delay applied before each record is written.
pub const DEFAULT_ACTION_LOG_DELAY: Duration = Duration::from_millis(100);

/// Sink emitting one `info` event per action after a fixed delay.
#[derive(Debug, Clone, Copy)]
pub struct TracingActionLog {
    delay: Duration,
}

impl TracingActionLog {
    /// Create a sink that waits `delay` before each record.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for TracingActionLog {
    fn default() -> Self {
        Self::new(DEFAULT_ACTION_LOG_DELAY)
    }
}

#[async_trait]
impl ActionLog for TracingActionLog {
    async fn record(&self, message: &str) -> Result<(), ActionLogError> {
        tokio::time::sleep(self.delay).await;
        info!(target: "action_log", message, "action recorded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tokio::time::Instant;

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn record_waits_for_configured_delay() {
        let sink = TracingActionLog::new(Duration::from_millis(250));
        let started = Instant::now();

        sink.record("users listed").await.expect("record succeeds");

        assert!(started.elapsed() >= Duration::from_millis(250));
    }

    #[rstest]
    fn default_delay_is_one_hundred_millis() {
        assert_eq!(TracingActionLog::default().delay(), DEFAULT_ACTION_LOG_DELAY);
    }
}
