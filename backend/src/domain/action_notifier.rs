//! Fire-and-forget dispatch to the action log.
//!
//! Each notification runs on its own detached tokio task. Request handlers
//! never await the returned handle; tests may, to observe delivery.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::warn;

use super::TraceId;
use super::ports::ActionLog;

/// Detached sender for action log messages.
#[derive(Clone)]
pub struct ActionNotifier {
    sink: Arc<dyn ActionLog>,
}

impl ActionNotifier {
    /// Create a notifier delivering to `sink`.
    pub fn new(sink: Arc<dyn ActionLog>) -> Self {
        Self { sink }
    }

    /// Spawn delivery of `message`; failures are logged and dropped.
    ///
    /// The caller's trace identifier, if any, is re-entered on the spawned
    /// task.
    pub fn notify(&self, message: impl Into<String>) -> JoinHandle<()> {
        let sink = Arc::clone(&self.sink);
        let message = message.into();
        let delivery = async move {
            if let Err(error) = sink.record(&message).await {
                warn!(%error, "action log delivery failed");
            }
        };
        match TraceId::current() {
            Some(trace_id) => tokio::spawn(TraceId::scope(trace_id, delivery)),
            None => tokio::spawn(delivery),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{ActionLogError, MockActionLog};
    use mockall::predicate::eq;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn notify_delivers_message() {
        let mut sink = MockActionLog::new();
        sink.expect_record()
            .with(eq("user created: Ada"))
            .times(1)
            .return_once(|_| Ok(()));
        let notifier = ActionNotifier::new(Arc::new(sink));

        notifier
            .notify("user created: Ada")
            .await
            .expect("notification task");
    }

    #[rstest]
    #[tokio::test]
    async fn notify_swallows_sink_failure() {
        let mut sink = MockActionLog::new();
        sink.expect_record()
            .times(1)
            .return_once(|_| Err(ActionLogError::unavailable("offline")));
        let notifier = ActionNotifier::new(Arc::new(sink));

        notifier.notify("users listed").await.expect("task does not panic");
    }

    #[tokio::test]
    async fn notify_propagates_trace_id() {
        let trace_id = TraceId::generate();
        let (tx, rx) = tokio::sync::oneshot::channel();
        let tx = std::sync::Mutex::new(Some(tx));
        let mut sink = MockActionLog::new();
        sink.expect_record().times(1).returning(move |_| {
            if let Some(tx) = tx.lock().expect("sender lock").take() {
                let _ = tx.send(TraceId::current());
            }
            Ok(())
        });
        let notifier = ActionNotifier::new(Arc::new(sink));

        let handle = TraceId::scope(trace_id, async { notifier.notify("users listed") }).await;
        handle.await.expect("notification task");

        assert_eq!(rx.await.expect("observed trace id"), Some(trace_id));
    }
}
