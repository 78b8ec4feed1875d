//! HTTP server configuration object and helpers.

use std::time::Duration;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use users_api::outbound::action_log::DEFAULT_ACTION_LOG_DELAY;
use users_api::outbound::persistence::DbPool;

const DEFAULT_CLEANUP_DELAY: Duration = Duration::from_secs(60);

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) action_log_delay: Duration,
    pub(crate) cleanup_delay: Duration,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration bound to `host:port`.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            bind_addr: (host.into(), port),
            db_pool: None,
            action_log_delay: DEFAULT_ACTION_LOG_DELAY,
            cleanup_delay: DEFAULT_CLEANUP_DELAY,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Attach a database connection pool.
    ///
    /// Without a pool the server runs on the in-memory user store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Set the artificial delay of the action log sink.
    #[must_use]
    pub fn with_action_log_delay(mut self, delay: Duration) -> Self {
        self.action_log_delay = delay;
        self
    }

    /// Set the delay before the housekeeping task runs.
    #[must_use]
    pub fn with_cleanup_delay(mut self, delay: Duration) -> Self {
        self.cleanup_delay = delay;
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
