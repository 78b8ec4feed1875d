//! Driving port for partial-failure batch creation.
//!
//! A batch either fails as a whole before any insert is attempted, or
//! completes with a [`BatchReport`] describing every eligible item.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Error, User};

/// Per-item outcome of a batch.
///
/// Serialises as `{"status": "success", "user": {...}}` or
/// `{"status": "error", "error": "...", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchItemResult {
    /// The store accepted the candidate.
    Success {
        /// Stored record including its assigned identifier.
        user: User,
    },
    /// The store rejected the candidate.
    Error {
        /// Error message reported by the store.
        error: String,
        /// The submitted item, echoed verbatim.
        data: Value,
    },
}

impl BatchItemResult {
    /// Whether the item was stored.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Aggregate outcome of a batch.
///
/// `results` follows input order, restricted to eligible items; `total`
/// always equals `results.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    total: usize,
    results: Vec<BatchItemResult>,
}

impl BatchReport {
    /// Build a report from ordered item outcomes.
    pub fn new(results: Vec<BatchItemResult>) -> Self {
        Self {
            total: results.len(),
            results,
        }
    }

    /// Number of eligible items processed.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Outcomes in input order.
    pub fn results(&self) -> &[BatchItemResult] {
        &self.results
    }

    /// Number of items the store accepted.
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|item| item.is_success()).count()
    }
}

/// Domain use-case port for batch creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserBatchCommand: Send + Sync {
    /// Process a raw batch payload.
    async fn submit_batch(&self, payload: Value) -> Result<BatchReport, Error>;
}
