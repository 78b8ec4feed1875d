//! Partial-failure batch insert.
//!
//! A [`BatchSubmission`] classifies the raw payload into eligible candidates,
//! keeping each original item alongside its validated [`NewUser`]. The
//! [`UserBatchCoordinator`] then leases one store session, dispatches every
//! insert at once and slots each index-tagged outcome back into input order.
//! Notifications go out as individual inserts succeed.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::StreamExt;
use serde_json::Value;
use tracing::{debug, error, warn};

use super::ports::{
    BatchItemResult, BatchReport, UserBatchCommand, UserPersistenceError, UserRepository,
};
use super::{ActionNotifier, Error, NewUser, User};

/// Message returned when the payload is not a JSON array.
pub const BATCH_BODY_ERROR: &str = "Request body should be an array";

/// Validation failures detected before any store access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchValidationError {
    /// The payload is absent or not a JSON array.
    #[error("Request body should be an array")]
    NotAnArray,
}

impl From<BatchValidationError> for Error {
    fn from(value: BatchValidationError) -> Self {
        Error::invalid_request(value.to_string())
    }
}

/// An eligible batch item paired with the payload it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchCandidate {
    original: Value,
    new_user: NewUser,
}

impl BatchCandidate {
    /// Classify one item. Returns `None` when `name` or `email` is missing,
    /// empty or not a string.
    pub fn classify(item: Value) -> Option<Self> {
        let field = |key: &str| item.get(key).and_then(Value::as_str);
        let new_user = NewUser::try_from_parts(field("name"), field("email")).ok()?;
        Some(Self {
            original: item,
            new_user,
        })
    }

    /// Validated candidate.
    pub fn new_user(&self) -> &NewUser {
        &self.new_user
    }

    /// Item as submitted.
    pub fn original(&self) -> &Value {
        &self.original
    }
}

/// Validated batch payload holding eligible candidates in input order.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use users_api::domain::BatchSubmission;
///
/// let submission = BatchSubmission::try_from(json!([
///     {"name": "A", "email": "a@x.com"},
///     {"email": "noname@x.com"},
/// ]))
/// .expect("array payload");
/// assert_eq!(submission.candidates().len(), 1);
///
/// assert!(BatchSubmission::try_from(json!({"name": "A"})).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSubmission {
    candidates: Vec<BatchCandidate>,
}

impl BatchSubmission {
    /// Eligible candidates in input order.
    pub fn candidates(&self) -> &[BatchCandidate] {
        &self.candidates
    }

    fn into_candidates(self) -> Vec<BatchCandidate> {
        self.candidates
    }
}

impl TryFrom<Value> for BatchSubmission {
    type Error = BatchValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Array(items) = value else {
            return Err(BatchValidationError::NotAnArray);
        };
        let candidates = items
            .into_iter()
            .filter_map(BatchCandidate::classify)
            .collect();
        Ok(Self { candidates })
    }
}

/// Batch insert coordinator implementing [`UserBatchCommand`].
#[derive(Clone)]
pub struct UserBatchCoordinator<R> {
    repository: Arc<R>,
    notifier: ActionNotifier,
}

impl<R> UserBatchCoordinator<R> {
    /// Create a coordinator over `repository`.
    pub fn new(repository: Arc<R>, notifier: ActionNotifier) -> Self {
        Self {
            repository,
            notifier,
        }
    }
}

impl<R> UserBatchCoordinator<R>
where
    R: UserRepository,
{
    /// Insert every candidate of `submission` and report per-item outcomes.
    ///
    /// A batch with no candidates never touches the store. Failing to open a
    /// session is the only whole-batch error; insert failures are recorded
    /// in the matching result slot. An item the store never reports on is
    /// recorded as a failure.
    pub async fn submit(&self, submission: BatchSubmission) -> Result<BatchReport, Error> {
        let candidates = submission.into_candidates();
        if candidates.is_empty() {
            debug!("batch has no eligible items");
            return Ok(BatchReport::new(Vec::new()));
        }

        let mut session = self.repository.open_session().await.map_err(|err| {
            error!(error = %err, "failed to open user store session for batch");
            Error::internal(format!("failed to open user store session: {err}"))
        })?;

        let new_users = candidates
            .iter()
            .map(|candidate| candidate.new_user().clone())
            .collect();
        let mut outcomes = session.insert_all(new_users).await;
        let mut slots: Vec<Option<Result<User, UserPersistenceError>>> =
            candidates.iter().map(|_| None).collect();
        while let Some((index, outcome)) = outcomes.next().await {
            if let Ok(user) = &outcome {
                self.notifier
                    .notify(format!("batch: user created - {}", user.name().as_ref()));
            }
            match slots.get_mut(index) {
                Some(slot) => *slot = Some(outcome),
                None => warn!(index, "store reported an outcome for an unknown batch item"),
            }
        }

        let results = candidates
            .into_iter()
            .zip(slots)
            .map(|(candidate, slot)| {
                let outcome = slot.unwrap_or_else(|| {
                    Err(UserPersistenceError::query("no outcome reported for item"))
                });
                item_result(candidate, outcome)
            })
            .collect();

        Ok(BatchReport::new(results))
    }
}

fn item_result(
    candidate: BatchCandidate,
    outcome: Result<User, UserPersistenceError>,
) -> BatchItemResult {
    match outcome {
        Ok(user) => BatchItemResult::Success { user },
        Err(err) => {
            warn!(
                error = %err,
                email = %candidate.new_user().email(),
                "batch item insert failed"
            );
            BatchItemResult::Error {
                error: err.to_string(),
                data: candidate.original,
            }
        }
    }
}

#[async_trait]
impl<R> UserBatchCommand for UserBatchCoordinator<R>
where
    R: UserRepository,
{
    async fn submit_batch(&self, payload: Value) -> Result<BatchReport, Error> {
        let submission = BatchSubmission::try_from(payload)?;
        self.submit(submission).await
    }
}

#[cfg(test)]
#[path = "user_batch_tests.rs"]
mod tests;
