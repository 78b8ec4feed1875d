//! Driving port for creating a single user.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Error, User};

/// Domain use-case port for single-record creation.
///
/// The payload is the raw request body; an absent or unparsable body arrives
/// as [`Value::Null`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCreationCommand: Send + Sync {
    /// Validate and persist one user.
    async fn create_user(&self, payload: Value) -> Result<User, Error>;
}
