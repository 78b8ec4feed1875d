//! Domain primitives, services, and ports.
//!
//! Purpose: Define strongly typed user entities and the use-cases built on
//! them, keeping transport and persistence concerns behind the traits in
//! [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode — transport-agnostic failure envelope.
//! - User, NewUser and their value types — the persisted user record.
//! - UserBatchCoordinator — partial-failure batch insert.
//! - UserAccountsService — single create and list.
//! - ActionNotifier — fire-and-forget action log dispatch.
//! - TraceId — request correlation identifier.

pub mod action_notifier;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_accounts_service;
pub mod user_batch;

pub use self::action_notifier::ActionNotifier;
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EmailAddress, NewUser, User, UserId, UserName, UserValidationError};
pub use self::user_accounts_service::UserAccountsService;
pub use self::user_batch::{
    BATCH_BODY_ERROR, BatchCandidate, BatchSubmission, BatchValidationError, UserBatchCoordinator,
};

use self::ports::UserPersistenceError;

/// Map a store failure surfaced outside a batch item into a domain error.
///
/// Connection failures map to `service_unavailable`; everything else is an
/// internal error that the HTTP adapter redacts.
pub(crate) fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => Error::conflict(error.to_string()),
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user store error: {message}"))
        }
    }
}
