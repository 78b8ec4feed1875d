//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`UserRepository`], [`ActionLog`]) are implemented by
//! outbound adapters. Driving ports ([`UsersQuery`], [`UserCreationCommand`],
//! [`UserBatchCommand`]) are implemented by domain services and consumed by
//! inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod action_log;
mod user_batch_command;
mod user_creation_command;
mod user_repository;
mod users_query;

pub use action_log::{ActionLog, ActionLogError, FixtureActionLog};
pub use user_batch_command::{BatchItemResult, BatchReport, UserBatchCommand};
pub use user_creation_command::UserCreationCommand;
pub use user_repository::{
    FixtureUserRepository, InsertOutcomes, UserPersistenceError, UserRepository,
    UserWriteSession,
};
pub use users_query::UsersQuery;

#[cfg(test)]
pub use action_log::MockActionLog;
#[cfg(test)]
pub use user_batch_command::MockUserBatchCommand;
#[cfg(test)]
pub use user_creation_command::MockUserCreationCommand;
#[cfg(test)]
pub use user_repository::{MockUserRepository, MockUserWriteSession};
#[cfg(test)]
pub use users_query::MockUsersQuery;
