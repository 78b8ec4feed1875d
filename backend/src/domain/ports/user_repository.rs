//! Port abstraction for user persistence adapters and their errors.
//!
//! A batch acquires one [`UserWriteSession`] up front through
//! [`UserRepository::open_session`] and hands every candidate to
//! [`UserWriteSession::insert_all`], which dispatches them together and
//! reports each outcome as soon as it completes.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};

use crate::domain::{NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The store rejected an insert because the email is already taken.
        DuplicateEmail { email: String } =>
            "duplicate key value violates unique constraint: email {email} already exists",
    }
}

/// Insert outcomes tagged with the index of their candidate, in completion
/// order.
pub type InsertOutcomes = BoxStream<'static, (usize, Result<User, UserPersistenceError>)>;

/// Session leased from the store for the duration of one operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserWriteSession: Send {
    /// Insert a candidate and return the stored record.
    async fn insert(&mut self, new_user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Issue one independent insert per candidate without waiting on any of
    /// them.
    ///
    /// The stream yields exactly one outcome per candidate. A failed insert
    /// never prevents the others from completing.
    async fn insert_all(&mut self, new_users: Vec<NewUser>) -> InsertOutcomes;
}

/// Driven port for the user store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Lease a write session. Failing here fails the whole operation.
    async fn open_session(&self) -> Result<Box<dyn UserWriteSession>, UserPersistenceError>;

    /// Return every stored user ordered by identifier.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;
}

#[derive(Debug, Default)]
struct FixtureState {
    users: Vec<User>,
    last_id: i32,
}

/// In-memory user store enforcing email uniqueness.
///
/// Used when no database is configured and by tests that need store
/// semantics without PostgreSQL.
#[derive(Debug, Default, Clone)]
pub struct FixtureUserRepository {
    state: Arc<Mutex<FixtureState>>,
}

impl FixtureUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_state(state: &Mutex<FixtureState>) -> Result<MutexGuard<'_, FixtureState>, UserPersistenceError> {
    state
        .lock()
        .map_err(|_| UserPersistenceError::query("fixture user store lock poisoned"))
}

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn open_session(&self) -> Result<Box<dyn UserWriteSession>, UserPersistenceError> {
        Ok(Box::new(FixtureUserSession {
            state: Arc::clone(&self.state),
        }))
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(lock_state(&self.state)?.users.clone())
    }
}

struct FixtureUserSession {
    state: Arc<Mutex<FixtureState>>,
}

impl FixtureUserSession {
    fn store(&self, new_user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut state = lock_state(&self.state)?;
        if state.users.iter().any(|user| user.email() == new_user.email()) {
            return Err(UserPersistenceError::duplicate_email(new_user.email().as_ref()));
        }
        state.last_id += 1;
        let user = User::from_new(UserId::new(state.last_id), new_user.clone());
        state.users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl UserWriteSession for FixtureUserSession {
    async fn insert(&mut self, new_user: &NewUser) -> Result<User, UserPersistenceError> {
        self.store(new_user)
    }

    async fn insert_all(&mut self, new_users: Vec<NewUser>) -> InsertOutcomes {
        let outcomes: Vec<_> = new_users
            .iter()
            .map(|new_user| self.store(new_user))
            .enumerate()
            .collect();
        stream::iter(outcomes).boxed()
    }
}
