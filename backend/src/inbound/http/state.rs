//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{UserBatchCommand, UserCreationCommand, UsersQuery};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users: Arc<dyn UsersQuery>,
    pub user_creation: Arc<dyn UserCreationCommand>,
    pub user_batch: Arc<dyn UserBatchCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersQuery>,
    pub user_creation: Arc<dyn UserCreationCommand>,
    pub user_batch: Arc<dyn UserBatchCommand>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use users_api::domain::ports::{FixtureActionLog, FixtureUserRepository};
    /// use users_api::domain::{ActionNotifier, UserAccountsService, UserBatchCoordinator};
    /// use users_api::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let repository = Arc::new(FixtureUserRepository::new());
    /// let notifier = ActionNotifier::new(Arc::new(FixtureActionLog));
    /// let accounts = Arc::new(UserAccountsService::new(repository.clone(), notifier.clone()));
    /// let state = HttpState::new(HttpStatePorts {
    ///     users: accounts.clone(),
    ///     user_creation: accounts,
    ///     user_batch: Arc::new(UserBatchCoordinator::new(repository, notifier)),
    /// });
    /// let _batch = state.user_batch.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            users,
            user_creation,
            user_batch,
        } = ports;
        Self {
            users,
            user_creation,
            user_batch,
        }
    }
}
