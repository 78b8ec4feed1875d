//! Builders wiring repository adapters into HTTP state ports.

use std::sync::Arc;

use actix_web::web;

use users_api::domain::ports::{FixtureUserRepository, UserRepository};
use users_api::domain::{ActionNotifier, UserAccountsService, UserBatchCoordinator};
use users_api::inbound::http::state::{HttpState, HttpStatePorts};
use users_api::outbound::action_log::TracingActionLog;
use users_api::outbound::persistence::DieselUserRepository;

use super::ServerConfig;

/// Build the ports bundle over a single repository instance.
///
/// The accounts service and the batch coordinator share `repository` so
/// every route observes the same store.
fn ports_for<R>(repository: Arc<R>, notifier: ActionNotifier) -> HttpStatePorts
where
    R: UserRepository + 'static,
{
    let accounts = Arc::new(UserAccountsService::new(
        Arc::clone(&repository),
        notifier.clone(),
    ));
    HttpStatePorts {
        users: accounts.clone(),
        user_creation: accounts,
        user_batch: Arc::new(UserBatchCoordinator::new(repository, notifier)),
    }
}

/// Build HTTP state using the Diesel repository when a pool is configured,
/// otherwise the in-memory fixture store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let notifier = ActionNotifier::new(Arc::new(TracingActionLog::new(config.action_log_delay)));
    let ports = match &config.db_pool {
        Some(pool) => ports_for(
            Arc::new(DieselUserRepository::new(pool.clone())),
            notifier,
        ),
        None => ports_for(Arc::new(FixtureUserRepository::new()), notifier),
    };
    web::Data::new(HttpState::new(ports))
}
